//! Plasmid map report: the full concatenated sequence plus a legend.
//!
//! ```text
//! AAAAACCC
//!
//! # LEGEND:  No.  Name         Start     End
//!    1  a                1       5
//!    2  b                6       8
//! ```
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::plasmid::Plasmid;

/// Write the report for `plasmid` into `w`.
pub fn write_report<W: Write>(plasmid: &Plasmid, w: &mut W) -> std::io::Result<()> {
    writeln!(w, "{}", plasmid.concatenated_sequence())?;
    writeln!(w, "\n# LEGEND: {:>4}  {:<10}  {:>6}  {:>6}", "No.", "Name", "Start", "End")?;
    for s in plasmid.gene_spans() {
        writeln!(w, "{:>4}  {:<10}  {:>6}  {:>6}", s.index, s.gene.name(), s.start, s.end)?;
    }
    Ok(())
}

/// Write the report to a file at `path`, replacing any existing file.
pub fn save_report<P: AsRef<Path>>(plasmid: &Plasmid, path: P) -> Result<()> {
    let p = path.as_ref();
    let file = File::create(p).with_context(|| format!("cannot create {}", p.display()))?;
    let mut w = BufWriter::new(file);
    write_report(plasmid, &mut w).with_context(|| format!("writing {}", p.display()))?;
    w.flush().with_context(|| format!("writing {}", p.display()))?;
    info!("saved {} genes ({} bp) to {}", plasmid.len(), plasmid.total_sequence_length(), p.display());
    Ok(())
}
