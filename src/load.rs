//! Bulk loading of genes from `name,sequence,function` text.
//!
//! Each line yields one gene. Everything after the second comma belongs to
//! the function (so functions may contain commas), with trailing whitespace
//! trimmed. Lines with fewer than three fields are skipped with a warning.
//! Quotes carry no meaning: a `"` is kept as part of the field text and never
//! joins lines together. Empty fields still count, so `a,,b` is a gene with
//! an empty sequence rather than a short line.
//!
//! Loaded genes are inserted at positions 1, 2, 3, ... in file order, so a
//! load into a non-empty plasmid places the file's genes in front of the
//! existing ones.
//!
//! ### Errors
//! Open/read failures are bubbled via `anyhow::Result`; bad lines are not errors.
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::plasmid::Plasmid;

/// Outcome of one bulk load.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadSummary {
    /// Genes inserted.
    pub added: usize,
    /// Lines that were malformed or could not be inserted.
    pub skipped: usize,
}

/// Load genes from a CSV file at `path`.
pub fn load_csv<P: AsRef<Path>>(plasmid: &mut Plasmid, path: P) -> Result<LoadSummary> {
    let p = path.as_ref();
    let file = std::fs::File::open(p).with_context(|| format!("cannot open CSV file: {}", p.display()))?;
    let summary = load_csv_reader(plasmid, file).with_context(|| format!("reading {}", p.display()))?;
    info!("loaded {} genes from {} ({} skipped)", summary.added, p.display(), summary.skipped);
    Ok(summary)
}

/// Load genes from any reader producing `name,sequence,function` lines.
pub fn load_csv_reader<R: Read>(plasmid: &mut Plasmid, reader: R) -> Result<LoadSummary> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut summary = LoadSummary::default();
    let mut position = 1;
    for rec in rdr.records() {
        let r = match rec {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("CSV format error: {}", e);
                summary.skipped += 1;
                continue;
            }
        };
        if r.len() < 3 {
            warn!("CSV format error in line: {}", r.iter().collect::<Vec<_>>().join(","));
            summary.skipped += 1;
            continue;
        }

        let name = &r[0];
        let sequence = &r[1];
        let function = r.iter().skip(2).collect::<Vec<_>>().join(",");
        let function = function.trim_end();

        // The position advances even when an insert fails.
        let at = position;
        position += 1;
        match plasmid.add_gene(name, sequence, function, at) {
            Ok(()) => summary.added += 1,
            Err(e) => {
                warn!("failed to add gene '{}': {}", name, e);
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}
