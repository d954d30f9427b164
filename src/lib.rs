#![forbid(unsafe_code)]
//! # plasmid
//!
//! An ordered registry of **gene records** making up a plasmid, with 1-based
//! positional insert/delete/edit, bulk loading from `name,sequence,function`
//! CSV, a plasmid map report, and **PCR primer** derivation from a gene's
//! template sequence.
//!
//! ## Layout
//! - [`sequence`]: arena-backed doubly-linked sequence with stable handles.
//! - [`gene`]: the [`Gene`] record and its all-or-nothing field replacement.
//! - [`plasmid`]: the [`Plasmid`] registry built on the two above.
//! - [`primer`]: forward / reverse-complement primer design.
//! - [`load`] and [`report`]: CSV input and map report output.
//! - [`shell`]: the interactive numbered menu used by the `plasmid` binary.
//!
//! ## Examples
//! ```rust
//! let mut p = plasmid::Plasmid::new();
//! p.add_gene("ori", "ACGTACGT", "origin of replication", 1).unwrap();
//! p.add_gene("ampR", "AATTCCGG", "ampicillin resistance", 2).unwrap();
//!
//! let pair = p.design_primers_at(2, 3).unwrap();
//! assert_eq!(pair.forward, "AAT");
//! assert_eq!(pair.reverse, "CCG");
//!
//! let spans: Vec<_> = p.gene_spans().map(|s| (s.start, s.end)).collect();
//! assert_eq!(spans, [(1, 8), (9, 16)]);
//! ```
//!
//! Positions past the end of the plasmid are accepted by
//! [`Plasmid::add_gene`] and behave as an append; lookups, edits and
//! deletions at such positions fail with [`PlasmidError::PositionNotFound`].

pub mod error;
pub mod sequence;
pub mod gene;
pub mod plasmid;
pub mod primer;
pub mod load;
pub mod report;
pub mod shell;

pub use error::PlasmidError;
pub use gene::Gene;
pub use plasmid::{GeneSpan, Plasmid};
pub use primer::{design_primers, PrimerPair};
pub use load::{load_csv, LoadSummary};
pub use report::save_report;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convenience: `(index, name, length, start, end)` rows for every gene (for CLI/UX).
pub fn gene_rows(p: &Plasmid) -> Vec<(usize, String, usize, usize, usize)> {
    p.gene_spans()
        .map(|s| (s.index, s.gene.name().to_string(), s.gene.sequence_len(), s.start, s.end))
        .collect()
}

#[cfg(test)]
mod cli_support_tests {
    use super::*;

    #[test]
    fn rows_follow_traversal_order() {
        let mut p = Plasmid::new();
        p.add_gene("b", "CCC", "", 1).unwrap();
        p.add_gene("a", "AAAAA", "", 1).unwrap();
        let rows = gene_rows(&p);
        assert_eq!(rows, vec![(1, "a".to_string(), 5, 1, 5), (2, "b".to_string(), 3, 6, 8)]);
    }
}
