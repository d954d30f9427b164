//! PCR primer derivation from a gene's template sequence.
//!
//! The forward primer is the 5' prefix of the template. The reverse primer is
//! the reverse complement of the template's 3' end, i.e. what anneals to the
//! opposite strand, read 5' to 3'.
//!
//! # Examples
//! ```
//! use plasmid::{Gene, primer::design_primers};
//! let g = Gene::new("frag", "AATTCCGG", "test").unwrap();
//! let p = design_primers(&g, 3).unwrap();
//! assert_eq!((p.forward.as_str(), p.reverse.as_str()), ("AAT", "CCG"));
//! ```
use core::fmt;

use crate::error::{PlasmidError, Result};
use crate::gene::Gene;

/// Watson-Crick complement of one base, case-insensitive.
///
/// Anything outside `ACGTacgt` maps to `N` (unknown base).
#[inline]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' | b'a' => b'T',
        b'T' | b't' => b'A',
        b'C' | b'c' => b'G',
        b'G' | b'g' => b'C',
        _ => b'N',
    }
}

/// Reverse complement of a whole sequence (uppercase output).
pub fn reverse_complement<S: AsRef<[u8]>>(seq: S) -> String {
    seq.as_ref().iter().rev().map(|&b| char::from(complement(b))).collect()
}

/// Forward/reverse primer pair, both exactly the requested length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimerPair {
    pub forward: String,
    pub reverse: String,
}

impl PrimerPair {
    /// Primer length in bases.
    pub fn len(&self) -> usize { self.forward.len() }

    pub fn is_empty(&self) -> bool { self.forward.is_empty() }
}

impl fmt::Display for PrimerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Forward primer: {}", self.forward)?;
        write!(f, " Reverse primer: {}", self.reverse)
    }
}

/// Derive a primer pair of `primer_length` bases from `gene`.
///
/// Fails with [`PlasmidError::InvalidLength`] when the length is zero or
/// exceeds the template; the error carries the maximum valid length.
pub fn design_primers(gene: &Gene, primer_length: usize) -> Result<PrimerPair> {
    let template = gene.sequence().as_bytes();
    let max = template.len();
    if primer_length == 0 || primer_length > max {
        return Err(PlasmidError::InvalidLength { requested: primer_length, max });
    }

    // Byte-wise so non-ASCII input cannot split a char; such bytes become N below.
    let forward = template[..primer_length]
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { 'N' })
        .collect();
    let reverse = reverse_complement(&template[max - primer_length..]);
    Ok(PrimerPair { forward, reverse })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gene(seq: &str) -> Gene { Gene::new("g", seq, "f").unwrap() }

    #[test]
    fn palindromic_template() {
        let p = design_primers(&gene("ACGTACGT"), 4).unwrap();
        assert_eq!(p.forward, "ACGT");
        assert_eq!(p.reverse, "ACGT");
    }

    #[test]
    fn reverse_reads_from_the_3prime_end() {
        let p = design_primers(&gene("AATTCCGG"), 3).unwrap();
        assert_eq!(p.forward, "AAT");
        assert_eq!(p.reverse, "CCG");
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn full_length_primer_is_reverse_complement() {
        let p = design_primers(&gene("ATGCCG"), 6).unwrap();
        assert_eq!(p.forward, "ATGCCG");
        assert_eq!(p.reverse, reverse_complement("ATGCCG"));
        assert_eq!(p.reverse, "CGGCAT");
    }

    #[test]
    fn lowercase_and_unknown_bases() {
        let p = design_primers(&gene("acgtXn"), 3).unwrap();
        assert_eq!(p.forward, "acg");
        assert_eq!(p.reverse, "NNA");
    }

    #[test]
    fn rejects_zero_and_oversized_lengths() {
        let g = gene("ACGTACGT");
        assert_eq!(design_primers(&g, 0), Err(PlasmidError::InvalidLength { requested: 0, max: 8 }));
        assert_eq!(design_primers(&g, 9), Err(PlasmidError::InvalidLength { requested: 9, max: 8 }));
        assert!(design_primers(&gene(""), 1).is_err());
    }

    #[test]
    fn complement_table() {
        let got: Vec<u8> = b"ACGTacgt-".iter().map(|&b| complement(b)).collect();
        assert_eq!(got, b"TGCATGCAN");
    }
}
