//! Gene records: name, nucleotide sequence and free-text function.
//!
//! A [`Gene`] owns independent copies of its three fields. Copies are made
//! with fallible reservation so an allocation failure surfaces as
//! [`PlasmidError::Allocation`] instead of aborting, and a failed construction
//! or edit never leaves a partially built record behind.
use core::fmt;

use crate::error::{PlasmidError, Result};

/// One entry of a plasmid.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Gene {
    name: String,
    sequence: String,
    function: String,
}

/// Copy `s` into a freshly reserved `String`.
fn owned_copy(s: &str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve_exact(s.len()).map_err(|_| PlasmidError::Allocation)?;
    out.push_str(s);
    Ok(out)
}

impl Gene {
    /// Build a record from borrowed fields.
    ///
    /// The sequence is stored as given; it is not checked against any alphabet.
    ///
    /// # Examples
    /// ```
    /// let g = plasmid::Gene::new("lacZ", "ATGACC", "beta-galactosidase").unwrap();
    /// assert_eq!(g.sequence_len(), 6);
    /// ```
    pub fn new(name: &str, sequence: &str, function: &str) -> Result<Self> {
        // Any earlier copy is dropped on the way out if a later one fails.
        let name = owned_copy(name)?;
        let sequence = owned_copy(sequence)?;
        let function = owned_copy(function)?;
        Ok(Self { name, sequence, function })
    }

    pub fn name(&self) -> &str { &self.name }

    /// Nucleotide string, read 5' to 3'.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn function(&self) -> &str { &self.function }

    /// Length of the sequence in bases.
    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    /// Replace all three fields at once.
    ///
    /// The new copies are made first; only when all three exist are the old
    /// strings swapped out. On error `self` is untouched.
    pub fn replace_fields(&mut self, name: &str, sequence: &str, function: &str) -> Result<()> {
        let fresh = Gene::new(name, sequence, function)?;
        *self = fresh;
        Ok(())
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bp): {}", self.name, self.sequence.len(), self.function)
    }
}
