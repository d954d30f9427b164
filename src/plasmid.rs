//! The plasmid registry: an ordered collection of [`Gene`] records.
//!
//! All addressing is by 1-based position in current traversal order, resolved
//! by walking from the first gene. Multi-step mutations are all-or-nothing:
//! when `add_gene` or `edit_gene` fails, the plasmid is exactly as before.
use log::debug;

use crate::error::{PlasmidError, Result};
use crate::gene::Gene;
use crate::primer::{self, PrimerPair};
use crate::sequence::{NodeHandle, OrderedSequence};

/// Where one gene sits in the concatenated plasmid sequence (1-based, inclusive).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GeneSpan<'a> {
    /// 1-based position of the gene in the plasmid.
    pub index: usize,
    pub gene: &'a Gene,
    pub start: usize,
    /// `start - 1` for a gene with an empty sequence.
    pub end: usize,
}

/// Ordered gene registry.
///
/// # Examples
/// ```
/// let mut p = plasmid::Plasmid::new();
/// p.add_gene("ori", "ACGTA", "origin", 1).unwrap();
/// p.add_gene("ampR", "GGC", "resistance", 99).unwrap();
/// assert_eq!(p.gene_at(2).unwrap().name(), "ampR");
/// assert_eq!(p.total_sequence_length(), 8);
/// ```
#[derive(Debug, Default)]
pub struct Plasmid {
    genes: OrderedSequence<Gene>,
}

impl Plasmid {
    /// Create an empty plasmid.
    pub fn new() -> Self { Self::default() }

    /// Number of genes.
    pub fn len(&self) -> usize { self.genes.len() }

    pub fn is_empty(&self) -> bool { self.genes.is_empty() }

    /// Insert a new gene at `position`.
    ///
    /// `position <= 1` inserts first; a position past the end appends.
    pub fn add_gene(&mut self, name: &str, sequence: &str, function: &str, position: usize) -> Result<()> {
        let gene = Gene::new(name, sequence, function)?;
        self.genes.insert_at(gene, position)?;
        debug!("added gene '{}' at requested position {}", name, position);
        Ok(())
    }

    /// Remove the first gene (from the start) whose name equals `name` exactly.
    pub fn delete_gene_by_name(&mut self, name: &str) -> Result<Gene> {
        let handle = self
            .genes
            .handles()
            .find(|h| self.genes.get(*h).is_some_and(|g| g.name() == name))
            .ok_or_else(|| PlasmidError::NameNotFound(name.to_string()))?;
        let gene = self.genes.remove(handle)?;
        debug!("deleted gene '{}'", gene.name());
        Ok(gene)
    }

    /// Remove the gene at `position`.
    pub fn delete_gene_at(&mut self, position: usize) -> Result<Gene> {
        let handle = self.handle_at(position)?;
        let gene = self.genes.remove(handle)?;
        debug!("deleted gene '{}' at position {}", gene.name(), position);
        Ok(gene)
    }

    /// Read-only view of the gene at `position`.
    pub fn gene_at(&self, position: usize) -> Result<&Gene> {
        let handle = self.handle_at(position)?;
        self.genes.get(handle).ok_or(PlasmidError::PositionNotFound(position))
    }

    /// Replace name, sequence and function of the gene at `position`.
    pub fn edit_gene(&mut self, position: usize, name: &str, sequence: &str, function: &str) -> Result<()> {
        let handle = self.handle_at(position)?;
        let gene = self.genes.get_mut(handle).ok_or(PlasmidError::PositionNotFound(position))?;
        gene.replace_fields(name, sequence, function)?;
        debug!("edited gene at position {} -> '{}'", position, name);
        Ok(())
    }

    /// `(position, gene)` pairs in traversal order, positions starting at 1.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, &Gene)> + '_ {
        self.genes.iter().enumerate().map(|(i, g)| (i + 1, g))
    }

    /// Genes in traversal order.
    pub fn genes(&self) -> impl DoubleEndedIterator<Item = &Gene> + '_ { self.genes.iter() }

    /// Sum of all sequence lengths.
    pub fn total_sequence_length(&self) -> usize {
        self.genes.iter().map(Gene::sequence_len).sum()
    }

    /// Every gene with its start/end offsets inside the concatenated sequence.
    ///
    /// Gene *i* starts at `1 + sum(len of genes before it)` and ends at
    /// `start + len - 1`.
    pub fn gene_spans(&self) -> impl Iterator<Item = GeneSpan<'_>> + '_ {
        let mut start = 1;
        self.enumerate().map(move |(index, gene)| {
            let span = GeneSpan { index, gene, start, end: start + gene.sequence_len() - 1 };
            start += gene.sequence_len();
            span
        })
    }

    /// All sequences joined in order, no separator.
    pub fn concatenated_sequence(&self) -> String {
        let mut out = String::with_capacity(self.total_sequence_length());
        for g in self.genes.iter() {
            out.push_str(g.sequence());
        }
        out
    }

    /// Primer pair for the gene at `position`.
    ///
    /// A missing gene is reported before an invalid length.
    pub fn design_primers_at(&self, position: usize, primer_length: usize) -> Result<PrimerPair> {
        primer::design_primers(self.gene_at(position)?, primer_length)
    }

    /// Drop every gene.
    pub fn clear(&mut self) {
        let dropped = self.genes.clear();
        debug!("cleared {} genes", dropped.len());
    }

    fn handle_at(&self, position: usize) -> Result<NodeHandle> {
        self.genes.walk_to(position).ok_or(PlasmidError::PositionNotFound(position))
    }
}

impl Drop for Plasmid {
    fn drop(&mut self) {
        if !self.is_empty() {
            self.clear();
        }
    }
}
