//! Interactive numbered menu over a [`Plasmid`].
//!
//! The shell reads one answer per line from any `BufRead` and writes prompts
//! and results to any `Write`, so it runs the same against a terminal or a
//! scripted buffer. Core errors are turned into short messages here; the
//! library itself never prints.
//!
//! The session ends on menu choice `0`, on end of input, or when the menu
//! choice is not a number.
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use log::error;

use crate::error::PlasmidError;
use crate::plasmid::Plasmid;
use crate::{load, report};

/// Entries of the main menu.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuChoice {
    Exit,
    AddGene,
    DeleteGene,
    PrintContents,
    PrintGene,
    DesignPrimers,
    Save,
    LoadCsv,
    EditGene,
    Unknown,
}

impl FromStr for MenuChoice {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>()? {
            0 => Self::Exit,
            1 => Self::AddGene,
            2 => Self::DeleteGene,
            3 => Self::PrintContents,
            4 => Self::PrintGene,
            5 => Self::DesignPrimers,
            6 => Self::Save,
            7 => Self::LoadCsv,
            8 => Self::EditGene,
            _ => Self::Unknown,
        })
    }
}

const MENU: &str = "\n--- Plasmid Manager Menu ---
1) Add gene at position
2) Delete gene at position
3) Print plasmid contents
4) Print gene details from position
5) Design PCR primers for gene
6) Save to file
7) Load plasmid from CSV file (name,sequence,function)
8) Edit gene data
0) Exit";

enum Flow { Continue, Quit }

/// Menu-driven session owning one plasmid.
pub struct Shell<R, W> {
    input: R,
    out: W,
    plasmid: Plasmid,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Start a session on an empty plasmid.
    pub fn new(input: R, out: W) -> Self {
        Self::with_plasmid(Plasmid::new(), input, out)
    }

    /// Start a session on an existing plasmid.
    pub fn with_plasmid(plasmid: Plasmid, input: R, out: W) -> Self {
        Self { input, out, plasmid }
    }

    pub fn plasmid(&self) -> &Plasmid { &self.plasmid }

    /// End the session and hand the plasmid back.
    pub fn into_plasmid(self) -> Plasmid { self.plasmid }

    /// Run the menu loop until exit or end of input.
    pub fn run(&mut self) -> Result<()> {
        if self.plasmid.is_empty() {
            writeln!(self.out, "Creating a new empty plasmid...")?;
        }
        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(answer) = self.ask("Choice: ")? else { break };
            let Ok(choice) = answer.parse::<MenuChoice>() else { break };
            let flow = match choice {
                MenuChoice::AddGene => self.add_gene()?,
                MenuChoice::DeleteGene => self.delete_gene()?,
                MenuChoice::PrintContents => self.print_contents()?,
                MenuChoice::PrintGene => self.print_gene()?,
                MenuChoice::DesignPrimers => self.design_primers()?,
                MenuChoice::Save => self.save()?,
                MenuChoice::LoadCsv => self.load()?,
                MenuChoice::EditGene => self.edit_gene()?,
                MenuChoice::Exit => {
                    writeln!(self.out, "Exiting program.")?;
                    Flow::Quit
                }
                MenuChoice::Unknown => {
                    writeln!(self.out, "Invalid choice.")?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Print `label` and read one trimmed line; `None` at end of input.
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Self::ask`] but parses a whole number.
    /// Zero and negative answers all become `0` (head for add, not found elsewhere).
    /// `Some(None)` means the answer was not a number (already reported).
    fn ask_number(&mut self, label: &str) -> Result<Option<Option<usize>>> {
        let Some(answer) = self.ask(label)? else { return Ok(None) };
        match answer.parse::<i64>() {
            Ok(n) => Ok(Some(Some(usize::try_from(n.max(0)).unwrap_or(usize::MAX)))),
            Err(_) => {
                writeln!(self.out, "Invalid number: {answer}")?;
                Ok(Some(None))
            }
        }
    }

    fn add_gene(&mut self) -> Result<Flow> {
        let Some(name) = self.ask("Gene name: ")? else { return Ok(Flow::Quit) };
        let Some(seq) = self.ask("Sequence (5'-3'): ")? else { return Ok(Flow::Quit) };
        let Some(func) = self.ask("Function: ")? else { return Ok(Flow::Quit) };
        let Some(pos) = self.ask_number("Position in plasmid: ")? else { return Ok(Flow::Quit) };
        let Some(pos) = pos else { return Ok(Flow::Continue) };
        match self.plasmid.add_gene(&name, &seq, &func, pos) {
            Ok(()) => writeln!(self.out, "Gene added.")?,
            Err(e) => {
                error!("add gene '{}': {}", name, e);
                writeln!(self.out, "Error adding gene.")?
            }
        }
        Ok(Flow::Continue)
    }

    fn delete_gene(&mut self) -> Result<Flow> {
        let Some(pos) = self.ask_number("Gene position to delete: ")? else { return Ok(Flow::Quit) };
        let Some(pos) = pos else { return Ok(Flow::Continue) };
        match self.plasmid.delete_gene_at(pos) {
            Ok(gene) => writeln!(self.out, "Gene '{}' deleted.", gene.name())?,
            Err(e) if e.is_not_found() => writeln!(self.out, "No gene at position {pos}.")?,
            Err(e) => {
                error!("delete gene at {}: {}", pos, e);
                writeln!(self.out, "Error deleting gene.")?
            }
        }
        Ok(Flow::Continue)
    }

    fn print_contents(&mut self) -> Result<Flow> {
        if self.plasmid.is_empty() {
            writeln!(self.out, "Plasmid is empty.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.out, "Plasmid contents:")?;
        for (idx, g) in self.plasmid.enumerate() {
            writeln!(self.out, " {:>2}: {}", idx, g.name())?;
        }
        Ok(Flow::Continue)
    }

    fn print_gene(&mut self) -> Result<Flow> {
        let Some(pos) = self.ask_number("Gene position: ")? else { return Ok(Flow::Quit) };
        let Some(pos) = pos else { return Ok(Flow::Continue) };
        if self.plasmid.is_empty() {
            writeln!(self.out, "Plasmid is empty.")?;
            return Ok(Flow::Continue);
        }
        match self.plasmid.gene_at(pos) {
            Ok(g) => {
                writeln!(self.out, "Gene information at position {pos}:")?;
                writeln!(self.out, " Name: {}", g.name())?;
                writeln!(self.out, " Sequence: {}", g.sequence())?;
                writeln!(self.out, " Function: {}", g.function())?;
            }
            Err(_) => writeln!(self.out, "No gene at position {pos}.")?,
        }
        Ok(Flow::Continue)
    }

    fn design_primers(&mut self) -> Result<Flow> {
        let Some(pos) = self.ask_number("Gene position: ")? else { return Ok(Flow::Quit) };
        let Some(pos) = pos else { return Ok(Flow::Continue) };
        let Some(len) = self.ask_number("Primer length: ")? else { return Ok(Flow::Quit) };
        let Some(len) = len else { return Ok(Flow::Continue) };
        if self.plasmid.is_empty() {
            writeln!(self.out, "Plasmid is empty.")?;
            return Ok(Flow::Continue);
        }
        match self.plasmid.design_primers_at(pos, len) {
            Ok(pair) => {
                let name = self.plasmid.gene_at(pos).map(|g| g.name()).unwrap_or_default();
                writeln!(self.out, "PCR design for gene '{name}' (position {pos}, length {len}):")?;
                writeln!(self.out, "{pair}")?;
            }
            Err(PlasmidError::InvalidLength { max, .. }) => {
                writeln!(self.out, "Invalid primer length (max {max}).")?
            }
            Err(_) => writeln!(self.out, "No gene at position {pos}.")?,
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self) -> Result<Flow> {
        let Some(fname) = self.ask("File name (format .txt): ")? else { return Ok(Flow::Quit) };
        match report::save_report(&self.plasmid, &fname) {
            Ok(()) => writeln!(self.out, "Plasmid saved to {fname}")?,
            Err(e) => {
                error!("{:#}", e);
                writeln!(self.out, "Error saving!")?
            }
        }
        Ok(Flow::Continue)
    }

    fn load(&mut self) -> Result<Flow> {
        let Some(fname) = self.ask("CSV file name to load: ")? else { return Ok(Flow::Quit) };
        match load::load_csv(&mut self.plasmid, &fname) {
            Ok(summary) => {
                if summary.skipped > 0 {
                    writeln!(self.out, "Skipped {} malformed line(s).", summary.skipped)?;
                }
                writeln!(self.out, "Plasmid loaded from file {fname}")?
            }
            Err(e) => {
                error!("{:#}", e);
                writeln!(self.out, "Error loading file.")?
            }
        }
        Ok(Flow::Continue)
    }

    fn edit_gene(&mut self) -> Result<Flow> {
        let Some(pos) = self.ask_number("Gene position to edit: ")? else { return Ok(Flow::Quit) };
        let Some(pos) = pos else { return Ok(Flow::Continue) };
        let Some(name) = self.ask("New name: ")? else { return Ok(Flow::Quit) };
        let Some(seq) = self.ask("New sequence: ")? else { return Ok(Flow::Quit) };
        let Some(func) = self.ask("New function: ")? else { return Ok(Flow::Quit) };
        match self.plasmid.edit_gene(pos, &name, &seq, &func) {
            Ok(()) => writeln!(self.out, "Gene at position {pos} updated.")?,
            Err(e) => {
                error!("edit gene at {}: {}", pos, e);
                writeln!(self.out, "Error editing gene.")?
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Plasmid, String) {
        let mut out = Vec::new();
        let plasmid = {
            let mut shell = Shell::new(Cursor::new(script.to_string()), &mut out);
            shell.run().unwrap();
            shell.into_plasmid()
        };
        (plasmid, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_print_and_exit() {
        let (p, out) = run("1\nori\nACGTA\norigin\n1\n1\nampR\nGGC\nresistance\n9\n3\n0\n");
        assert_eq!(p.len(), 2);
        assert!(out.contains("Gene added."));
        assert!(out.contains("Plasmid contents:\n  1: ori\n  2: ampR\n"));
        assert!(out.ends_with("Exiting program.\n"));
    }

    #[test]
    fn negative_position_adds_at_head() {
        let (p, out) = run("1\na\nA\nx\n1\n1\nb\nC\ny\n-2\n0\n");
        let names: Vec<&str> = p.genes().map(|g| g.name()).collect();
        assert_eq!(names, ["b", "a"]);
        assert!(!out.contains("Invalid number"));
    }

    #[test]
    fn negative_position_is_not_found_for_lookups() {
        let (p, out) = run("1\na\nA\nx\n1\n4\n-1\n2\n-3\n0\n");
        assert!(out.contains("No gene at position 0."));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn delete_missing_position_reports_not_found() {
        let (_, out) = run("2\n3\n0\n");
        assert!(out.contains("No gene at position 3."));
    }

    #[test]
    fn primers_and_invalid_length() {
        let script = "1\nfrag\nAATTCCGG\ntest\n1\n5\n1\n3\n5\n1\n0\n";
        let (_, out) = run(script);
        assert!(out.contains("PCR design for gene 'frag' (position 1, length 3):"));
        assert!(out.contains(" Forward primer: AAT\n Reverse primer: CCG\n"));
        assert!(out.contains("Invalid primer length (max 8)."));
    }

    #[test]
    fn edit_and_show_gene() {
        let script = "1\nold\nA\nx\n1\n8\n1\nnew\nCCCC\nupdated function\n4\n1\n8\n5\na\nb\nc\n0\n";
        let (p, out) = run(script);
        assert!(out.contains("Gene at position 1 updated."));
        assert!(out.contains(" Name: new\n Sequence: CCCC\n Function: updated function\n"));
        assert!(out.contains("Error editing gene."));
        assert_eq!(p.gene_at(1).unwrap().name(), "new");
    }

    #[test]
    fn unknown_choice_keeps_looping_and_eof_ends() {
        let (_, out) = run("42\n3\n");
        assert!(out.contains("Invalid choice."));
        assert!(out.contains("Plasmid is empty."));
        assert!(!out.contains("Exiting program."));
    }

    #[test]
    fn non_numeric_choice_ends_session() {
        let (_, out) = run("abc\n3\n");
        assert!(!out.contains("Plasmid is empty."));
    }

    #[test]
    fn load_then_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("in.csv");
        let txt = dir.path().join("out.txt");
        std::fs::write(&csv, "a,AAAAA,first\nbad\nb,CCC,second\n").unwrap();
        let script = format!("7\n{}\n6\n{}\n0\n", csv.display(), txt.display());
        let (p, out) = run(&script);
        assert_eq!(p.len(), 2);
        assert!(out.contains("Skipped 1 malformed line(s)."));
        assert!(out.contains("Plasmid saved to"));
        let saved = std::fs::read_to_string(&txt).unwrap();
        assert!(saved.starts_with("AAAAACCC\n"));
    }
}
