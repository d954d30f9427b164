use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;

use plasmid::shell::Shell;
use plasmid::{load_csv, Plasmid, PlasmidError};

/// Plasmid CLI
#[derive(Parser)]
#[command(name = "plasmid")]
#[command(version = plasmid::VERSION)]
#[command(about = "Ordered gene registry, plasmid map reports and PCR primer design", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Shell {
        /// CSV file (name,sequence,function) to load before the menu starts
        #[arg(long)]
        load: Option<PathBuf>,
    },

    /// List the genes of a CSV file with their offsets
    List {
        /// CSV file (name,sequence,function)
        csv: PathBuf,
    },

    /// Show one gene by 1-based position
    Show {
        /// CSV file (name,sequence,function)
        csv: PathBuf,
        /// 1-based gene position
        position: usize,
    },

    /// Design forward/reverse primers for the gene at a position
    Primers {
        /// CSV file (name,sequence,function)
        csv: PathBuf,
        /// 1-based gene position
        position: usize,
        /// Primer length in bases
        length: usize,
    },

    /// Write the plasmid map report (concatenated sequence + legend)
    Report {
        /// CSV file (name,sequence,function)
        csv: PathBuf,
        /// Output report path
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Shell { load: None }) {
        Commands::Shell { load } => {
            let mut p = Plasmid::new();
            if let Some(path) = load {
                load_csv(&mut p, &path)?;
            }
            let stdin = io::stdin();
            let mut shell = Shell::with_plasmid(p, stdin.lock(), io::stdout());
            shell.run()?;
        }

        Commands::List { csv } => {
            let p = open(&csv)?;
            cmd_list(&p)?;
        }

        Commands::Show { csv, position } => {
            let p = open(&csv)?;
            let g = p.gene_at(position)?;
            println!("position: {}", position);
            println!("name: {}", g.name());
            println!("sequence: {}", g.sequence());
            println!("function: {}", g.function());
        }

        Commands::Primers { csv, position, length } => {
            let p = open(&csv)?;
            match p.design_primers_at(position, length) {
                Ok(pair) => {
                    let name = p.gene_at(position)?.name();
                    println!("PCR design for gene '{}' (position {}, length {}):", name, position, length);
                    println!("{}", pair);
                }
                Err(e @ PlasmidError::InvalidLength { .. }) => {
                    anyhow::bail!("{e}; choose a length between 1 and the gene length")
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Report { csv, output } => {
            let p = open(&csv)?;
            plasmid::save_report(&p, &output)?;
            println!("Plasmid saved to {}", output.display());
        }
    }

    Ok(())
}

fn open(csv: &Path) -> Result<Plasmid> {
    let mut p = Plasmid::new();
    load_csv(&mut p, csv).with_context(|| format!("loading {}", csv.display()))?;
    Ok(p)
}

fn cmd_list(p: &Plasmid) -> Result<()> {
    if p.is_empty() {
        println!("Plasmid is empty.");
        return Ok(());
    }
    let rows = plasmid::gene_rows(p);
    let df = df!(
        "no."    => rows.iter().map(|r| r.0 as u64).collect::<Vec<_>>(),
        "name"   => rows.iter().map(|r| r.1.clone()).collect::<Vec<_>>(),
        "length" => rows.iter().map(|r| r.2 as u64).collect::<Vec<_>>(),
        "start"  => rows.iter().map(|r| r.3 as u64).collect::<Vec<_>>(),
        "end"    => rows.iter().map(|r| r.4 as u64).collect::<Vec<_>>(),
    )?;

    // Read by Polars' pretty-printer; show every row and the full name column.
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "100000");

    println!("{}", df);
    println!("total: {} bp", p.total_sequence_length());
    Ok(())
}
