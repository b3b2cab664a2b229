//! Solve every deal in a CSV file
//!
//! Reads rows of `id, broker_cpa, broker_crg, affiliate_cpa, affiliate_crg,
//! margin, locks` and writes one result row per input row.

use anyhow::{Context, Result};
use clap::Parser;
use deal_calc::batch::{load_batch, solve_batch, write_outcomes, BatchStatus};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "solve_batch", about = "Solve a CSV of deal scenarios")]
struct Args {
    /// Input CSV
    input: PathBuf,

    /// Output CSV (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let records = load_batch(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let outcomes = solve_batch(&records);

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_outcomes(BufWriter::new(file), &outcomes)?;
            let solved = outcomes.iter().filter(|o| o.status == BatchStatus::Solved).count();
            eprintln!(
                "Solved {}/{} deals in {:?}, written to {}",
                solved,
                outcomes.len(),
                start.elapsed(),
                path.display()
            );
        }
        None => write_outcomes(io::stdout().lock(), &outcomes)?,
    }
    Ok(())
}
