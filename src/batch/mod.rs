//! Batch solving of deal scenarios from CSV
//!
//! Input columns: `id, broker_cpa, broker_crg, affiliate_cpa, affiliate_crg,
//! margin, locks`, where `locks` is a `|`-separated list of lock keys such as
//! `brokerTerms|margin`. Rows are independent and solved in parallel.

use crate::deal::{DealTerms, UnknownField};
use crate::locks::{LockFlag, LockState};
use crate::scenario::Scenario;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One input row. A blank or unparseable value cell reads as `None` and
/// counts as 0 when solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub broker_cpa: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub broker_crg: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub affiliate_cpa: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub affiliate_crg: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub margin: Option<f64>,
    #[serde(default)]
    pub locks: String,
}

impl BatchRecord {
    pub fn terms(&self) -> DealTerms {
        let value = |cell: Option<f64>| cell.unwrap_or(0.0);
        DealTerms::new(
            value(self.broker_cpa),
            value(self.broker_crg),
            value(self.affiliate_cpa),
            value(self.affiliate_crg),
            value(self.margin),
        )
    }

    /// Parse the lock column
    pub fn lock_state(&self) -> Result<LockState, UnknownField> {
        let flags = self
            .locks
            .split('|')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::parse::<LockFlag>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LockState::with_flags(flags))
    }
}

/// Result of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Solved,
    Conflict,
    Invalid,
}

/// One output row: solved values, or the input values with the reason the
/// row could not be solved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub id: String,
    pub status: BatchStatus,
    pub broker_cpa: f64,
    pub broker_crg: f64,
    pub affiliate_cpa: f64,
    pub affiliate_crg: f64,
    pub margin: f64,
    pub broker_effective: f64,
    pub affiliate_effective: f64,
    pub message: String,
}

impl BatchOutcome {
    fn new(id: &str, status: BatchStatus, terms: &DealTerms, message: String) -> Self {
        let summary = terms.summary();
        Self {
            id: id.to_string(),
            status,
            broker_cpa: summary.broker_cpa,
            broker_crg: summary.broker_crg,
            affiliate_cpa: summary.affiliate_cpa,
            affiliate_crg: summary.affiliate_crg,
            margin: summary.margin,
            broker_effective: summary.broker_effective,
            affiliate_effective: summary.affiliate_effective,
            message,
        }
    }
}

/// Validate and solve one row
pub fn solve_record(record: &BatchRecord) -> BatchOutcome {
    let terms = record.terms();
    let locks = match record.lock_state() {
        Ok(locks) => locks,
        Err(e) => {
            return BatchOutcome::new(&record.id, BatchStatus::Invalid, &terms, e.to_string())
        }
    };
    match Scenario::new(terms, locks).solve() {
        Ok(solved) => BatchOutcome::new(&record.id, BatchStatus::Solved, &solved, String::new()),
        Err(reason) => {
            BatchOutcome::new(&record.id, BatchStatus::Conflict, &terms, reason.to_string())
        }
    }
}

/// Solve every row in parallel, keeping input order
pub fn solve_batch(records: &[BatchRecord]) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = records.par_iter().map(solve_record).collect();

    let failed = outcomes.iter().filter(|o| o.status != BatchStatus::Solved).count();
    if failed > 0 {
        warn!("{} of {} rows could not be solved", failed, outcomes.len());
    }
    info!("solved {} rows", outcomes.len() - failed);
    outcomes
}

/// Load rows from a CSV file
pub fn load_batch<P: AsRef<Path>>(path: P) -> Result<Vec<BatchRecord>, BatchError> {
    let file = File::open(path)?;
    load_batch_from_reader(file)
}

/// Load rows from any CSV reader (header row required)
pub fn load_batch_from_reader<R: Read>(reader: R) -> Result<Vec<BatchRecord>, BatchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: BatchRecord = result?;
        records.push(record);
    }
    Ok(records)
}

/// Write outcomes as CSV with a header row
pub fn write_outcomes<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<(), BatchError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        wtr.serialize(outcome)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{Field, Side};

    const INPUT: &str = "\
id,broker_cpa,broker_crg,affiliate_cpa,affiliate_crg,margin,locks
forward,1200,10,960,10,0,
pinned,1200,10,1000,10,20,brokerTerms|margin
clash,1200,10,1000,10,20,brokerTerms|affiliateTerms
typo,1200,10,1000,10,20,brokerTerms|margn
";

    #[test]
    fn test_lock_column() {
        let records = load_batch_from_reader(INPUT.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].lock_state().unwrap(), LockState::default());
        assert_eq!(
            records[1].lock_state().unwrap(),
            LockState::with_flags([LockFlag::Terms(Side::Broker), Field::Margin.into()])
        );
        assert!(records[3].lock_state().is_err());
    }

    #[test]
    fn test_solve_batch() {
        let records = load_batch_from_reader(INPUT.as_bytes()).unwrap();
        let outcomes = solve_batch(&records);
        assert_eq!(outcomes.len(), 4);

        assert_eq!(outcomes[0].status, BatchStatus::Solved);
        assert_eq!(outcomes[0].margin, 20.0);

        assert_eq!(outcomes[1].status, BatchStatus::Solved);
        assert_eq!(outcomes[1].affiliate_cpa, 960.0);
        assert_eq!(outcomes[1].affiliate_effective, 96.0);

        assert_eq!(outcomes[2].status, BatchStatus::Conflict);
        assert_eq!(outcomes[2].affiliate_cpa, 1000.0);
        assert!(outcomes[2].message.contains("both Broker and Affiliate"));

        assert_eq!(outcomes[3].status, BatchStatus::Invalid);
        assert!(outcomes[3].message.contains("margn"));
    }

    #[test]
    fn test_write_outcomes() {
        let records = load_batch_from_reader(INPUT.as_bytes()).unwrap();
        let outcomes = solve_batch(&records[..2]);
        let mut buf = Vec::new();
        write_outcomes(&mut buf, &outcomes).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "id,status,broker_cpa,broker_crg,affiliate_cpa,affiliate_crg,margin,\
                 broker_effective,affiliate_effective,message"
            )
        );
        assert_eq!(lines.next(), Some("forward,solved,1200.0,10.0,960.0,10.0,20.0,120.0,96.0,"));
        assert_eq!(lines.next(), Some("pinned,solved,1200.0,10.0,960.0,10.0,20.0,120.0,96.0,"));
    }

    #[test]
    fn test_blank_cell_reads_as_zero() {
        let input = "\
id,broker_cpa,broker_crg,affiliate_cpa,affiliate_crg,margin,locks
good,1200,10,1000,10,20,
blank,1200,10,,10,20,brokerTerms|margin
";
        let records = load_batch_from_reader(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].affiliate_cpa, Some(1000.0));
        assert_eq!(records[1].affiliate_cpa, None);
        assert_eq!(records[1].terms().affiliate_cpa, 0.0);

        let outcomes = solve_batch(&records);
        assert_eq!(outcomes[0].status, BatchStatus::Solved);
        assert_eq!(outcomes[0].margin, 16.67);
        assert_eq!(outcomes[1].status, BatchStatus::Solved);
        assert_eq!(outcomes[1].affiliate_cpa, 960.0);
    }
}
