//! JSON scenario files
//!
//! A scenario is a deal plus the locks to solve it under. Every key is
//! optional: missing values fall back to the default deal and missing locks
//! to unlocked.
//!
//! ```json
//! {
//!   "terms": { "brokerCPA": 1200, "brokerCRG": 10, "affiliateCRG": 10, "margin": 20 },
//!   "locks": { "brokerTerms": true, "margin": true },
//!   "lastEdited": "affiliateCRG"
//! }
//! ```

use crate::deal::{DealTerms, Field};
use crate::locks::{validate, ConflictReason, LockState};
use crate::solver::solve_with_hint;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors loading a scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to open scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A deal with its lock state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub terms: DealTerms,

    #[serde(default)]
    pub locks: LockState,

    /// Field the user changed last, used to pick which member to solve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<Field>,
}

impl Scenario {
    pub fn new(terms: DealTerms, locks: LockState) -> Self {
        Self { terms, locks, last_edited: None }
    }

    /// Validate the locks and solve the deal
    pub fn solve(&self) -> Result<DealTerms, ConflictReason> {
        validate(&self.locks)?;
        Ok(solve_with_hint(&self.terms, &self.locks, self.last_edited))
    }
}

/// Load a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioError> {
    let file = File::open(path)?;
    load_scenario_from_reader(BufReader::new(file))
}

/// Load a scenario from any JSON reader
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<Scenario, ScenarioError> {
    Ok(serde_json::from_reader(reader)?)
}
