//! Stateful calculator session
//!
//! Holds what an interactive front end needs between user actions: the last
//! confirmed deal, the editable inputs, the lock state and the last conflict.
//! A solve replaces both the confirmed values and the inputs, so the solver
//! output becomes the next solver input.

use super::solve_with_hint;
use crate::deal::{DealTerms, Field};
use crate::locks::{self, ConflictReason, LockFlag, LockState};
use log::{debug, warn};

#[derive(Debug, Clone)]
pub struct DealCalculator {
    confirmed: DealTerms,
    inputs: DealTerms,
    locks: LockState,
    conflict: Option<ConflictReason>,
    last_edited: Option<Field>,
}

impl Default for DealCalculator {
    fn default() -> Self {
        Self::new(DealTerms::default())
    }
}

impl DealCalculator {
    /// Start a session with nothing locked; `initial` is solved once so the
    /// confirmed values are consistent from the start
    pub fn new(initial: DealTerms) -> Self {
        Self::with_locks(initial, LockState::default())
    }

    /// Start a session from a saved lock state
    ///
    /// An unsolvable lock state is kept but recorded as the current conflict,
    /// and the initial values are left unsolved.
    pub fn with_locks(initial: DealTerms, locks: LockState) -> Self {
        let mut calculator = Self {
            confirmed: initial,
            inputs: initial,
            locks,
            conflict: None,
            last_edited: None,
        };
        if let Err(reason) = calculator.calculate() {
            debug!("initial values left unsolved: {}", reason);
        }
        calculator
    }

    pub fn confirmed(&self) -> &DealTerms {
        &self.confirmed
    }

    pub fn inputs(&self) -> &DealTerms {
        &self.inputs
    }

    pub fn locks(&self) -> &LockState {
        &self.locks
    }

    /// Reason the last lock change or solve was refused, if it was
    pub fn conflict(&self) -> Option<ConflictReason> {
        self.conflict
    }

    pub fn last_edited(&self) -> Option<Field> {
        self.last_edited
    }

    /// Edit one input. Locked fields are read-only and the edit is ignored.
    ///
    /// Returns whether the edit was applied.
    pub fn set_input(&mut self, field: Field, value: f64) -> bool {
        if self.locks.is_locked(field) {
            debug!("ignoring edit of locked field {}", field);
            return false;
        }
        self.inputs.set(field, value);
        self.last_edited = Some(field);
        true
    }

    /// Toggle one lock; on conflict the previous state stays in place
    pub fn toggle_lock(&mut self, flag: LockFlag) -> Result<(), ConflictReason> {
        let result = locks::toggle_lock(&self.locks, flag);
        self.apply_locks(result)
    }

    /// Lock every field except `keep`
    pub fn solo_lock(&mut self, keep: Field) -> Result<(), ConflictReason> {
        let result = locks::solo_lock(keep);
        self.apply_locks(result)
    }

    pub fn clear_locks(&mut self) {
        self.locks = locks::clear_all();
        self.conflict = None;
    }

    fn apply_locks(
        &mut self,
        result: Result<LockState, ConflictReason>,
    ) -> Result<(), ConflictReason> {
        match result {
            Ok(next) => {
                self.locks = next;
                self.conflict = None;
                Ok(())
            }
            Err(reason) => {
                self.conflict = Some(reason);
                Err(reason)
            }
        }
    }

    /// Validate the current locks and solve the inputs
    ///
    /// On success the solved deal becomes both the confirmed values and the
    /// new inputs. On conflict nothing but the recorded conflict changes.
    pub fn calculate(&mut self) -> Result<&DealTerms, ConflictReason> {
        if let Err(reason) = locks::validate(&self.locks) {
            warn!("calculation refused ({}): {}", self.locks, reason);
            self.conflict = Some(reason);
            return Err(reason);
        }
        let solved = solve_with_hint(&self.inputs, &self.locks, self.last_edited);
        self.confirmed = solved;
        self.inputs = solved;
        self.conflict = None;
        Ok(&self.confirmed)
    }
}
