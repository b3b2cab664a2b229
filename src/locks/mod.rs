//! Lock state, its transitions and the solvability check
//!
//! The transition functions here are the only way callers should move
//! between lock states: each one builds the candidate state and returns it
//! only if it passes [`validate`].

mod state;
mod validator;

pub use state::{LockFlag, LockState};
pub use validator::{validate, ConflictReason};

use crate::deal::Field;
use log::warn;

/// Flip one flag, refusing the change if the result is unsolvable
pub fn toggle_lock(state: &LockState, flag: LockFlag) -> Result<LockState, ConflictReason> {
    let next = state.toggled(flag);
    validate(&next).map_err(|reason| {
        warn!("lock toggle {} rejected: {}", flag, reason.code());
        reason
    })?;
    Ok(next)
}

/// Lock everything except `keep`; refused wholesale on conflict
pub fn solo_lock(keep: Field) -> Result<LockState, ConflictReason> {
    let next = LockState::solo(keep);
    validate(&next).map_err(|reason| {
        warn!("solo lock on {} rejected: {}", keep, reason.code());
        reason
    })?;
    Ok(next)
}

/// Unlock everything. A fully free deal is always solvable.
pub fn clear_all() -> LockState {
    LockState::cleared()
}
