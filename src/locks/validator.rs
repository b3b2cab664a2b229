//! Solvability check for lock states
//!
//! One decision table gates both lock toggles and solves. Rules run in
//! priority order and the first match wins:
//!
//! 1. both group flags set                  -> `BothSidesLocked`
//! 2. both sides pinned and margin locked   -> `AllThreeLocked`
//! 3. five primary fields locked one by one -> `TooManyLocked`
//!
//! Both sides pinned with margin free passes: margin is derived directly.

use super::{LockFlag, LockState};
use crate::deal::{Field, Side};
use thiserror::Error;

/// Why a lock state cannot be solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictReason {
    #[error("Cannot lock both Broker and Affiliate terms at the same time.")]
    BothSidesLocked,

    #[error("Cannot solve. All three sides (Broker, Affiliate, Margin) are locked.")]
    AllThreeLocked,

    #[error("Too many variables are locked. At least one must be dynamic.")]
    TooManyLocked,
}

impl ConflictReason {
    /// Stable identifier for logs and machine-readable output
    pub fn code(self) -> &'static str {
        match self {
            ConflictReason::BothSidesLocked => "both_sides_locked",
            ConflictReason::AllThreeLocked => "all_three_locked",
            ConflictReason::TooManyLocked => "too_many_locked",
        }
    }
}

type Rule = fn(&LockState) -> Option<ConflictReason>;

const RULES: [Rule; 3] = [both_groups_rule, all_three_rule, too_many_rule];

fn both_groups_rule(state: &LockState) -> Option<ConflictReason> {
    let both = Side::ALL.iter().all(|side| state.flag(LockFlag::Terms(*side)));
    both.then_some(ConflictReason::BothSidesLocked)
}

fn all_three_rule(state: &LockState) -> Option<ConflictReason> {
    let both_pinned = Side::ALL.iter().all(|side| state.side_pinned(*side));
    (both_pinned && state.margin_locked()).then_some(ConflictReason::AllThreeLocked)
}

// Any state this matches is already caught by `all_three_rule`.
fn too_many_rule(state: &LockState) -> Option<ConflictReason> {
    (state.marked_count() >= Field::ALL.len()).then_some(ConflictReason::TooManyLocked)
}

/// Check that a lock state leaves the deal solvable
pub fn validate(state: &LockState) -> Result<(), ConflictReason> {
    match RULES.iter().find_map(|rule| rule(state)) {
        Some(reason) => Err(reason),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(side: Side) -> LockFlag {
        LockFlag::Terms(side)
    }

    #[test]
    fn test_nothing_locked_is_solvable() {
        assert_eq!(validate(&LockState::default()), Ok(()));
    }

    #[test]
    fn test_both_groups_rejected() {
        let state = LockState::with_flags([terms(Side::Broker), terms(Side::Affiliate)]);
        assert_eq!(validate(&state), Err(ConflictReason::BothSidesLocked));

        // Group rule outranks the three-way rule
        let state = LockState::with_flags([
            terms(Side::Broker),
            terms(Side::Affiliate),
            Field::Margin.into(),
        ]);
        assert_eq!(validate(&state), Err(ConflictReason::BothSidesLocked));
    }

    #[test]
    fn test_all_three_rejected() {
        let state = LockState::with_flags([
            terms(Side::Broker),
            Field::AffiliateCpa.into(),
            Field::AffiliateCrg.into(),
            Field::Margin.into(),
        ]);
        assert_eq!(validate(&state), Err(ConflictReason::AllThreeLocked));

        let state = LockState::with_flags(Field::ALL);
        assert_eq!(validate(&state), Err(ConflictReason::AllThreeLocked));
    }

    #[test]
    fn test_both_sides_pinned_margin_free_is_solvable() {
        let state = LockState::with_flags([
            Field::BrokerCpa,
            Field::BrokerCrg,
            Field::AffiliateCpa,
            Field::AffiliateCrg,
        ]);
        assert_eq!(validate(&state), Ok(()));

        let state = LockState::with_flags([
            terms(Side::Broker),
            Field::AffiliateCpa.into(),
            Field::AffiliateCrg.into(),
        ]);
        assert_eq!(validate(&state), Ok(()));
    }

    #[test]
    fn test_one_side_and_margin_is_solvable() {
        let state = LockState::with_flags([
            terms(Side::Broker),
            Field::Margin.into(),
            Field::AffiliateCrg.into(),
        ]);
        assert_eq!(validate(&state), Ok(()));
    }

    #[test]
    fn test_every_solo_state_is_solvable() {
        for keep in Field::ALL {
            assert_eq!(validate(&LockState::solo(keep)), Ok(()), "solo {keep}");
        }
    }

    #[test]
    fn test_too_many_rule_counts_members_only() {
        assert_eq!(
            too_many_rule(&LockState::with_flags(Field::ALL)),
            Some(ConflictReason::TooManyLocked)
        );
        assert_eq!(too_many_rule(&LockState::solo(Field::Margin)), None);
        let groups_only = LockState::with_flags([
            terms(Side::Broker),
            terms(Side::Affiliate),
            Field::Margin.into(),
        ]);
        assert_eq!(too_many_rule(&groups_only), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ConflictReason::TooManyLocked.to_string(),
            "Too many variables are locked. At least one must be dynamic."
        );
        assert_eq!(ConflictReason::AllThreeLocked.code(), "all_three_locked");
    }
}
