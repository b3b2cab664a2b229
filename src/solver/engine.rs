//! Closed-form deal solver
//!
//! With margin free the solver only derives margin. With margin locked it
//! recomputes one CPA or CRG so the locked margin holds:
//!
//! | broker side | affiliate side | solved field                         |
//! |-------------|----------------|--------------------------------------|
//! | pinned      | free           | one affiliate member                 |
//! | free        | pinned         | one broker member                    |
//! | free        | free           | one affiliate member (broker anchor) |
//! | pinned      | pinned         | nothing (rejected by the validator)  |

use crate::calc;
use crate::deal::{DealTerms, Field, Side};
use crate::locks::LockState;
use log::debug;

/// Solve a deal for the given locks
///
/// Callers are expected to run [`crate::locks::validate`] first. Any state is
/// still handled without panicking, and no output is ever NaN or infinite.
pub fn solve(terms: &DealTerms, locks: &LockState) -> DealTerms {
    solve_with_hint(terms, locks, None)
}

/// Solve a deal, keeping `last_edited` fixed when the side being solved
/// has no individually locked member
pub fn solve_with_hint(
    terms: &DealTerms,
    locks: &LockState,
    last_edited: Option<Field>,
) -> DealTerms {
    // Rounded up front so a solved tuple fed back in reproduces itself
    let mut solved = terms.sanitized().rounded();

    if locks.margin_locked() {
        let broker_pinned = locks.side_pinned(Side::Broker);
        let affiliate_pinned = locks.side_pinned(Side::Affiliate);

        match (broker_pinned, affiliate_pinned) {
            (true, false) | (false, false) => {
                let broker = solved.raw_effective(Side::Broker);
                let target = calc::affiliate_target(broker, solved.margin);
                solve_member(&mut solved, locks, Side::Affiliate, target, last_edited);
            }
            (false, true) => {
                let affiliate = solved.raw_effective(Side::Affiliate);
                let target = calc::broker_target(affiliate, solved.margin);
                solve_member(&mut solved, locks, Side::Broker, target, last_edited);
            }
            (true, true) => {
                debug!("both sides pinned with margin locked; nothing to solve");
            }
        }
    }

    let mut solved = solved.rounded();
    if !locks.margin_locked() {
        solved.margin = solved.implied_margin();
    }
    solved
}

/// Pick which member of `side` absorbs the change
///
/// A member locked on its own stays put. With neither locked, the member the
/// user last edited stays put, otherwise CPA is recomputed from CRG.
fn free_member(locks: &LockState, side: Side, last_edited: Option<Field>) -> Field {
    let cpa = side.cpa();
    let crg = side.crg();
    if locks.is_marked(cpa) {
        crg
    } else if locks.is_marked(crg) {
        cpa
    } else if last_edited == Some(cpa) {
        crg
    } else {
        cpa
    }
}

fn solve_member(
    terms: &mut DealTerms,
    locks: &LockState,
    side: Side,
    target: f64,
    last_edited: Option<Field>,
) {
    let field = free_member(locks, side, last_edited);
    let value = if field.is_cpa() {
        calc::cpa_for_target(target, terms.get(side.crg()))
    } else {
        calc::crg_for_target(target, terms.get(side.cpa()))
    };
    debug!(
        "margin locked at {:.2}: {} {:.4} -> {:.4} (target effective {:.4})",
        terms.margin,
        field,
        terms.get(field),
        value,
        target
    );
    terms.set(field, value);
}
