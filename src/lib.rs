//! Broker/affiliate deal calculator
//!
//! Keeps two CPA values, two CRG percentages and the margin between them
//! consistent while any subset of them is locked by the user.
//!
//! ```
//! use deal_calc::{solve, validate, DealTerms, Field, LockFlag, LockState, Side};
//!
//! let terms = DealTerms::new(1200.0, 10.0, 1000.0, 10.0, 20.0);
//! let locks = LockState::with_flags([LockFlag::Terms(Side::Broker), Field::Margin.into()]);
//! validate(&locks).unwrap();
//!
//! let solved = solve(&terms, &locks);
//! assert_eq!(solved.affiliate_cpa, 960.0);
//! assert_eq!(solved.affiliate_effective(), 96.0);
//! ```

pub mod calc;
pub mod deal;
pub mod locks;
pub mod solver;
pub mod scenario;
pub mod batch;

pub use deal::{DealSummary, DealTerms, Field, Side};
pub use locks::{validate, ConflictReason, LockFlag, LockState};
pub use scenario::{load_scenario, Scenario};
pub use solver::{solve, solve_with_hint, DealCalculator};
