//! Deal solver and calculator session

mod engine;
mod calculator;

pub use engine::{solve, solve_with_hint};
pub use calculator::DealCalculator;
