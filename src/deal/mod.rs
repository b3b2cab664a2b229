//! Deal values: fields, sides and the value tuple

mod field;
mod terms;

pub use field::{Field, Side, UnknownField};
pub use terms::{DealSummary, DealTerms};
