//! Aggregation over normalized category tables.
//!
//! Three independent reductions (scalar totals, grouped ratio ranking and
//! monthly resampling) plus the report assembly that runs them together.

pub mod aggregate;
pub mod analyzer;
pub mod ratio;
pub mod trend;
pub mod types;
pub mod utility;
