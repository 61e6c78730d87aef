use thiserror::Error;

use crate::category::Category;

/// Structural misuse of the aggregation engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("column '{column}' does not exist in the {category} table")]
    MissingColumn { category: Category, column: String },
}
