//! Cell-level parsing for raw CSV text.

use chrono::NaiveDate;

use crate::table::Cell;

/// Day-month-year format used by every category's `date` column.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Converts a raw CSV field into a cell. Empty fields are null.
pub fn parse_raw_cell(raw: &str) -> Cell {
    if raw.trim().is_empty() {
        Cell::Null
    } else {
        Cell::Text(raw.to_string())
    }
}

/// Parses a `DD-MM-YYYY` date. Returns `None` for anything that does not match.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parses a numeric cell, returning `None` for text that is not a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
