//! Canonicalization of the `date`, `district` and `state` columns.
//!
//! Each row is normalized on its own, so the output never depends on row
//! position or on other rows. Only the columns present in a table are touched.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::category::{COL_DATE, COL_DISTRICT, COL_STATE};
use crate::geography::Geography;
use crate::parser::parse_date;
use crate::stats::NormalizeStats;
use crate::table::{Cell, CategoryTable};

static NUMERIC_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("static regex"));

/// Positions of the canonicalized columns within a table's schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnLayout {
    pub date: Option<usize>,
    pub district: Option<usize>,
    pub state: Option<usize>,
}

impl ColumnLayout {
    pub fn of(table: &CategoryTable) -> Self {
        Self {
            date: table.column_index(COL_DATE),
            district: table.column_index(COL_DISTRICT),
            state: table.column_index(COL_STATE),
        }
    }
}

/// Result of normalizing one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Keep(Vec<Cell>),
    /// State was digits only, e.g. a spreadsheet export artifact.
    NumericState,
    /// State is null or not in the valid set after alias resolution.
    InvalidState,
}

/// Parses a date cell. Already-parsed dates are kept; anything else that
/// does not match becomes null.
pub fn canonical_date(cell: &Cell) -> Cell {
    match cell {
        Cell::Date(d) => Cell::Date(*d),
        Cell::Text(s) => parse_date(s).map(Cell::Date).unwrap_or(Cell::Null),
        Cell::Null => Cell::Null,
    }
}

/// Trims and upper-cases free text. Null stays null.
pub fn canonical_text(cell: &Cell) -> Cell {
    match cell {
        Cell::Null => Cell::Null,
        other => Cell::Text(other.render().trim().to_uppercase()),
    }
}

pub fn normalize_row(row: &[Cell], layout: ColumnLayout, geo: &Geography) -> RowOutcome {
    let mut out = row.to_vec();

    if let Some(i) = layout.date {
        out[i] = canonical_date(&row[i]);
    }

    if let Some(i) = layout.district {
        out[i] = canonical_text(&row[i]);
    }

    if let Some(i) = layout.state {
        let Cell::Text(cleaned) = canonical_text(&row[i]) else {
            return RowOutcome::InvalidState;
        };
        let state = geo.resolve(&cleaned);

        if NUMERIC_ONLY.is_match(state) {
            return RowOutcome::NumericState;
        }
        if !geo.is_valid(state) {
            return RowOutcome::InvalidState;
        }
        out[i] = Cell::Text(state.to_string());
    }

    RowOutcome::Keep(out)
}

/// Derives a normalized table from `table`, dropping rows whose state does
/// not resolve to a valid region. The input is left untouched.
pub fn normalize_table(table: &CategoryTable, geo: &Geography) -> (CategoryTable, NormalizeStats) {
    let layout = ColumnLayout::of(table);
    debug!(category = %table.category(), ?layout, "Normalizing table");

    let mut stats = NormalizeStats {
        rows_in: table.len(),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(table.len());

    for row in table.rows() {
        match normalize_row(row, layout, geo) {
            RowOutcome::Keep(out) => {
                if layout.date.is_some_and(|i| out[i].is_null()) {
                    stats.unparseable_dates += 1;
                }
                rows.push(out);
            }
            RowOutcome::NumericState => stats.dropped_numeric_state += 1,
            RowOutcome::InvalidState => stats.dropped_invalid_state += 1,
        }
    }
    stats.rows_out = rows.len();

    info!(
        category = %table.category(),
        rows_in = stats.rows_in,
        rows_out = stats.rows_out,
        dropped_numeric_state = stats.dropped_numeric_state,
        dropped_invalid_state = stats.dropped_invalid_state,
        unparseable_dates = stats.unparseable_dates,
        "Normalized category"
    );

    (table.with_rows(rows), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use chrono::NaiveDate;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn table(rows: Vec<Vec<Cell>>) -> CategoryTable {
        CategoryTable::new(
            Category::Biometric,
            vec![
                "date".into(),
                "state".into(),
                "district".into(),
                "bio_age_5_17".into(),
            ],
            rows,
        )
    }

    #[test]
    fn test_alias_resolution() {
        let t = table(vec![vec![text("01-03-2025"), text(" orissa "), text("khurda"), text("2")]]);
        let (out, stats) = normalize_table(&t, &Geography::india());

        assert_eq!(stats.rows_out, 1);
        assert_eq!(out.rows()[0][1], text("ODISHA"));
        assert_eq!(out.rows()[0][2], text("KHURDA"));
        assert_eq!(
            out.rows()[0][0],
            Cell::Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_numeric_state_dropped() {
        let t = table(vec![vec![text("01-03-2025"), text("12345"), text("x"), text("1")]]);
        let (out, stats) = normalize_table(&t, &Geography::india());

        assert!(out.is_empty());
        assert_eq!(stats.dropped_numeric_state, 1);
        assert_eq!(stats.dropped_invalid_state, 0);
    }

    #[test]
    fn test_invalid_and_null_state_dropped() {
        let t = table(vec![
            vec![text("01-03-2025"), text("ATLANTIS"), text("x"), text("1")],
            vec![text("01-03-2025"), Cell::Null, text("x"), text("1")],
            vec![text("01-03-2025"), text("Daman & Diu"), text("x"), text("1")],
        ]);
        let (out, stats) = normalize_table(&t, &Geography::india());

        assert!(out.is_empty());
        assert_eq!(stats.dropped_invalid_state, 3);
    }

    #[test]
    fn test_unparseable_date_kept_as_null() {
        let t = table(vec![vec![text("2025/03/01"), text("GOA"), Cell::Null, text("1")]]);
        let (out, stats) = normalize_table(&t, &Geography::india());

        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0][0], Cell::Null);
        assert_eq!(out.rows()[0][2], Cell::Null);
        assert_eq!(stats.unparseable_dates, 1);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let t = table(vec![
            vec![text("05-01-2025"), text("west  bengal"), text(" kolkata"), text("3")],
            vec![text("bad"), text("Uttaranchal"), Cell::Null, Cell::Null],
            vec![text("05-01-2025"), text("99"), text("x"), text("3")],
        ]);
        let geo = Geography::india();
        let (once, _) = normalize_table(&t, &geo);
        let (twice, stats) = normalize_table(&once, &geo);

        assert_eq!(once, twice);
        assert_eq!(stats.dropped(), 0);
    }

    #[test]
    fn test_table_without_date_or_district() {
        let t = CategoryTable::new(
            Category::Enrolment,
            vec!["state".into(), "age_0_5".into()],
            vec![vec![text("kerala"), text("7")]],
        );
        let (out, stats) = normalize_table(&t, &Geography::india());

        assert_eq!(out.rows()[0], vec![text("KERALA"), text("7")]);
        assert_eq!(stats.unparseable_dates, 0);
    }

    #[test]
    fn test_substitute_taxonomy() {
        let geo = Geography::new(
            [("ATLANTIS".to_string(), "POSEIDONIA".to_string())],
            ["POSEIDONIA".to_string()],
        );
        let t = table(vec![vec![text("01-01-2025"), text("atlantis"), text("x"), text("1")]]);
        let (out, _) = normalize_table(&t, &geo);

        assert_eq!(out.rows()[0][1], text("POSEIDONIA"));
    }
}
