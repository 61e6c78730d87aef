//! Scalar totals and grouped sums over normalized tables.

use std::collections::BTreeMap;

use crate::analyzers::types::ScalarTotal;
use crate::analyzers::utility::sum_cells;
use crate::error::AggregateError;
use crate::table::CategoryTable;

/// Sums every value in `columns`, treating missing cells as zero.
///
/// Every column must exist; the first absent one is reported.
pub fn column_total(table: &CategoryTable, columns: &[&str]) -> Result<f64, AggregateError> {
    let mut total = 0.0;
    for column in columns {
        total += sum_cells(table.column(column)?);
    }
    Ok(total)
}

/// [`column_total`] wrapped with a display label.
pub fn scalar_total(
    label: &str,
    table: &CategoryTable,
    columns: &[&str],
) -> Result<ScalarTotal, AggregateError> {
    Ok(ScalarTotal {
        label: label.to_string(),
        value: column_total(table, columns)?,
    })
}

/// Sums `value` per distinct `key`. Rows with a null key belong to no group.
pub fn group_sums(
    table: &CategoryTable,
    key: &str,
    value: &str,
) -> Result<BTreeMap<String, f64>, AggregateError> {
    let key_idx = table.require_column(key)?;
    let value_idx = table.require_column(value)?;

    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for row in table.rows() {
        let Some(group) = row[key_idx].as_text() else {
            continue;
        };
        *sums.entry(group.to_string()).or_default() += row[value_idx].as_f64().unwrap_or(0.0);
    }

    Ok(sums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::table::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn bio(rows: Vec<Vec<Cell>>) -> CategoryTable {
        CategoryTable::new(
            Category::Biometric,
            vec!["state".into(), "bio_age_5_17".into(), "bio_age_17_".into()],
            rows,
        )
    }

    #[test]
    fn test_missing_cells_count_as_zero() {
        let t = bio(vec![
            vec![text("GOA"), Cell::Null, Cell::Null],
            vec![text("GOA"), text("5"), Cell::Null],
        ]);
        assert_eq!(column_total(&t, &["bio_age_5_17"]).unwrap(), 5.0);
    }

    #[test]
    fn test_total_over_several_columns() {
        let t = bio(vec![
            vec![text("GOA"), text("1"), text("2")],
            vec![text("GOA"), text("3"), text("4")],
        ]);
        let total = scalar_total("Biometric Updates", &t, &["bio_age_5_17", "bio_age_17_"]).unwrap();
        assert_eq!(total.label(), "Biometric Updates");
        assert_eq!(total.value(), 10.0);
    }

    #[test]
    fn test_missing_column_is_usage_error() {
        let t = bio(vec![]);
        let err = column_total(&t, &["demo_age_17_"]).unwrap_err();
        assert_eq!(
            err,
            AggregateError::MissingColumn {
                category: Category::Biometric,
                column: "demo_age_17_".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_table_totals_zero() {
        let t = bio(vec![]);
        assert_eq!(column_total(&t, &["bio_age_5_17"]).unwrap(), 0.0);
    }

    #[test]
    fn test_group_sums() {
        let t = bio(vec![
            vec![text("GOA"), text("1"), Cell::Null],
            vec![text("ASSAM"), text("2"), Cell::Null],
            vec![text("GOA"), Cell::Null, Cell::Null],
            vec![Cell::Null, text("9"), Cell::Null],
            vec![text("GOA"), text("4"), Cell::Null],
        ]);
        let sums = group_sums(&t, "state", "bio_age_5_17").unwrap();

        assert_eq!(sums.len(), 2);
        assert_eq!(sums["GOA"], 5.0);
        assert_eq!(sums["ASSAM"], 2.0);
    }
}
