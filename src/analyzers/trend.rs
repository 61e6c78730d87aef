//! Calendar-month resampling of a date-indexed column.

use std::collections::BTreeMap;

use crate::analyzers::types::{MonthPeriod, PeriodSum, ResampledSeries};
use crate::error::AggregateError;
use crate::table::CategoryTable;

/// Sums `value` per calendar month of `date_column`.
///
/// The series covers every month from the earliest to the latest dated row;
/// months without rows appear with a zero sum. Rows whose date is null are
/// left out entirely.
pub fn resample_monthly(
    table: &CategoryTable,
    date_column: &str,
    value: &str,
) -> Result<ResampledSeries, AggregateError> {
    let date_idx = table.require_column(date_column)?;
    let value_idx = table.require_column(value)?;

    let mut by_month: BTreeMap<MonthPeriod, f64> = BTreeMap::new();
    for row in table.rows() {
        let Some(date) = row[date_idx].as_date() else {
            continue;
        };
        *by_month.entry(MonthPeriod::of(date)).or_default() +=
            row[value_idx].as_f64().unwrap_or(0.0);
    }

    let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back()) else {
        return Ok(ResampledSeries::default());
    };

    let mut points = Vec::new();
    let mut period = first;
    while period <= last {
        points.push(PeriodSum {
            period,
            sum: by_month.get(&period).copied().unwrap_or(0.0),
        });
        period = period.succ();
    }

    Ok(ResampledSeries { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::table::Cell;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Cell {
        Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn demo(rows: Vec<Vec<Cell>>) -> CategoryTable {
        CategoryTable::new(
            Category::Demographic,
            vec!["date".to_string(), "demo_age_17_".into()],
            rows,
        )
    }

    fn series(s: &ResampledSeries) -> Vec<(String, f64)> {
        s.points()
            .iter()
            .map(|p| (p.period().to_string(), p.sum()))
            .collect()
    }

    #[test]
    fn test_sums_by_month() {
        let t = demo(vec![
            vec![date(2025, 1, 3), text("3")],
            vec![date(2025, 1, 28), text("4")],
        ]);
        let s = resample_monthly(&t, "date", "demo_age_17_").unwrap();
        assert_eq!(series(&s), vec![("2025-01".to_string(), 7.0)]);
    }

    #[test]
    fn test_month_with_only_missing_values_sums_to_zero() {
        let t = demo(vec![
            vec![date(2025, 1, 2), text("3")],
            vec![date(2025, 1, 9), text("4")],
            vec![date(2025, 2, 14), Cell::Null],
        ]);
        let s = resample_monthly(&t, "date", "demo_age_17_").unwrap();
        assert_eq!(
            series(&s),
            vec![("2025-01".to_string(), 7.0), ("2025-02".to_string(), 0.0)]
        );
    }

    #[test]
    fn test_gap_months_filled_with_zero() {
        let t = demo(vec![
            vec![date(2024, 11, 3), text("3")],
            vec![date(2025, 2, 1), text("1")],
            vec![date(2024, 11, 30), text("4")],
        ]);
        let s = resample_monthly(&t, "date", "demo_age_17_").unwrap();
        assert_eq!(
            series(&s),
            vec![
                ("2024-11".to_string(), 7.0),
                ("2024-12".to_string(), 0.0),
                ("2025-01".to_string(), 0.0),
                ("2025-02".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn test_null_dates_excluded_and_missing_values_zero() {
        let t = demo(vec![
            vec![Cell::Null, text("100")],
            vec![date(2025, 3, 1), Cell::Null],
            vec![date(2025, 3, 2), text("2")],
        ]);
        let s = resample_monthly(&t, "date", "demo_age_17_").unwrap();
        assert_eq!(series(&s), vec![("2025-03".to_string(), 2.0)]);
    }

    #[test]
    fn test_no_dated_rows_is_empty() {
        let t = demo(vec![vec![Cell::Null, text("1")]]);
        assert!(resample_monthly(&t, "date", "demo_age_17_").unwrap().is_empty());
    }

    #[test]
    fn test_missing_date_column() {
        let t = CategoryTable::new(
            Category::Enrolment,
            vec!["state".to_string(), "age_0_5".into()],
            vec![],
        );
        assert!(resample_monthly(&t, "date", "age_0_5").is_err());
    }
}
