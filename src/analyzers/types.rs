//! Result types produced by the aggregation engine.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::stats::CategoryDiagnostics;

/// One summed magnitude, labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarTotal {
    pub(crate) label: String,
    pub(crate) value: f64,
}

impl ScalarTotal {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A group key with the ratio of its two grouped sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioEntry {
    pub(crate) key: String,
    #[serde(serialize_with = "serialize_ratio")]
    pub(crate) ratio: f64,
}

/// JSON has no infinity or NaN, so non-finite ratios are written as the
/// strings `"inf"`, `"-inf"` and `"NaN"` instead of collapsing to `null`.
fn serialize_ratio<S: Serializer>(ratio: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match *ratio {
        r if r.is_nan() => serializer.serialize_str("NaN"),
        r if r.is_infinite() && r > 0.0 => serializer.serialize_str("inf"),
        r if r.is_infinite() => serializer.serialize_str("-inf"),
        r => serializer.serialize_f64(r),
    }
}

impl RatioEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// May be infinite (zero denominator) or NaN (zero over zero).
    pub fn ratio(&self) -> f64 {
        self.ratio
    }
}

/// Ratio entries sorted by ratio descending, key ascending on ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedRatio {
    pub(crate) entries: Vec<RatioEntry>,
}

impl RankedRatio {
    pub fn entries(&self) -> &[RatioEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first `k` entries of the ranking.
    pub fn top(&self, k: usize) -> RankedRatio {
        RankedRatio {
            entries: self.entries.iter().take(k).cloned().collect(),
        }
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSum {
    pub(crate) period: MonthPeriod,
    pub(crate) sum: f64,
}

impl PeriodSum {
    pub fn period(&self) -> MonthPeriod {
        self.period
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }
}

/// Contiguous monthly sums from the earliest to the latest observed month.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResampledSeries {
    pub(crate) points: Vec<PeriodSum>,
}

impl ResampledSeries {
    pub fn points(&self) -> &[PeriodSum] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Everything handed to report rendering.
///
/// A computation that failed is `None` and its message is in `errors`.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) update_totals: Option<Vec<ScalarTotal>>,
    pub(crate) child_compliance: Option<RankedRatio>,
    pub(crate) adult_trend: Option<ResampledSeries>,
    pub(crate) diagnostics: Vec<CategoryDiagnostics>,
    pub(crate) errors: Vec<String>,
}

impl PipelineReport {
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn update_totals(&self) -> Option<&[ScalarTotal]> {
        self.update_totals.as_deref()
    }

    pub fn child_compliance(&self) -> Option<&RankedRatio> {
        self.child_compliance.as_ref()
    }

    pub fn adult_trend(&self) -> Option<&ResampledSeries> {
        self.adult_trend.as_ref()
    }

    pub fn diagnostics(&self) -> &[CategoryDiagnostics] {
        &self.diagnostics
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_succ_wraps_year() {
        let dec = MonthPeriod {
            year: 2024,
            month: 12,
        };
        assert_eq!(
            dec.succ(),
            MonthPeriod {
                year: 2025,
                month: 1
            }
        );
    }

    #[test]
    fn test_month_display_and_json() {
        let p = MonthPeriod { year: 2025, month: 3 };
        assert_eq!(p.to_string(), "2025-03");
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"2025-03\"");
    }

    #[test]
    fn test_non_finite_ratio_json() {
        let entry = |ratio| RatioEntry {
            key: "C".to_string(),
            ratio,
        };
        assert_eq!(
            serde_json::to_string(&entry(f64::INFINITY)).unwrap(),
            r#"{"key":"C","ratio":"inf"}"#
        );
        assert_eq!(
            serde_json::to_string(&entry(f64::NAN)).unwrap(),
            r#"{"key":"C","ratio":"NaN"}"#
        );
        assert_eq!(
            serde_json::to_string(&entry(0.5)).unwrap(),
            r#"{"key":"C","ratio":0.5}"#
        );
    }

    #[test]
    fn test_top_truncates() {
        let ranked = RankedRatio {
            entries: (0..5)
                .map(|i| RatioEntry {
                    key: i.to_string(),
                    ratio: i as f64,
                })
                .collect(),
        };
        assert_eq!(ranked.top(2).len(), 2);
        assert_eq!(ranked.top(10).len(), 5);
    }
}
