use serde::Serialize;

use crate::category::Category;

/// What the merger saw for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub files: usize,
    pub rows: usize,
    /// Rows kept after replacing invalid UTF-8 bytes.
    pub lossy_rows: usize,
}

/// Row-count deltas produced by normalizing one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub rows_in: usize,
    pub rows_out: usize,

    // exclusions
    pub dropped_numeric_state: usize,
    pub dropped_invalid_state: usize,

    // retained rows whose date became null
    pub unparseable_dates: usize,
}

impl NormalizeStats {
    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn dropped(&self) -> usize {
        self.dropped_numeric_state + self.dropped_invalid_state
    }

    pub fn dropped_pct(&self) -> f64 {
        Self::pct(self.dropped(), self.rows_in)
    }
}

/// Per-category diagnostics carried alongside the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDiagnostics {
    pub category: Category,
    pub merge: MergeStats,
    pub normalize: NormalizeStats,
}
