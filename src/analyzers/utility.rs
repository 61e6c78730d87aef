use std::cmp::Ordering;

use crate::table::Cell;

/// Sums the numeric view of `cells`; null and non-numeric cells add nothing.
pub fn sum_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> f64 {
    cells.into_iter().filter_map(Cell::as_f64).sum()
}

/// Descending order for ratios: `+inf` first, NaN after everything else.
pub fn cmp_ratio_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_cells_skips_missing() {
        let cells = [
            Cell::Null,
            Cell::Text("5".to_string()),
            Cell::Text("n/a".to_string()),
        ];
        assert_eq!(sum_cells(&cells), 5.0);
    }

    #[test]
    fn test_cmp_ratio_desc() {
        let mut v = vec![0.5, f64::NAN, 1.0, f64::INFINITY, 0.0];
        v.sort_by(|a, b| cmp_ratio_desc(*a, *b));
        assert_eq!(v[0], f64::INFINITY);
        assert_eq!(v[1], 1.0);
        assert_eq!(v[2], 0.5);
        assert_eq!(v[3], 0.0);
        assert!(v[4].is_nan());
    }
}
