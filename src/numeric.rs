//! Lenient numeric coercion and missing-aware means.
//!
//! Every average in the report flows through [`coerce`] and [`mean`]: cells
//! that fail to parse become missing rather than errors, and means are
//! computed over the present values only. A column with zero numeric values
//! yields an undefined mean (`None`), never `0.0`.

/// Coerces a raw cell to `f64`. Absent, empty, and non-numeric values all
/// map to `None`.
pub fn coerce(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Mean over the present values of an already-coerced sequence.
pub fn mean(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.into_iter().flatten() {
        sum += value;
        count += 1;
    }
    if count > 0 { Some(sum / count as f64) } else { None }
}

/// Formats an average for display and export: two decimal places, or an
/// empty cell when the mean is undefined.
pub fn format_average(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_parses_integers_and_floats() {
        assert_eq!(coerce(Some("4")), Some(4.0));
        assert_eq!(coerce(Some(" 3.5 ")), Some(3.5));
        assert_eq!(coerce(Some("-1")), Some(-1.0));
    }

    #[test]
    fn coerce_maps_non_numeric_to_missing() {
        assert_eq!(coerce(Some("Excellent")), None);
        assert_eq!(coerce(Some("")), None);
        assert_eq!(coerce(Some("   ")), None);
        assert_eq!(coerce(Some("NaN")), None);
        assert_eq!(coerce(None), None);
    }

    #[test]
    fn mean_skips_missing_values() {
        let values = [Some(3.0), None, Some(4.0), Some(5.0), None];
        assert_eq!(mean(values), Some(4.0));
    }

    #[test]
    fn mean_of_no_numeric_values_is_undefined() {
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(std::iter::empty::<Option<f64>>()), None);
    }

    #[test]
    fn format_average_rounds_to_two_places() {
        assert_eq!(format_average(Some(1.5)), "1.50");
        assert_eq!(format_average(Some(4.666_666)), "4.67");
        assert_eq!(format_average(None), "");
    }
}
