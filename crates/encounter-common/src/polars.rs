//! Reading loosely typed cells out of Polars DataFrames.
//!
//! The ingest reads every column as text, but callers may also hand in
//! frames built elsewhere with numeric columns. Every cell is reduced to
//! optional text before the transform looks at it.

use polars::prelude::{AnyValue, DataFrame};

/// Text of one cell, `None` for nulls and empty strings.
///
/// Whitespace-only text is kept as-is: a lone space is still an answer.
/// Integers print as-is and floats drop trailing zeros, so a rank stored as
/// `2.0` reads the same as one stored as `"2"`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use encounter_common::cell_text;
///
/// assert_eq!(cell_text(AnyValue::Null), None);
/// assert_eq!(cell_text(AnyValue::String("")), None);
/// assert_eq!(cell_text(AnyValue::Float64(2.0)).as_deref(), Some("2"));
/// ```
pub fn cell_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Shortest display form of a float: `150.0` → `150`, `24.50` → `24.5`.
pub fn format_numeric(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{v:.0}");
    }
    v.to_string()
}

/// Lenient float parse of a free-text answer.
///
/// Surrounding whitespace is ignored; blanks, `NaN` and anything with units
/// or words attached are `None`.
pub fn parse_f64(value: &str) -> Option<f64> {
    match value.trim() {
        "" => None,
        trimmed => trimmed.parse::<f64>().ok().filter(|v| !v.is_nan()),
    }
}

/// Every cell of `name` as optional text, in row order.
///
/// Returns `None` when the column does not exist.
pub fn column_text_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    let values = (0..df.height())
        .map(|idx| column.get(idx).ok().and_then(cell_text))
        .collect();
    Some(values)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    use super::*;

    #[test]
    fn test_cell_text_empty_and_null() {
        assert_eq!(cell_text(AnyValue::Null), None);
        assert_eq!(cell_text(AnyValue::String("")), None);
    }

    #[test]
    fn test_cell_text_keeps_whitespace_only() {
        assert_eq!(cell_text(AnyValue::String(" ")).as_deref(), Some(" "));
    }

    #[test]
    fn test_cell_text_keeps_surrounding_whitespace() {
        assert_eq!(
            cell_text(AnyValue::String(" Female ")).as_deref(),
            Some(" Female ")
        );
    }

    #[test]
    fn test_cell_text_numbers() {
        assert_eq!(cell_text(AnyValue::Int64(-3)).as_deref(), Some("-3"));
        assert_eq!(cell_text(AnyValue::UInt32(7)).as_deref(), Some("7"));
        assert_eq!(cell_text(AnyValue::Float64(27.5)).as_deref(), Some("27.5"));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(150.0), "150");
        assert_eq!(format_numeric(24.5), "24.5");
        assert_eq!(format_numeric(-4.0), "-4");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("  27.4  "), Some(27.4));
        assert_eq!(parse_f64("-12"), Some(-12.0));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("150 lbs"), None);
    }

    #[test]
    fn test_column_text_values() {
        let column: Column =
            Series::new("q".into(), vec![Some("a"), None, Some(" ")]).into_column();
        let df = DataFrame::new(vec![column]).unwrap();
        assert_eq!(
            column_text_values(&df, "q"),
            Some(vec![Some("a".to_string()), None, Some(" ".to_string())])
        );
        assert_eq!(column_text_values(&df, "missing"), None);
    }
}
