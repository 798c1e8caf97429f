//! Best-effort conversion of abbreviated counters (`"12.3K"`, `"4M"`) to
//! integers for ranking.
//!
//! Only used to order videos for display. Stored values are never rewritten,
//! and nothing here should feed precise arithmetic: every parse failure
//! collapses to `0`. Like the rest of the parsing helpers this scans
//! characters by hand rather than pulling in `regex`.

use vidtrack_core::MetricValue;

/// Parses a human-formatted magnitude string into an integer.
///
/// - `None`, empty or whitespace-only input → `0`.
/// - A trailing `K`/`M`/`B` (any case) multiplies the remainder, which is
///   reduced to digits and `.` and parsed as a float, then truncated.
/// - Without a suffix, every non-digit is dropped and the rest parsed as an
///   integer.
/// - Anything unparseable → `0`.
#[must_use]
pub fn parse_metric(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };

    if let Some((number, multiplier)) = split_magnitude(raw) {
        let cleaned: String = number
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        return cleaned
            .parse::<f64>()
            .map_or(0, |value| truncate(value * multiplier));
    }

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().unwrap_or(0)
}

/// Ranking value of a stored metric: strings go through [`parse_metric`],
/// JSON numbers are truncated, anything else ranks as `0`.
#[must_use]
pub fn rank_value(value: &MetricValue) -> u64 {
    match value {
        MetricValue::Text(s) => parse_metric(Some(s.as_str())),
        MetricValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or(0),
        MetricValue::Other(_) => 0,
    }
}

fn split_magnitude(raw: &str) -> Option<(&str, f64)> {
    let last = raw.chars().last()?;
    let multiplier = match last.to_ascii_uppercase() {
        'K' => 1_000.0,
        'M' => 1_000_000.0,
        'B' => 1_000_000_000.0,
        _ => return None,
    };
    Some((&raw[..raw.len() - last.len_utf8()], multiplier))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate(value: f64) -> u64 {
    if value.is_finite() && value >= 0.0 {
        // `as` saturates at u64::MAX.
        value as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_suffix() {
        assert_eq!(parse_metric(Some("12.3K")), 12_300);
    }

    #[test]
    fn millions_suffix() {
        assert_eq!(parse_metric(Some("4M")), 4_000_000);
    }

    #[test]
    fn billions_suffix() {
        assert_eq!(parse_metric(Some("1.5B")), 1_500_000_000);
    }

    #[test]
    fn suffix_is_case_insensitive() {
        assert_eq!(parse_metric(Some("7k")), 7_000);
        assert_eq!(parse_metric(Some("2m")), 2_000_000);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_metric(Some("  3.2K \n")), 3_200);
    }

    #[test]
    fn plain_integer() {
        assert_eq!(parse_metric(Some("1500")), 1_500);
    }

    #[test]
    fn separators_are_stripped_without_suffix() {
        assert_eq!(parse_metric(Some("1,234,567")), 1_234_567);
    }

    #[test]
    fn empty_and_missing_are_zero() {
        assert_eq!(parse_metric(Some("")), 0);
        assert_eq!(parse_metric(Some("   ")), 0);
        assert_eq!(parse_metric(None), 0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_metric(Some("garbage")), 0);
        assert_eq!(parse_metric(Some("K")), 0);
        assert_eq!(parse_metric(Some("1.2.3K")), 0);
    }

    #[test]
    fn oversized_integer_is_zero() {
        assert_eq!(parse_metric(Some("99999999999999999999999")), 0);
    }

    #[test]
    fn rank_value_of_json_numbers() {
        assert_eq!(rank_value(&MetricValue::from(4_500_u64)), 4_500);
        let float = MetricValue::Number(serde_json::Number::from_f64(12.9).unwrap());
        assert_eq!(rank_value(&float), 12);
        let negative = MetricValue::Number((-3_i64).into());
        assert_eq!(rank_value(&negative), 0);
    }

    #[test]
    fn rank_value_of_text_and_other() {
        assert_eq!(rank_value(&MetricValue::from("20K")), 20_000);
        assert_eq!(rank_value(&MetricValue::Other(serde_json::Value::Bool(true))), 0);
    }
}
