/// Shared helpers for cell value normalization
use regex::Regex;
use std::sync::LazyLock;

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9,]+(?:\.[0-9]+)?)\s*([KMB])?$").expect("Invalid regex")
});

/// Parse an engagement count that may use thousands separators or an
/// abbreviated suffix (`K`, `M`, `B`, case-insensitive).
///
/// TikTok shows large counts in abbreviated form and those strings end up in the
/// sheet verbatim, so "50.3K" has to become 50300 rather than fail.
///
/// # Examples
///
/// ```
/// use ugc_chart_data::utils::parse_count;
///
/// assert_eq!(parse_count("123"), Some(123));
/// assert_eq!(parse_count("12,345"), Some(12_345));
/// assert_eq!(parse_count("50.3K"), Some(50_300));
/// assert_eq!(parse_count("1.2m"), Some(1_200_000));
/// assert_eq!(parse_count("n/a"), None);
/// ```
pub fn parse_count(value: &str) -> Option<u64> {
    let caps = COUNT_RE.captures(value.trim())?;

    let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        Some(suffix) if suffix == "K" => 1_000.0,
        Some(suffix) if suffix == "M" => 1_000_000.0,
        Some(suffix) if suffix == "B" => 1_000_000_000.0,
        _ => 1.0,
    };

    let scaled = (number * multiplier).round();
    if scaled.is_finite() && scaled >= 0.0 && scaled <= u64::MAX as f64 {
        Some(scaled as u64)
    } else {
        None
    }
}

/// Fresh identifier for a post record, independent of the sheet's post ID
pub fn generate_unique_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
