/// Date normalization for post and song sheets
///
/// Post sheets record the posting day either as `YYYY/MM/DD` or as a bare
/// `MM/DD`; the year of the reporting sheet fills in the latter.
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Returned by the display formatters when the input is not a date
pub const INVALID_DATE_MARKER: &str = "無効な日付";

// ASCII digits only; `\d` would also accept full-width digits
static FULL_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$").expect("Invalid regex"));
static MONTH_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})$").expect("Invalid regex"));

const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

const DATETIME_FORMATS: [&str; 5] = [
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Normalize a post date to `YYYY/MM/DD`
///
/// * `YYYY/MM/DD` is returned unchanged
/// * `MM/DD` is completed with `reference_year`
/// * any other shape is passed through as-is
pub fn parse_post_date(value: &str, reference_year: i32) -> String {
    if FULL_DATE_RE.is_match(value) {
        return value.to_string();
    }

    if let Some(caps) = MONTH_DAY_RE.captures(value) {
        return format!("{reference_year}/{}/{}", &caps[1], &caps[2]);
    }

    value.to_string()
}

/// Lenient date parser used for range filtering and validity checks
///
/// Accepts `/` or `-` separated dates, with or without a time of day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Format as `YYYYMMDD` (the naming scheme of reporting-date sheets)
pub fn format_date_to_yyyymmdd(value: &str) -> String {
    format_or_marker(value, "%Y%m%d")
}

pub fn format_date_to_yyyymmdd_with_slash(value: &str) -> String {
    format_or_marker(value, "%Y/%m/%d")
}

/// Format as `MM/DD` for chart labels
pub fn format_date_to_mmdd_with_slash(value: &str) -> String {
    format_or_marker(value, "%m/%d")
}

fn format_or_marker(value: &str, fmt: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format(fmt).to_string(),
        None => {
            warn!("Invalid date format: {}", value);
            INVALID_DATE_MARKER.to_string()
        }
    }
}

/// Name of the sheet holding posts collected on `date`
pub fn sheet_name_for(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Reporting date encoded in a `YYYYMMDD` sheet name
pub fn parse_sheet_date(sheet_name: &str) -> Option<NaiveDate> {
    let name = sheet_name.trim();
    if name.len() != 8 || !name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(name, "%Y%m%d").ok()
}

/// Convert an Excel date serial to a date
///
/// Excel counts days from 1899-12-30 once its 1900 leap-year bug is folded in.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(chrono::Duration::days(serial as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_date_completes_month_day() {
        assert_eq!(parse_post_date("03/15", 2024), "2024/03/15");
    }

    #[test]
    fn test_parse_post_date_full_date_unchanged() {
        for year in [1999, 2024, 2030] {
            assert_eq!(parse_post_date("2024/03/15", year), "2024/03/15");
        }
    }

    #[test]
    fn test_parse_post_date_other_shapes_pass_through() {
        assert_eq!(parse_post_date("3/5", 2024), "3/5");
        assert_eq!(parse_post_date("2日前", 2024), "2日前");
        assert_eq!(parse_post_date("2024-03-15", 2024), "2024-03-15");
        assert_eq!(parse_post_date("", 2024), "");
    }

    #[test]
    fn test_parse_post_date_full_width_digits_pass_through() {
        assert_eq!(parse_post_date("０３/１５", 2024), "０３/１５");
        assert_eq!(parse_post_date("２０２４/０３/１５", 2024), "２０２４/０３/１５");
    }

    #[test]
    fn test_round_trip_to_yyyymmdd() {
        assert_eq!(
            format_date_to_yyyymmdd(&parse_post_date("03/15", 2024)),
            "20240315"
        );
    }

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date("2024/03/05"), expected);
        assert_eq!(parse_date("2024-03-05"), expected);
        assert_eq!(parse_date("2024/3/5"), expected);
        assert_eq!(parse_date("2024/03/05 12:30:00"), expected);
        assert_eq!(parse_date("2024-03-05T08:00:00"), expected);
    }

    #[test]
    fn test_parse_date_rejects_impossible_dates() {
        assert_eq!(parse_date("2024/02/30"), None);
        assert_eq!(parse_date("03/15"), None);
        assert_eq!(parse_date("not a date"), None);
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_formatters() {
        assert_eq!(format_date_to_yyyymmdd_with_slash("2024-1-9"), "2024/01/09");
        assert_eq!(format_date_to_mmdd_with_slash("2024/12/01"), "12/01");
    }

    #[test]
    fn test_formatters_return_marker_on_invalid_input() {
        assert_eq!(format_date_to_mmdd_with_slash("garbage"), INVALID_DATE_MARKER);
        assert_eq!(format_date_to_yyyymmdd("13/45"), INVALID_DATE_MARKER);
    }

    #[test]
    fn test_sheet_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(sheet_name_for(date), "20240301");
        assert_eq!(parse_sheet_date("20240301"), Some(date));
        assert_eq!(parse_sheet_date("楽曲情報"), None);
        assert_eq!(parse_sheet_date("20241399"), None);
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(
            excel_serial_to_date(45352.0),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(excel_serial_to_date(0.0), None);
    }
}
