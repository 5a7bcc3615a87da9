//! Publication dates from preambles and file names.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DISPLAY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+(\w+)\s+(\d+)").unwrap());

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month number for an English abbreviation; unknown names mean January.
fn month_number(abbr: &str) -> u32 {
    MONTHS
        .iter()
        .position(|m| *m == abbr)
        .and_then(|idx| u32::try_from(idx + 1).ok())
        .unwrap_or(1)
}

fn parse_display(value: &str) -> Option<NaiveDate> {
    let caps = DISPLAY_DATE.captures(value)?;
    let day = caps[1].parse().ok()?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month_number(&caps[2]), day)
}

/// First `YYYY-MM-DD` date found anywhere in `value`.
pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(value)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}

/// Resolve a document date from its preamble value, falling back to the file
/// name.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use folio_site::parse_date;
///
/// assert_eq!(parse_date("29 Jan 2023", "x.md"), NaiveDate::from_ymd_opt(2023, 1, 29));
/// assert_eq!(parse_date("", "2024-02-08.md"), NaiveDate::from_ymd_opt(2024, 2, 8));
/// assert_eq!(parse_date("", "about.md"), None);
/// ```
pub fn parse_date(value: &str, file_name: &str) -> Option<NaiveDate> {
    parse_display(value)
        .or_else(|| parse_iso(value))
        .or_else(|| parse_iso(file_name))
}
