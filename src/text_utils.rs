use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use spdlog::warn;

const DISPLAY_FORMAT: &str = "%B %-d, %Y";

/// A date as it arrives from frontmatter or from the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    Native(NaiveDate),
    Text(String),
}

impl From<NaiveDate> for DateValue {
    fn from(value: NaiveDate) -> Self {
        DateValue::Native(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateValue {
    fn from(value: DateTime<Tz>) -> Self {
        DateValue::Native(value.with_timezone(&Utc).date_naive())
    }
}

impl From<&str> for DateValue {
    fn from(value: &str) -> Self {
        DateValue::Text(value.to_string())
    }
}

impl From<String> for DateValue {
    fn from(value: String) -> Self {
        DateValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    /// `YYYY-MM-DD`, or the raw input when it could not be parsed
    pub canonical: String,
    /// `Month D, YYYY`, or the raw input when it could not be parsed
    pub display: String,
}

impl NormalizedDate {
    fn from_date(date: &NaiveDate) -> Self {
        NormalizedDate {
            canonical: date.format("%Y-%m-%d").to_string(),
            display: date.format(DISPLAY_FORMAT).to_string(),
        }
    }

    fn unparsed(raw: &str) -> Self {
        NormalizedDate {
            canonical: raw.to_string(),
            display: raw.to_string(),
        }
    }
}

/// Never fails: a value that is not a date comes back unchanged in both fields.
pub fn normalize_date(raw: &DateValue) -> NormalizedDate {
    let text = match raw {
        DateValue::Native(date) => return NormalizedDate::from_date(date),
        DateValue::Text(text) => text,
    };

    if is_iso_date(text) {
        return match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(date) => NormalizedDate {
                canonical: text.clone(),
                display: date.format(DISPLAY_FORMAT).to_string(),
            },
            Err(e) => {
                warn!("Error formatting date: {} ({})", text, e);
                NormalizedDate::unparsed(text)
            }
        };
    }

    match parse_loose_date(text) {
        Some(date) => NormalizedDate::from_date(&date),
        None => {
            warn!("Error formatting date: {}", text);
            NormalizedDate::unparsed(text)
        }
    }
}

fn is_iso_date(text: &str) -> bool {
    lazy_static! {
        static ref ISO_DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }
    ISO_DATE_REGEX.is_match(text)
}

/// Best effort parsing of the date formats people usually type in a header.
/// Anything carrying an offset is moved to UTC before the date is taken.
pub fn parse_loose_date(buf: &str) -> Option<NaiveDate> {
    let s = buf.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    const DATE_TIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%d %b %Y",
    ];
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Turns free text into a file name: ASCII, lowercase, word characters only,
/// whitespace runs become a single `-`.
pub fn slugify(title: &str) -> String {
    lazy_static! {
        static ref NON_WORD_REGEX: Regex = Regex::new(r"[^A-Za-z0-9_\s]").unwrap();
        static ref SPACES_REGEX: Regex = Regex::new(r"\s+").unwrap();
    }

    let ascii = unidecode::unidecode(title).to_lowercase();
    let words = NON_WORD_REGEX.replace_all(&ascii, "");
    SPACES_REGEX.replace_all(words.trim(), "-").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn test_iso_date() {
        let res = normalize_date(&DateValue::from("2025-04-03"));
        assert_eq!(res.canonical, "2025-04-03");
        assert_eq!(res.display, "April 3, 2025");
    }

    #[test]
    fn test_native_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let res = normalize_date(&date.into());
        assert_eq!(res.canonical, "2024-12-25");
        assert_eq!(res.display, "December 25, 2024");
    }

    #[test]
    fn test_native_date_time_uses_utc_day() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        let res = normalize_date(&dt.into());
        assert_eq!(res.canonical, "2024-02-29");
    }

    #[test]
    fn test_other_formats() {
        let cases = [
            ("2023-07-14T10:42:00Z", "2023-07-14"),
            ("2023-07-14T23:30:00-03:00", "2023-07-15"),
            ("2023-07-14 10:42:32.123", "2023-07-14"),
            ("2023/07/14", "2023-07-14"),
            ("2023-7-4", "2023-07-04"),
            ("07/14/2023", "2023-07-14"),
            ("July 14, 2023", "2023-07-14"),
            ("Jul 4, 2023", "2023-07-04"),
            ("14 July 2023", "2023-07-14"),
        ];
        for (raw, expected) in cases {
            let res = normalize_date(&DateValue::from(raw));
            assert_eq!(res.canonical, expected, "input {}", raw);
        }
    }

    #[test]
    fn test_invalid_date_passes_through() {
        let res = normalize_date(&DateValue::from("not-a-date"));
        assert_eq!(res.canonical, "not-a-date");
        assert_eq!(res.display, "not-a-date");

        let res = normalize_date(&DateValue::from("2025-13-45"));
        assert_eq!(res.canonical, "2025-13-45");
        assert_eq!(res.display, "2025-13-45");

        let res = normalize_date(&DateValue::from("--"));
        assert_eq!(res.canonical, "--");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My New Post Title"), "my-new-post-title");
        assert_eq!(slugify("GPT-5: What's   new?"), "gpt5-whats-new");
        assert_eq!(slugify("  Ábaco dir_2 "), "abaco-dir_2");
        assert_eq!(slugify("!!!"), "");
    }
}
