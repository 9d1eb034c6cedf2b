//! Locale-aware date and time rendering.
//!
//! Two conventions exist: French (`2024-01-15`, `14:30`) and US English
//! (`1/15/2024`, `02:30 PM`). Stored notes may hold either formatted strings or
//! raw ISO instants, so the string entry points parse what they can and hand
//! anything else back untouched.
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use log::trace;

use crate::Language;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Renders instants in one language, in the host time zone or at a fixed
/// UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct DateTimeFormatter {
    language: Language,
    /// `None` renders each instant at the host's offset for that instant
    offset: Option<FixedOffset>,
}

impl DateTimeFormatter {
    /// Creates a formatter that renders in the host time zone, daylight
    /// saving time included.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            offset: None,
        }
    }

    /// Creates a formatter that renders every instant at `offset`.
    pub fn with_offset(language: Language, offset: FixedOffset) -> Self {
        Self {
            language,
            offset: Some(offset),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn format_date<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> String {
        self.render_date(&self.wall_clock(instant))
    }

    pub fn format_time<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> String {
        self.render_time(&self.wall_clock(instant))
    }

    pub fn format_date_time<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> String {
        format!("{} {}", self.format_date(instant), self.format_time(instant))
    }

    /// Formats a stored date string, or returns it unchanged if it cannot be
    /// parsed.
    pub fn format_date_str(&self, input: &str) -> String {
        match self.parse(input) {
            Some(local) => self.render_date(&local),
            None => input.to_string(),
        }
    }

    /// Formats a stored time string, or returns it unchanged if it cannot be
    /// parsed.
    pub fn format_time_str(&self, input: &str) -> String {
        match self.parse(input) {
            Some(local) => self.render_time(&local),
            None => input.to_string(),
        }
    }

    pub fn format_date_time_str(&self, input: &str) -> String {
        format!(
            "{} {}",
            self.format_date_str(input),
            self.format_time_str(input)
        )
    }

    /// Resolves a string to a wall-clock time in this formatter's zone.
    ///
    /// Instants with an explicit offset are converted; naive date-times and
    /// bare dates are taken as already local.
    fn parse(&self, input: &str) -> Option<NaiveDateTime> {
        let input = input.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
            return Some(self.wall_clock(&instant));
        }

        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Some(naive);
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return date.and_hms_opt(0, 0, 0);
            }
        }

        trace!("Leaving unparseable date/time as is: {:?}", input);
        None
    }

    fn wall_clock<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> NaiveDateTime {
        match self.offset {
            Some(offset) => instant.with_timezone(&offset).naive_local(),
            None => instant.with_timezone(&Local).naive_local(),
        }
    }

    fn render_date(&self, local: &NaiveDateTime) -> String {
        match self.language {
            Language::Fr => local.format("%Y-%m-%d").to_string(),
            Language::En => format!("{}/{}/{}", local.month(), local.day(), local.year()),
        }
    }

    fn render_time(&self, local: &NaiveDateTime) -> String {
        match self.language {
            Language::Fr => local.format("%H:%M").to_string(),
            Language::En => local.format("%I:%M %p").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn utc(language: Language) -> DateTimeFormatter {
        DateTimeFormatter::with_offset(language, FixedOffset::east_opt(0).unwrap())
    }

    fn afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_french_convention() {
        let formatter = utc(Language::Fr);

        assert_eq!(formatter.format_date(&afternoon()), "2024-01-15");
        assert_eq!(formatter.format_time(&afternoon()), "14:30");
        assert_eq!(formatter.format_date_time(&afternoon()), "2024-01-15 14:30");
    }

    #[test]
    fn test_english_convention() {
        let formatter = utc(Language::En);

        assert_eq!(formatter.format_date(&afternoon()), "1/15/2024");
        assert_eq!(formatter.format_time(&afternoon()), "02:30 PM");
    }

    #[test]
    fn test_english_midnight_is_twelve_am() {
        let midnight = Utc.with_ymd_and_hms(2024, 12, 1, 0, 5, 0).unwrap();

        assert_eq!(utc(Language::En).format_time(&midnight), "12:05 AM");
    }

    #[test]
    fn test_iso_instant_string_is_converted_to_offset() {
        let montreal = FixedOffset::west_opt(5 * 3600).unwrap();
        let formatter = DateTimeFormatter::with_offset(Language::Fr, montreal);

        assert_eq!(
            formatter.format_date_str("2024-01-16T02:15:00.000Z"),
            "2024-01-15"
        );
        assert_eq!(formatter.format_time_str("2024-01-16T02:15:00.000Z"), "21:15");
    }

    #[test]
    fn test_previously_formatted_strings_switch_language() {
        assert_eq!(utc(Language::En).format_date_str("2024-03-05"), "3/5/2024");
        assert_eq!(utc(Language::Fr).format_date_str("3/5/2024"), "2024-03-05");
    }

    #[test]
    fn test_unparseable_input_is_returned_unchanged() {
        let formatter = utc(Language::En);

        assert_eq!(formatter.format_date_str("hier matin"), "hier matin");
        assert_eq!(formatter.format_time_str("14:30"), "14:30");
        assert_eq!(formatter.format_time_str(""), "");
    }

    #[test]
    fn test_host_zone_applies_each_instant_own_offset() {
        // US/Canada Eastern rules: UTC-5 in winter, UTC-4 in summer
        std::env::set_var("TZ", "EST5EDT,M3.2.0,M11.1.0");
        let formatter = DateTimeFormatter::new(Language::Fr);

        assert_eq!(formatter.format_time_str("2024-01-15T14:30:00-05:00"), "14:30");
        assert_eq!(formatter.format_time_str("2024-07-15T14:30:00-04:00"), "14:30");
        assert_eq!(formatter.format_date_str("2024-03-10T01:30:00-05:00"), "2024-03-10");
        assert_eq!(formatter.format_time_str("2024-03-10T03:30:00-04:00"), "03:30");
    }

    #[test]
    fn test_naive_date_time_is_taken_as_local() {
        let formatter = DateTimeFormatter::with_offset(
            Language::En,
            FixedOffset::east_opt(2 * 3600).unwrap(),
        );

        assert_eq!(
            formatter.format_date_time_str("2024-07-04T09:05"),
            "7/4/2024 09:05 AM"
        );
    }
}
