use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};

use crate::converter::Converter;

/// `DateTime<Utc>` stored as an ISO 8601 timestamp with millisecond
/// precision, e.g. `2024-03-01T12:30:00.250Z`.
///
/// The domain is millisecond-precision instants in years 0000 through 9999;
/// `stringify` truncates anything finer. Parsing accepts any RFC 3339
/// timestamp (converted to UTC) and a bare `YYYY-MM-DD` date, read as UTC
/// midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsoDate;

impl Converter for IsoDate {
    type Value = DateTime<Utc>;

    fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(instant.with_timezone(&Utc));
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
    }

    fn stringify(&self, value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
