//! Wire format for event timestamps.
//!
//! Timestamps are always UTC and always carry a literal `Z`. Sub-second digits
//! are printed only when non-zero, so GitHub's second-precision values come
//! back out exactly as they went in.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Postgres `timestamptz` keeps microseconds.
const STORAGE_SUBSEC_DIGITS: u16 = 6;

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an RFC 3339 timestamp with an explicit offset and converts it to UTC.
/// Naive timestamps are rejected.
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim()).map(|ts| ts.with_timezone(&Utc))
}

/// Drops precision the store cannot keep, so a timestamp read back from the
/// store compares equal to the one that was written.
pub fn to_storage_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(STORAGE_SUBSEC_DIGITS)
}

/// `#[serde(with = "hookfeed_store::timestamp::serde_utc")]`
pub mod serde_utc {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_whole_seconds() {
        let ts = Utc.with_ymd_and_hms(2021, 4, 1, 21, 30, 0).unwrap();
        assert_eq!(format(&ts), "2021-04-01T21:30:00Z");
    }

    #[test]
    fn test_format_keeps_subseconds() {
        let ts = Utc.with_ymd_and_hms(2021, 4, 1, 21, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(format(&ts), "2021-04-01T21:30:00.250Z");
    }

    #[test]
    fn test_parse_converts_offset_to_utc() {
        let ts = parse("2021-04-02T03:00:00+05:30").unwrap();
        assert_eq!(format(&ts), "2021-04-01T21:30:00Z");
    }

    #[test]
    fn test_parse_rejects_naive_and_garbage() {
        assert!(parse("2021-04-01T21:30:00").is_err());
        assert!(parse("not-a-date").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_storage_precision_is_stable() {
        let ts = Utc.with_ymd_and_hms(2021, 4, 1, 21, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let stored = to_storage_precision(ts);
        assert_eq!(format(&stored), "2021-04-01T21:30:00.123456Z");
        assert_eq!(parse(&format(&stored)).unwrap(), stored);
    }
}
