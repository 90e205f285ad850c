// 🕐 Timestamp Normalizer
// OFX compact datetimes: YYYYMMDD[HHMM[SS[.fff]]][offset[:NAME]]
//
// The calendar digits are stored exactly as written; the bracketed offset
// (or the caller's default zone when it is missing) only decides which
// absolute instant those digits denote.

use crate::error::ValueError;
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Largest offset accepted, inside the brackets or as a fixed default zone
const MAX_OFFSET_SECONDS: i32 = 14 * 3600;

// ============================================================================
// DEFAULT ZONE
// ============================================================================

/// Zone assumed when a token carries no usable offset
///
/// Deserializing a `Fixed` zone outside ±14h fails instead of silently
/// becoming some other zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ZoneSetting", into = "ZoneSetting")]
pub enum DefaultZone {
    /// Offset-less tokens are UTC
    Utc,

    /// Offset-less tokens are in the host's local zone
    #[default]
    Local,

    /// Offset-less tokens are at a fixed offset (seconds east of UTC)
    Fixed(i32),
}

impl DefaultZone {
    /// A fixed zone, checked against the ±14h range
    pub fn fixed(seconds: i32) -> Result<Self, ValueError> {
        DefaultZone::Fixed(seconds).validate()
    }

    pub fn validate(self) -> Result<Self, ValueError> {
        match self {
            DefaultZone::Fixed(seconds) if seconds.unsigned_abs() > MAX_OFFSET_SECONDS as u32 => {
                Err(ValueError::InvalidZoneOffset(seconds))
            }
            zone => Ok(zone),
        }
    }

    /// Resolve the offset this zone has at a given wall-clock moment
    pub fn offset_at(&self, calendar: &NaiveDateTime) -> Result<FixedOffset, ValueError> {
        match self.validate()? {
            DefaultZone::Utc => Ok(Utc.fix()),
            DefaultZone::Fixed(seconds) => {
                FixedOffset::east_opt(seconds).ok_or(ValueError::InvalidZoneOffset(seconds))
            }
            DefaultZone::Local => Ok(Local
                .offset_from_local_datetime(calendar)
                .earliest()
                .unwrap_or_else(|| Local.offset_from_utc_datetime(calendar))
                .fix()),
        }
    }
}

/// Serialized form of `DefaultZone`; validated on the way in
#[derive(Serialize, Deserialize)]
enum ZoneSetting {
    Utc,
    Local,
    Fixed(i32),
}

impl From<DefaultZone> for ZoneSetting {
    fn from(zone: DefaultZone) -> Self {
        match zone {
            DefaultZone::Utc => ZoneSetting::Utc,
            DefaultZone::Local => ZoneSetting::Local,
            DefaultZone::Fixed(seconds) => ZoneSetting::Fixed(seconds),
        }
    }
}

impl TryFrom<ZoneSetting> for DefaultZone {
    type Error = ValueError;

    fn try_from(setting: ZoneSetting) -> Result<Self, Self::Error> {
        let zone = match setting {
            ZoneSetting::Utc => DefaultZone::Utc,
            ZoneSetting::Local => DefaultZone::Local,
            ZoneSetting::Fixed(seconds) => DefaultZone::Fixed(seconds),
        };
        zone.validate()
    }
}

// ============================================================================
// TIMESTAMP
// ============================================================================

/// A point in time as written in an OFX document
///
/// Never zone-less: `instant` always carries the resolved UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Calendar digits plus the offset they were resolved against
    pub instant: DateTime<FixedOffset>,

    /// Zone abbreviation from the brackets (e.g. "EST"), if one was given
    pub zone_name: Option<String>,
}

impl Timestamp {
    /// The calendar digits exactly as they appeared in the token
    pub fn calendar(&self) -> NaiveDateTime {
        self.instant.naive_local()
    }

    pub fn offset(&self) -> FixedOffset {
        *self.instant.offset()
    }

    /// The absolute instant in UTC
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.to_rfc3339())?;
        if let Some(name) = &self.zone_name {
            write!(f, " {}", name)?;
        }
        Ok(())
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// Parse an OFX datetime token
///
/// # Examples:
/// ```
/// use ofx_statement::{parse_timestamp, DefaultZone};
///
/// let ts = parse_timestamp("20230115120000[-5:EST]", DefaultZone::Utc).unwrap();
/// assert_eq!(ts.offset().local_minus_utc(), -5 * 3600);
/// assert_eq!(ts.zone_name.as_deref(), Some("EST"));
/// ```
///
/// Fails when the digits do not form a valid calendar date and time, or when
/// a needed `default_zone` is out of range. A missing or unreadable offset
/// falls back to `default_zone`.
pub fn parse_timestamp(token: &str, default_zone: DefaultZone) -> Result<Timestamp, ValueError> {
    let token = token.trim();
    let malformed = || ValueError::MalformedTimestamp(token.to_string());

    let (body, zone) = match token.find('[') {
        Some(idx) => (&token[..idx], Some(&token[idx..])),
        None => (token, None),
    };

    let (digits, fraction) = match body.split_once('.') {
        Some((digits, fraction)) => (digits, Some(fraction)),
        None => (body, None),
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    // Fractions only make sense after a full HHMMSS
    let has_seconds = match digits.len() {
        8 | 12 => false,
        14 => true,
        _ => return Err(malformed()),
    };
    if fraction.is_some() && !has_seconds {
        return Err(malformed());
    }

    let date = NaiveDate::from_ymd_opt(
        number(&digits[0..4]) as i32,
        number(&digits[4..6]),
        number(&digits[6..8]),
    )
    .ok_or_else(malformed)?;

    let (hour, minute, second) = match digits.len() {
        8 => (0, 0, 0),
        12 => (number(&digits[8..10]), number(&digits[10..12]), 0),
        _ => (
            number(&digits[8..10]),
            number(&digits[10..12]),
            number(&digits[12..14]),
        ),
    };

    let millis = match fraction {
        Some(f) => parse_millis(f).ok_or_else(malformed)?,
        None => 0,
    };

    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis).ok_or_else(malformed)?;
    let calendar = date.and_time(time);

    let (offset, zone_name) = match zone.and_then(parse_zone) {
        Some((offset, name)) => (offset, name),
        None => {
            if let Some(raw) = zone {
                debug!(token, zone = raw, "unreadable offset, using default zone");
            }
            (default_zone.offset_at(&calendar)?, None)
        }
    };

    let instant = offset
        .from_local_datetime(&calendar)
        .single()
        .ok_or_else(malformed)?;

    Ok(Timestamp { instant, zone_name })
}

/// Digits are validated by the caller
fn number(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// ".5" → 500, ".123456" → 123
fn parse_millis(fraction: &str) -> Option<u32> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut padded: String = fraction.chars().take(3).collect();
    while padded.len() < 3 {
        padded.push('0');
    }
    Some(number(&padded))
}

/// "[-5:EST]" → (UTC-5, Some("EST")); `None` if the offset is unusable
///
/// Anything after the first `]` is not part of the zone and is dropped.
fn parse_zone(bracketed: &str) -> Option<(FixedOffset, Option<String>)> {
    let inner = bracketed.strip_prefix('[').unwrap_or(bracketed);
    let inner = match inner.split_once(']') {
        Some((inner, trailing)) => {
            if !trailing.is_empty() {
                debug!(trailing, "ignoring text after zone");
            }
            inner
        }
        None => inner,
    };

    let (hours, name) = match inner.split_once(':') {
        Some((hours, name)) => (hours.trim(), name.trim()),
        None => (inner.trim(), ""),
    };

    let unsigned = hours.trim_start_matches(['+', '-']);
    let well_formed = !unsigned.is_empty()
        && hours.len() - unsigned.len() <= 1
        && unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && unsigned.bytes().filter(|b| *b == b'.').count() <= 1
        && unsigned.bytes().any(|b| b.is_ascii_digit());
    if !well_formed {
        return None;
    }

    let hours: f64 = hours.trim_start_matches('+').parse().ok()?;
    if hours.abs() * 3600.0 > f64::from(MAX_OFFSET_SECONDS) {
        return None;
    }

    let offset = FixedOffset::east_opt((hours * 3600.0).round() as i32)?;
    let name = (!name.is_empty()).then(|| name.to_string());
    Some((offset, name))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn calendar(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_date_only_is_midnight_utc() {
        let ts = parse_timestamp("20230115", DefaultZone::Utc).unwrap();

        assert_eq!(ts.calendar(), calendar(2023, 1, 15, 0, 0, 0));
        assert_eq!(ts.offset().local_minus_utc(), 0);
        assert_eq!(ts.zone_name, None);
    }

    #[test]
    fn test_date_only_uses_fixed_default_zone() {
        let ts = parse_timestamp("20230115", DefaultZone::Fixed(3 * 3600)).unwrap();

        assert_eq!(ts.calendar(), calendar(2023, 1, 15, 0, 0, 0));
        assert_eq!(ts.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(ts.to_utc().hour(), 21);
        assert_eq!(ts.to_utc().day(), 14);
    }

    #[test]
    fn test_explicit_offset_and_zone_name() {
        let ts = parse_timestamp("20230115120000[-5:EST]", DefaultZone::Utc).unwrap();

        assert_eq!(ts.calendar(), calendar(2023, 1, 15, 12, 0, 0));
        assert_eq!(ts.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(ts.zone_name.as_deref(), Some("EST"));
        assert_eq!(ts.to_utc().hour(), 17);
    }

    #[test]
    fn test_offset_without_name() {
        let ts = parse_timestamp("20230115120000[+2]", DefaultZone::Utc).unwrap();

        assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(ts.zone_name, None);
    }

    #[test]
    fn test_decimal_offset() {
        let ts = parse_timestamp("20230115120000[5.5:IST]", DefaultZone::Utc).unwrap();

        assert_eq!(ts.offset().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(ts.zone_name.as_deref(), Some("IST"));
    }

    #[test]
    fn test_explicit_offset_overrides_default_zone() {
        let ts = parse_timestamp("20230115120000[0:GMT]", DefaultZone::Fixed(-8 * 3600)).unwrap();

        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_changing_offset_keeps_calendar_digits() {
        let east = parse_timestamp("20230115120000[+3:MSK]", DefaultZone::Utc).unwrap();
        let west = parse_timestamp("20230115120000[-7:MST]", DefaultZone::Utc).unwrap();

        assert_eq!(east.calendar(), west.calendar());
        assert_ne!(east.to_utc(), west.to_utc());
        assert_eq!((west.to_utc() - east.to_utc()).num_hours(), 10);
    }

    #[test]
    fn test_fractional_seconds_kept_to_millis() {
        let ts = parse_timestamp("20230115120000.123[-5:EST]", DefaultZone::Utc).unwrap();
        assert_eq!(ts.calendar().nanosecond(), 123_000_000);

        let ts = parse_timestamp("20230115120000.5", DefaultZone::Utc).unwrap();
        assert_eq!(ts.calendar().nanosecond(), 500_000_000);

        let ts = parse_timestamp("20230115120000.123456", DefaultZone::Utc).unwrap();
        assert_eq!(ts.calendar().nanosecond(), 123_000_000);
    }

    #[test]
    fn test_hour_minute_form() {
        let ts = parse_timestamp("202301151230", DefaultZone::Utc).unwrap();
        assert_eq!(ts.calendar(), calendar(2023, 1, 15, 12, 30, 0));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let ts = parse_timestamp("  20230115 \n", DefaultZone::Utc).unwrap();
        assert_eq!(ts.calendar().year(), 2023);
    }

    #[test]
    fn test_malformed_offset_falls_back_to_default() {
        let ts = parse_timestamp("20230115120000[abc:XYZ]", DefaultZone::Fixed(3600)).unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3600);
        assert_eq!(ts.zone_name, None);

        let ts = parse_timestamp("20230115120000[]", DefaultZone::Utc).unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);

        let ts = parse_timestamp("20230115120000[-99:XXX]", DefaultZone::Utc).unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_invalid_calendar_date_fails() {
        for token in ["20231301", "20230230", "20230100", "2023011", "2023O115", ""] {
            assert_eq!(
                parse_timestamp(token, DefaultZone::Utc),
                Err(ValueError::MalformedTimestamp(token.to_string())),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_invalid_time_of_day_fails() {
        for token in ["20230115250000", "20230115126000", "20230115120000.", "20230115.5"] {
            assert!(
                matches!(
                    parse_timestamp(token, DefaultZone::Utc),
                    Err(ValueError::MalformedTimestamp(_))
                ),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_local_default_keeps_calendar_digits() {
        let ts = parse_timestamp("20230601093000", DefaultZone::Local).unwrap();
        assert_eq!(ts.calendar(), calendar(2023, 6, 1, 9, 30, 0));
    }

    #[test]
    fn test_text_after_zone_is_not_part_of_name() {
        let ts = parse_timestamp("20230115[-5:EST]xyz", DefaultZone::Utc).unwrap();

        assert_eq!(ts.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(ts.zone_name.as_deref(), Some("EST"));
    }

    #[test]
    fn test_out_of_range_fixed_zone_is_rejected() {
        assert_eq!(DefaultZone::fixed(-5 * 3600), Ok(DefaultZone::Fixed(-5 * 3600)));
        assert_eq!(
            DefaultZone::fixed(20 * 3600),
            Err(ValueError::InvalidZoneOffset(20 * 3600))
        );

        assert_eq!(
            parse_timestamp("20230115", DefaultZone::Fixed(-90_000)),
            Err(ValueError::InvalidZoneOffset(-90_000))
        );

        // an explicit offset never consults the default zone
        let ts = parse_timestamp("20230115[+1:CET]", DefaultZone::Fixed(-90_000)).unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_zone_deserialization_checks_range() {
        let zone: DefaultZone = serde_json::from_str(r#"{"Fixed": 19800}"#).unwrap();
        assert_eq!(zone, DefaultZone::Fixed(19800));
        assert_eq!(serde_json::to_string(&zone).unwrap(), r#"{"Fixed":19800}"#);

        let utc: DefaultZone = serde_json::from_str(r#""Utc""#).unwrap();
        assert_eq!(utc, DefaultZone::Utc);

        assert!(serde_json::from_str::<DefaultZone>(r#"{"Fixed": 86400}"#).is_err());
    }

    #[test]
    fn test_display_includes_zone_name() {
        let ts = parse_timestamp("20230115120000[-5:EST]", DefaultZone::Utc).unwrap();
        assert_eq!(ts.to_string(), "2023-01-15T12:00:00-05:00 EST");
    }
}
