//! Time-until-arrival arithmetic and display formatting.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// How a fractional number of minutes becomes a whole one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinuteRounding {
    /// Nearest minute, halves away from zero (`-1.4 → -1`, `-1.5 → -2`).
    #[default]
    Round,

    /// Toward zero (`-1.9 → -1`, `2.9 → 2`).
    Truncate,
}

impl fmt::Display for MinuteRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinuteRounding::Round => f.write_str("round"),
            MinuteRounding::Truncate => f.write_str("truncate"),
        }
    }
}

/// Error returned when parsing an unknown rounding mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rounding mode {0:?} (expected \"round\" or \"truncate\")")]
pub struct InvalidRounding(String);

impl FromStr for MinuteRounding {
    type Err = InvalidRounding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round" => Ok(MinuteRounding::Round),
            "truncate" => Ok(MinuteRounding::Truncate),
            _ => Err(InvalidRounding(s.to_string())),
        }
    }
}

/// Whole minutes from `now` until `arrival`; negative once it has passed.
///
/// Both instants are absolute, so the server's own time zone never enters
/// the calculation.
pub fn minutes_until(arrival: DateTime<Utc>, now: DateTime<Utc>, rounding: MinuteRounding) -> i64 {
    let millis = (arrival - now).num_milliseconds();
    match rounding {
        MinuteRounding::Truncate => millis / MILLIS_PER_MINUTE,
        MinuteRounding::Round => {
            let whole = (millis.abs() + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE;
            whole * millis.signum()
        }
    }
}

/// Rider-facing wall-clock time, e.g. `02:07:30 PM`.
pub fn format_wall_clock(arrival: DateTime<Utc>, tz: Tz) -> String {
    arrival.with_timezone(&tz).format("%I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
    }

    fn in_secs(secs: i64) -> DateTime<Utc> {
        now() + Duration::seconds(secs)
    }

    #[test]
    fn rounding_to_nearest() {
        let r = MinuteRounding::Round;
        assert_eq!(minutes_until(in_secs(0), now(), r), 0);
        assert_eq!(minutes_until(in_secs(29), now(), r), 0);
        assert_eq!(minutes_until(in_secs(30), now(), r), 1);
        assert_eq!(minutes_until(in_secs(150), now(), r), 3);
        assert_eq!(minutes_until(in_secs(-60), now(), r), -1);
        assert_eq!(minutes_until(in_secs(-84), now(), r), -1);
        assert_eq!(minutes_until(in_secs(-96), now(), r), -2);
    }

    #[test]
    fn truncating_toward_zero() {
        let t = MinuteRounding::Truncate;
        assert_eq!(minutes_until(in_secs(59), now(), t), 0);
        assert_eq!(minutes_until(in_secs(179), now(), t), 2);
        assert_eq!(minutes_until(in_secs(-60), now(), t), -1);
        assert_eq!(minutes_until(in_secs(-84), now(), t), -1);
        assert_eq!(minutes_until(in_secs(-96), now(), t), -1);
        assert_eq!(minutes_until(in_secs(-120), now(), t), -2);
    }

    #[test]
    fn sub_second_offsets() {
        let arrival = now() + Duration::milliseconds(89_600);
        assert_eq!(minutes_until(arrival, now(), MinuteRounding::Round), 1);
        assert_eq!(minutes_until(arrival, now(), MinuteRounding::Truncate), 1);
    }

    #[test]
    fn parse_rounding() {
        assert_eq!("round".parse(), Ok(MinuteRounding::Round));
        assert_eq!(" Truncate ".parse(), Ok(MinuteRounding::Truncate));
        assert!("floor".parse::<MinuteRounding>().is_err());
        assert_eq!(MinuteRounding::Truncate.to_string(), "truncate");
    }

    #[test]
    fn wall_clock_in_display_zone() {
        // 18:00 UTC is 14:00 in New York during daylight saving time.
        let arrival = Utc.with_ymd_and_hms(2024, 3, 15, 18, 7, 30).unwrap();
        assert_eq!(
            format_wall_clock(arrival, chrono_tz::America::New_York),
            "02:07:30 PM"
        );
        assert_eq!(format_wall_clock(arrival, chrono_tz::UTC), "06:07:30 PM");
    }
}
