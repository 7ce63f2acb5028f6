//! Clock payloads
//!
//! Builds the wall-clock record served by `/api/time`: local time fields for
//! a requested IANA timezone plus the angles of an analog clock's hands.
//! Unknown timezones fall back to the configured default and are reported
//! with `timezone_ok = false`.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_TIMEZONE: &str = "America/Bogota";

/// Hour display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum HourFormat {
    #[serde(rename = "12")]
    #[value(name = "12")]
    Twelve,
    #[default]
    #[serde(rename = "24")]
    #[value(name = "24")]
    TwentyFour,
}

impl HourFormat {
    /// Anything other than `"12"` or `"24"` (after trimming) means 24-hour.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "12" => HourFormat::Twelve,
            _ => HourFormat::TwentyFour,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HourFormat::Twelve => "12",
            HourFormat::TwentyFour => "24",
        }
    }
}

impl std::fmt::Display for HourFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hand angles in degrees, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl ClockAngles {
    pub fn new(hour_24: u32, minute: u32, second: f64) -> Self {
        let minute = f64::from(minute);
        Self {
            hour: (f64::from(hour_24 % 12) + minute / 60.0 + second / 3600.0) * 30.0,
            minute: (minute + second / 60.0) * 6.0,
            second: second * 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePayload {
    pub timezone_requested: String,
    pub timezone_used: String,
    pub timezone_ok: bool,
    pub iso_time: String,
    pub hour: u32,
    pub hour_24: u32,
    pub hour_12: u32,
    pub minute: u32,
    pub second: f64,
    pub angles: ClockAngles,
    pub format: HourFormat,
}

impl TimePayload {
    /// The compact record kept in the history ring.
    pub fn history_record(&self) -> Value {
        json!({
            "iso_time": self.iso_time,
            "timezone_used": self.timezone_used,
            "format": self.format,
            "h": self.hour,
            "m": self.minute,
            "s": self.second,
        })
    }
}

/// Produces [`TimePayload`]s, falling back to a default timezone.
#[derive(Debug, Clone)]
pub struct Clock {
    default_tz: Tz,
}

impl Clock {
    pub fn new(default_tz: Tz) -> Self {
        Self { default_tz }
    }

    pub fn default_tz(&self) -> Tz {
        self.default_tz
    }

    pub fn payload(&self, tz: &str, format: HourFormat) -> TimePayload {
        self.payload_at(Utc::now(), tz, format)
    }

    pub fn payload_at(&self, now: DateTime<Utc>, tz: &str, format: HourFormat) -> TimePayload {
        let requested = match tz.trim() {
            "" => self.default_tz.name(),
            trimmed => trimmed,
        };
        let (zone, timezone_ok) = match requested.parse::<Tz>() {
            Ok(zone) => (zone, true),
            Err(_) => {
                tracing::debug!(
                    "unknown timezone {:?}, falling back to {}",
                    requested,
                    self.default_tz.name()
                );
                (self.default_tz, false)
            }
        };
        let local = now.with_timezone(&zone);

        let hour_24 = local.hour();
        let hour_12 = match hour_24 % 12 {
            0 => 12,
            h => h,
        };
        let minute = local.minute();
        let micros = (local.nanosecond() % 1_000_000_000) / 1_000;
        let second = f64::from(local.second()) + f64::from(micros) / 1_000_000.0;

        TimePayload {
            timezone_requested: requested.to_string(),
            timezone_used: zone.name().to_string(),
            timezone_ok,
            iso_time: local.to_rfc3339_opts(iso_precision(micros), false),
            hour: match format {
                HourFormat::Twelve => hour_12,
                HourFormat::TwentyFour => hour_24,
            },
            hour_24,
            hour_12,
            minute,
            second,
            angles: ClockAngles::new(hour_24, minute, second),
            format,
        }
    }
}

/// Whole seconds print without a fraction; otherwise six digits.
fn iso_precision(micros: u32) -> SecondsFormat {
    if micros == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(chrono_tz::America::Bogota)
    }
}
