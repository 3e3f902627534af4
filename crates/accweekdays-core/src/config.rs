use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::AccWeekdaysError;

/// Environment variable consulted when no zone is given explicitly.
pub const TIMEZONE_ENV: &str = "ACCWEEKDAYS_TZ";

/// Zone used to decide day-of-week and local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSetting {
    /// The host process's local zone.
    Local,
    /// A fixed IANA zone such as `UTC` or `Asia/Shanghai`.
    Named(Tz),
}

impl ZoneSetting {
    /// Read the zone from `ACCWEEKDAYS_TZ`, falling back to UTC when unset or empty.
    pub fn from_env() -> Result<Self, AccWeekdaysError> {
        Self::from_env_value(std::env::var(TIMEZONE_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, AccWeekdaysError> {
        match value {
            Some(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for ZoneSetting {
    fn default() -> Self {
        ZoneSetting::Named(Tz::UTC)
    }
}

impl FromStr for ZoneSetting {
    type Err = AccWeekdaysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("local") {
            return Ok(ZoneSetting::Local);
        }
        name.parse::<Tz>()
            .map(ZoneSetting::Named)
            .map_err(|e| AccWeekdaysError::InvalidTimezone {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for ZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSetting::Local => f.write_str("local"),
            ZoneSetting::Named(tz) => write!(f, "{tz}"),
        }
    }
}
