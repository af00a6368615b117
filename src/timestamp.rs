use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

use crate::error::Error;

/// A creation-date bound for board searches.
///
/// Values typed without an offset are sent without one, so the server applies
/// its own interpretation; values with `Z` or `±HH:MM` keep their offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self::Zoned(dt));
        }

        for format in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(input, format) {
                return Ok(Self::Zoned(dt));
            }
        }

        // "...:00Z" without seconds is not RFC 3339; treat a trailing Z as +00:00
        if let Some(rest) = input.strip_suffix(['Z', 'z']) {
            for format in ZONED_FORMATS {
                if let Ok(dt) = DateTime::parse_from_str(&format!("{rest}+00:00"), format) {
                    return Ok(Self::Zoned(dt));
                }
            }
        }

        for format in LOCAL_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(Self::Local(dt));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
            && let Some(dt) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(Self::Local(dt));
        }

        Err(Error::InvalidTimestamp {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoned(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            Self::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}
