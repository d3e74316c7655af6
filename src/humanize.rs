//! Human-readable time formatting and parsing utilities

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid window format: {0}")]
    InvalidFormat(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid unit: {0}")]
    InvalidUnit(String),
}

/// Time window with human-readable parsing ("8h", "24h", "90s", or plain seconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Window(pub u64);

impl Window {
    pub const fn hours(hours: u64) -> Self {
        Window(hours * 60 * 60)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }

    pub fn to_human_readable(&self) -> String {
        const UNITS: &[(&str, u64)] = &[("d", 24 * 60 * 60), ("h", 60 * 60), ("m", 60)];

        for &(unit, divisor) in UNITS {
            if self.0 >= divisor && self.0 % divisor == 0 {
                return format!("{}{}", self.0 / divisor, unit);
            }
        }

        format!("{}s", self.0)
    }
}

impl<'de> Deserialize<'de> for Window {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WindowVisitor;

        impl<'de> serde::de::Visitor<'de> for WindowVisitor {
            type Value = Window;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a time window as string (e.g., \"8h\", \"30m\") or seconds")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Window(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(v)
                    .map(Window)
                    .map_err(|_| E::custom(format!("negative window: {v}")))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse::<Window>().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_any(WindowVisitor)
    }
}

impl FromStr for Window {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        if let Ok(num) = s.parse::<u64>() {
            return Ok(Window(num));
        }

        let (num_str, unit) = match s.find(|c: char| !c.is_ascii_digit()) {
            Some(pos) if pos > 0 => (&s[..pos], &s[pos..]),
            _ => return Err(ParseError::InvalidFormat(s.to_string())),
        };

        let num: u64 = num_str.parse()?;

        let multiplier = match unit.trim() {
            "s" | "sec" | "secs" => 1,
            "m" | "min" | "mins" => 60,
            "h" | "hr" | "hrs" => 60 * 60,
            "d" | "day" | "days" => 24 * 60 * 60,
            _ => return Err(ParseError::InvalidUnit(unit.to_string())),
        };

        num.checked_mul(multiplier)
            .map(Window)
            .ok_or_else(|| ParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_human_readable())
    }
}

/// Formats a duration in seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so a 100 hour recording renders as `100:00:00`.
pub fn format_time_string(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Display locale for dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    fn abbreviated_months(&self) -> &'static [&'static str; 12] {
        match self {
            Locale::PtBr => &[
                "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
            ],
            Locale::EnUs => &[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
        }
    }

    /// BCP 47 language tag
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
        }
    }
}

/// Formats a date as `d MMM yy`: unpadded day, abbreviated month, two-digit year.
pub fn format_short_date(date: NaiveDate, locale: Locale) -> String {
    let month = locale.abbreviated_months()[date.month0() as usize];
    format!("{} {} {:02}", date.day(), month, date.year().rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_seconds() {
        assert_eq!("3600".parse::<Window>().unwrap().as_secs(), 3600);
        assert_eq!("0".parse::<Window>().unwrap().as_secs(), 0);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("90s".parse::<Window>().unwrap().as_secs(), 90);
        assert_eq!("30m".parse::<Window>().unwrap().as_secs(), 30 * 60);
        assert_eq!("8h".parse::<Window>().unwrap(), Window::hours(8));
        assert_eq!("24H".parse::<Window>().unwrap(), Window::hours(24));
        assert_eq!("2d".parse::<Window>().unwrap(), Window::hours(48));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!("h".parse::<Window>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("5w".parse::<Window>(), Err(ParseError::InvalidUnit(_))));
        assert!("".parse::<Window>().is_err());
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            "10000000000000000h".parse::<Window>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "18446744073709551615s".parse::<Window>(),
            Ok(Window(u64::MAX))
        ));
    }

    #[test]
    fn test_to_human_readable() {
        assert_eq!(Window::hours(8).to_human_readable(), "8h");
        assert_eq!(Window::hours(24).to_human_readable(), "1d");
        assert_eq!(Window(90).to_human_readable(), "90s");
        assert_eq!(Window(0).to_human_readable(), "0s");
    }

    #[test]
    fn test_deserialize_window() {
        #[derive(Deserialize)]
        struct TestStruct {
            window: Window,
        }
        let parsed: TestStruct = serde_json::from_str(r#"{"window": "8h"}"#).unwrap();
        assert_eq!(parsed.window, Window::hours(8));

        let parsed: TestStruct = serde_json::from_str(r#"{"window": 60}"#).unwrap();
        assert_eq!(parsed.window.as_secs(), 60);
    }

    #[test]
    fn test_format_time_string() {
        assert_eq!(format_time_string(5400), "01:30:00");
        assert_eq!(format_time_string(0), "00:00:00");
        assert_eq!(format_time_string(3661), "01:01:01");
        assert_eq!(format_time_string(59), "00:00:59");
        assert_eq!(format_time_string(360_000), "100:00:00");
    }

    #[test]
    fn test_format_short_date_pt_br() {
        let date = NaiveDate::from_ymd_opt(2021, 5, 10).unwrap();
        assert_eq!(format_short_date(date, Locale::PtBr), "10 mai 21");

        let date = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
        assert_eq!(format_short_date(date, Locale::PtBr), "1 fev 21");
    }

    #[test]
    fn test_format_short_date_en_us() {
        let date = NaiveDate::from_ymd_opt(2005, 12, 31).unwrap();
        assert_eq!(format_short_date(date, Locale::EnUs), "31 Dec 05");
    }
}
