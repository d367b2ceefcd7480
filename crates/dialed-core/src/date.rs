//! Calendar dates attached to sessions.
//!
//! Sessions carry the calendar day they were recorded on, written in US
//! locale form (`3/5/2024`). Older documents use zero-padded `03/05/2024`
//! and some imports use ISO `2024-03-05`; all three parse to the same day so
//! grouping by date is not sensitive to formatting.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DialedError;

/// A calendar day in the user's local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionDate(NaiveDate);

impl SessionDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a date from year/month/day, `None` if the day does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the local timezone.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The previous calendar day.
    pub fn pred(&self) -> Self {
        Self(self.0.checked_sub_days(Days::new(1)).unwrap_or(self.0))
    }

    /// Whether `self` is exactly one calendar day before `other`.
    pub fn is_day_before(&self, other: &SessionDate) -> bool {
        other.0.signed_duration_since(self.0).num_days() == 1
    }
}

impl From<NaiveDate> for SessionDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.month(), self.0.day(), self.0.year())
    }
}

impl FromStr for SessionDate {
    type Err = DialedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || DialedError::validation(format!("unrecognized session date '{}'", s));

        if let Ok(iso) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self(iso));
        }

        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let month: u32 = parts[0].trim().parse().map_err(|_| invalid())?;
        let day: u32 = parts[1].trim().parse().map_err(|_| invalid())?;
        let year: i32 = parts[2].trim().parse().map_err(|_| invalid())?;

        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }
}

impl Serialize for SessionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_us_formats() {
        let padded: SessionDate = "03/05/2024".parse().unwrap();
        let plain: SessionDate = "3/5/2024".parse().unwrap();
        assert_eq!(padded, plain);
        assert_eq!(padded.to_string(), "3/5/2024");
    }

    #[test]
    fn test_parse_iso() {
        let iso: SessionDate = "2024-03-05".parse().unwrap();
        assert_eq!(iso, SessionDate::from_ymd(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("yesterday".parse::<SessionDate>().is_err());
        assert!("13/45/2024".parse::<SessionDate>().is_err());
    }

    #[test]
    fn test_day_before_crosses_month() {
        let feb_29 = SessionDate::from_ymd(2024, 2, 29).unwrap();
        let mar_1 = SessionDate::from_ymd(2024, 3, 1).unwrap();
        assert!(feb_29.is_day_before(&mar_1));
        assert_eq!(mar_1.pred(), feb_29);
        assert!(!mar_1.is_day_before(&feb_29));
    }

    #[test]
    fn test_serde_round_trip_uses_locale_form() {
        let date = SessionDate::from_ymd(2024, 1, 1).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"1/1/2024\"");
    }
}
