use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid month date: expected MM-YYYY")]
    InvalidFormat,
}

/// A calendar month (year + month) with no day-of-month significance.
///
/// This is the only date vocabulary of the service. The wire form is
/// `MM-YYYY` with a zero-padded two-digit month; the database form is a
/// plain date pinned to the first of the month. There is no timezone
/// handling anywhere: these are calendar dates, not instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDate {
    year: i32,
    month: u32,
}

impl MonthDate {
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidFormat);
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl FromStr for MonthDate {
    type Err = DateError;

    /// Accepts exactly two digits, a literal hyphen, four digits.
    /// `1-2024` and `2024-01` are rejected, not coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[2] != b'-' {
            return Err(DateError::InvalidFormat);
        }
        if !bytes[..2].iter().all(u8::is_ascii_digit)
            || !bytes[3..].iter().all(u8::is_ascii_digit)
        {
            return Err(DateError::InvalidFormat);
        }

        let month: u32 = s[..2].parse().map_err(|_| DateError::InvalidFormat)?;
        let year: i32 = s[3..].parse().map_err(|_| DateError::InvalidFormat)?;
        Self::new(year, month)
    }
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl From<NaiveDate> for MonthDate {
    /// Any day-of-month is discarded; only year and month survive.
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl From<MonthDate> for NaiveDate {
    fn from(date: MonthDate) -> Self {
        // month is validated on construction, so day 1 always exists
        NaiveDate::from_ymd_opt(date.year, date.month, 1).unwrap()
    }
}

impl Serialize for MonthDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_months() {
        for month in 1..=12 {
            let date = MonthDate::new(2024, month).unwrap();
            let parsed: MonthDate = date.to_string().parse().unwrap();
            assert_eq!(parsed, date);
        }
    }

    #[test]
    fn test_parse_valid() {
        let date: MonthDate = "01-2024".parse().unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);

        let date: MonthDate = "12-1999".parse().unwrap();
        assert_eq!(date.year(), 1999);
        assert_eq!(date.month(), 12);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["13-2024", "00-2024", "2024-01", "1-2024", "", "01-24", "01/2024", "ab-2024"] {
            assert_eq!(
                input.parse::<MonthDate>(),
                Err(DateError::InvalidFormat),
                "expected rejection of {:?}",
                input
            );
        }
    }

    #[test]
    fn test_display_zero_pads() {
        let date = MonthDate::new(987, 3).unwrap();
        assert_eq!(date.to_string(), "03-0987");
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert_eq!(MonthDate::new(2024, 0), Err(DateError::InvalidFormat));
        assert_eq!(MonthDate::new(2024, 13), Err(DateError::InvalidFormat));
    }

    #[test]
    fn test_naive_date_conversion_discards_day() {
        let date = MonthDate::from(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
        assert_eq!(date, MonthDate::new(2024, 5).unwrap());
        assert_eq!(
            NaiveDate::from(date),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_serde_string_form() {
        let date = MonthDate::new(2024, 2).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"02-2024\"");

        let parsed: MonthDate = serde_json::from_str("\"02-2024\"").unwrap();
        assert_eq!(parsed, date);

        assert!(serde_json::from_str::<MonthDate>("\"2-2024\"").is_err());
    }
}
