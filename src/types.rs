//! Shared types used across the pipeline.
//!
//! [`TripDate`] is the key everything else hangs off: manifest rows, day
//! folders, page filenames and navigation links all spell a day the same
//! way, as eight digits (`20210818`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date '{0}': expected YYYYMMDD")]
pub struct InvalidDate(pub String);

/// A calendar day of the trip, written `YYYYMMDD`.
///
/// Ordering is chronological, which for the fixed-width digit form is the
/// same as lexicographic ordering of the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TripDate(NaiveDate);

impl TripDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Long-form display: `Wednesday August 18, 2021`.
    pub fn long_form(&self) -> String {
        self.0.format("%A %B %-d, %Y").to_string()
    }

    /// Filename of this day's page, e.g. `20210818.html`.
    pub fn page_name(&self) -> String {
        format!("{}.html", self)
    }
}

impl FromStr for TripDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(Self)
            .map_err(|_| InvalidDate(s.to_string()))
    }
}

impl TryFrom<String> for TripDate {
    type Error = InvalidDate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TripDate> for String {
    fn from(date: TripDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for TripDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eight_digit_date() {
        let d: TripDate = "20210818".parse().unwrap();
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2021, 8, 18).unwrap());
        assert_eq!(d.to_string(), "20210818");
    }

    #[test]
    fn long_form_has_weekday_month_day_year() {
        let d: TripDate = "20210818".parse().unwrap();
        assert_eq!(d.long_form(), "Wednesday August 18, 2021");
    }

    #[test]
    fn long_form_does_not_pad_single_digit_day() {
        let d: TripDate = "20210801".parse().unwrap();
        assert_eq!(d.long_form(), "Sunday August 1, 2021");
    }

    #[test]
    fn page_name_uses_digit_form() {
        let d: TripDate = "20210820".parse().unwrap();
        assert_eq!(d.page_name(), "20210820.html");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!("2021818".parse::<TripDate>().is_err());
        assert!("202108180".parse::<TripDate>().is_err());
    }

    #[test]
    fn rejects_separators() {
        assert!("2021-08-1".parse::<TripDate>().is_err());
    }

    #[test]
    fn rejects_impossible_calendar_day() {
        let err = "20210231".parse::<TripDate>().unwrap_err();
        assert_eq!(err, InvalidDate("20210231".to_string()));
    }

    #[test]
    fn orders_chronologically() {
        let a: TripDate = "20211231".parse().unwrap();
        let b: TripDate = "20220101".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn serializes_as_digit_string() {
        let d: TripDate = "20210818".parse().unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), r#""20210818""#);
        let back: TripDate = serde_json::from_str(r#""20210818""#).unwrap();
        assert_eq!(back, d);
    }
}
