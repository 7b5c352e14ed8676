use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::SinteseError;

/// Year and month a synthesis run refers to, pinned to the first instant of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferencePeriod {
    start: NaiveDateTime,
}

impl ReferencePeriod {
    /// Parse `MM/YYYY`. Exactly two month digits and four year digits are accepted.
    pub fn parse(text: &str) -> Result<Self, SinteseError> {
        let invalid = || SinteseError::InvalidPeriod(text.to_string());

        let (month, year) = text.split_once('/').ok_or_else(invalid)?;
        if month.len() != 2
            || year.len() != 4
            || !month.bytes().all(|b| b.is_ascii_digit())
            || !year.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)?;

        // The period is stored as a nanosecond timestamp; reject years it cannot hold.
        start.and_utc().timestamp_nanos_opt().ok_or_else(invalid)?;

        Ok(Self { start })
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Nanoseconds since the Unix epoch, interpreting the period start as UTC.
    pub fn timestamp_nanos(&self) -> i64 {
        // Range is checked in `parse`.
        self.start.and_utc().timestamp_nanos_opt().unwrap_or_default()
    }

    /// `YYYY_MM`, as used in upload keys.
    pub fn key_segment(&self) -> String {
        format!("{:04}_{:02}", self.year(), self.month())
    }
}

impl fmt::Display for ReferencePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month(), self.year())
    }
}

impl FromStr for ReferencePeriod {
    type Err = SinteseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lossless_for_every_month() {
        for year in [1970, 2000, 2024, 2099] {
            for month in 1..=12 {
                let text = format!("{month:02}/{year}");
                let period = ReferencePeriod::parse(&text).unwrap();
                assert_eq!(period.month(), month);
                assert_eq!(period.year(), year);
                assert_eq!(period.to_string(), text);
            }
        }
    }

    #[test]
    fn start_is_first_instant_of_month() {
        let period = ReferencePeriod::parse("03/2024").unwrap();
        assert_eq!(period.start().to_string(), "2024-03-01 00:00:00");
        assert_eq!(period.timestamp_nanos(), 1_709_251_200_000_000_000);
        assert_eq!(period.key_segment(), "2024_03");
    }

    #[test]
    fn rejects_other_formats() {
        for text in [
            "", "3/2024", "13/2024", "00/2024", "03-2024", "2024/03", "03/24", "03/2024 ",
            " 03/2024", "03/2024/01", "ab/2024", "+3/2024", "03/3000",
        ] {
            assert!(
                matches!(ReferencePeriod::parse(text), Err(SinteseError::InvalidPeriod(ref t)) if t == text),
                "accepted {text:?}"
            );
        }
    }
}
