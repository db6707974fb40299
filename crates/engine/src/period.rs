//! The (month, year) window a snapshot is aggregated over.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Active aggregation window.
///
/// Changing it has no side effect in the engine: it only tells the API
/// client which snapshot to fetch next. The year is only checked to be
/// positive; the real bound is enforced by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    #[must_use]
    pub const fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// The period containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month) && self.year > 0
    }

    /// Like [`is_valid`](Self::is_valid) but returns a descriptive error.
    pub fn validate(&self) -> ResultEngine<()> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {}",
                self.month
            )));
        }
        if self.year <= 0 {
            return Err(EngineError::InvalidPeriod(format!(
                "year must be positive, got {}",
                self.year
            )));
        }
        Ok(())
    }

    /// The following month. December of `i32::MAX` is the last period and
    /// stays put.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month < 12 {
            return Self::new(self.month + 1, self.year);
        }
        match self.year.checked_add(1) {
            Some(year) => Self::new(1, year),
            None => *self,
        }
    }

    /// The preceding month. January of `i32::MIN` stays put.
    #[must_use]
    pub fn previous(&self) -> Self {
        if self.month > 1 {
            return Self::new(self.month - 1, self.year);
        }
        match self.year.checked_sub(1) {
            Some(year) => Self::new(12, year),
            None => *self,
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_bounds() {
        assert!(Period::new(1, 2025).is_valid());
        assert!(Period::new(12, 1).is_valid());
        assert!(!Period::new(0, 2025).is_valid());
        assert!(!Period::new(13, 2025).is_valid());
        assert!(!Period::new(6, 0).is_valid());
        assert!(!Period::new(6, -3).is_valid());
    }

    #[test]
    fn validate_explains_the_failure() {
        assert!(Period::new(5, 2024).validate().is_ok());
        assert!(matches!(
            Period::new(13, 2024).validate(),
            Err(EngineError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn navigation_rolls_over_years() {
        assert_eq!(Period::new(12, 2024).next(), Period::new(1, 2025));
        assert_eq!(Period::new(1, 2025).previous(), Period::new(12, 2024));
        assert_eq!(Period::new(6, 2025).next(), Period::new(7, 2025));
    }

    #[test]
    fn navigation_stops_at_the_year_bounds() {
        let last = Period::new(12, i32::MAX);
        assert_eq!(last.next(), last);
        assert_eq!(last.previous(), Period::new(11, i32::MAX));

        let first = Period::new(1, i32::MIN);
        assert_eq!(first.previous(), first);
        assert_eq!(first.next(), Period::new(2, i32::MIN));
    }

    #[test]
    fn contains_and_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let period = Period::from_date(date);
        assert_eq!(period, Period::new(2, 2025));
        assert!(period.contains(date));
        assert!(!period.next().contains(date));
        assert_eq!(period.to_string(), "02/2025");
    }
}
