//! Listing date normalization.
//!
//! hls prints dates either as `Mon DD YYYY` or, for recent entries, as
//! `Mon DD HH:MM` with the year omitted. Either column may be padded with
//! double spaces. A date of 1 January 1904 is the HFS epoch and means the
//! time was never set.

use crate::error::{Error, Result};
use crate::objects::{Precision, Timestamp, TimestampName};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;

/// Leap year used to validate `Mon DD HH:MM` text before a year is chosen.
const LEAP_YEAR: i32 = 2000;

/// A parsed listing date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HfsDate {
    /// Wall-clock value
    pub value: NaiveDateTime,
    /// True when the listing showed hours and minutes
    pub has_time: bool,
}

impl HfsDate {
    /// Precision implied by the listing column.
    pub fn precision(&self) -> Precision {
        if self.has_time {
            Precision::minute()
        } else {
            Precision::day()
        }
    }

    /// Converts to a named DFXML timestamp.
    pub fn to_timestamp(&self, name: TimestampName) -> Timestamp {
        Timestamp::new(name, self.value, self.precision())
    }
}

/// True for the HFS epoch date (1904-01-01).
pub fn is_hfs_epoch(date: NaiveDate) -> bool {
    date.year() == 1904 && date.month() == 1 && date.day() == 1
}

/// How the year of a `Mon DD HH:MM` date is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecentYear {
    /// Always this year
    Fixed(i32),
    /// The latest year that does not put the date after this moment
    NotAfter(NaiveDateTime),
}

/// Turns listing date text into [`HfsDate`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    recent: RecentYear,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::relative_to(Local::now().naive_local())
    }
}

impl DateNormalizer {
    /// Creates a normalizer that assigns `reference_year` to `HH:MM` dates.
    pub fn new(reference_year: i32) -> Self {
        Self {
            recent: RecentYear::Fixed(reference_year),
        }
    }

    /// Creates a normalizer that places `HH:MM` dates in the current or
    /// previous year of `now`, whichever keeps them from being later than
    /// `now`.
    pub fn relative_to(now: NaiveDateTime) -> Self {
        Self {
            recent: RecentYear::NotAfter(now),
        }
    }

    /// Year assumed for dates printed without one, when fixed.
    pub fn reference_year(&self) -> Option<i32> {
        match self.recent {
            RecentYear::Fixed(year) => Some(year),
            RecentYear::NotAfter(_) => None,
        }
    }

    /// Parses a date column.
    ///
    /// Returns `Ok(None)` for the HFS epoch sentinel, and for a `HH:MM`
    /// date that does not exist in any candidate year (`Feb 29` outside a
    /// leap year).
    pub fn normalize(&self, raw: &str) -> Result<Option<HfsDate>> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let &[month, day, last] = tokens.as_slice() else {
            return Err(Error::InvalidDate(raw.to_string()));
        };

        if last.contains(':') {
            let text = format!("{} {} {} {}", month, day, LEAP_YEAR, last);
            let template = NaiveDateTime::parse_from_str(&text, "%b %d %Y %H:%M")
                .map_err(|e| Error::InvalidDate(format!("{} ({})", raw, e)))?;
            let Some(value) = self.place_recent(template) else {
                warn!("Listing date {} has no valid year, leaving it unset", raw);
                return Ok(None);
            };
            return Ok(Some(HfsDate {
                value,
                has_time: true,
            }));
        }

        let text = format!("{} {} {}", month, day, last);
        let date = NaiveDate::parse_from_str(&text, "%b %d %Y")
            .map_err(|e| Error::InvalidDate(format!("{} ({})", raw, e)))?;
        if is_hfs_epoch(date) {
            return Ok(None);
        }
        Ok(Some(HfsDate {
            value: date.and_time(NaiveTime::MIN),
            has_time: false,
        }))
    }

    fn place_recent(&self, template: NaiveDateTime) -> Option<NaiveDateTime> {
        match self.recent {
            RecentYear::Fixed(year) => template.with_year(year),
            RecentYear::NotAfter(now) => [now.year(), now.year() - 1]
                .into_iter()
                .filter_map(|year| template.with_year(year))
                .find(|value| *value <= now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_only() {
        let dates = DateNormalizer::new(2024);
        let d = dates.normalize("Jan  5 2001").unwrap().unwrap();
        assert!(!d.has_time);
        assert_eq!(
            d.to_timestamp(TimestampName::Mtime).to_iso8601(),
            "2001-01-05T00:00:00"
        );
        assert_eq!(d.precision(), Precision::day());

        let d = dates.normalize("Dec 31 1999").unwrap().unwrap();
        assert_eq!(d.value.date(), NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
    }

    #[test]
    fn test_epoch_sentinel_is_absent() {
        let dates = DateNormalizer::new(2024);
        assert_eq!(dates.normalize("Jan  1 1904").unwrap(), None);
        assert_eq!(dates.normalize("Jan 1 1904").unwrap(), None);
        assert!(dates.normalize("Jan  2 1904").unwrap().is_some());
    }

    #[test]
    fn test_recent_entry_uses_reference_year() {
        let dates = DateNormalizer::new(2003);
        let d = dates.normalize("Mar  4 12:30").unwrap().unwrap();
        assert!(d.has_time);
        assert_eq!(
            d.to_timestamp(TimestampName::Crtime).to_iso8601(),
            "2003-03-04T12:30:00"
        );
        assert_eq!(d.precision().to_string(), "60s");
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_recent_entry_never_lands_after_now() {
        let dates = DateNormalizer::relative_to(at(2026, 10, 19, 6, 23));
        assert_eq!(dates.reference_year(), None);

        let d = dates.normalize("Dec 31 23:59").unwrap().unwrap();
        assert_eq!(d.value, at(2025, 12, 31, 23, 59));

        let d = dates.normalize("Oct 19 06:00").unwrap().unwrap();
        assert_eq!(d.value, at(2026, 10, 19, 6, 0));

        let d = dates.normalize("Oct 19 07:00").unwrap().unwrap();
        assert_eq!(d.value, at(2025, 10, 19, 7, 0));
    }

    #[test]
    fn test_default_uses_current_clock() {
        let d = DateNormalizer::default()
            .normalize("Dec 31 23:59")
            .unwrap()
            .unwrap();
        assert!(d.value <= Local::now().naive_local());
    }

    #[test]
    fn test_leap_day_without_leap_year_is_absent() {
        assert_eq!(DateNormalizer::new(2025).normalize("Feb 29 10:00").unwrap(), None);
        let d = DateNormalizer::new(2024)
            .normalize("Feb 29 10:00")
            .unwrap()
            .unwrap();
        assert_eq!(d.value, at(2024, 2, 29, 10, 0));

        let dates = DateNormalizer::relative_to(at(2026, 10, 19, 6, 23));
        assert_eq!(dates.normalize("Feb 29 10:00").unwrap(), None);
        let dates = DateNormalizer::relative_to(at(2025, 1, 10, 0, 0));
        assert_eq!(
            dates.normalize("Feb 29 10:00").unwrap().unwrap().value,
            at(2024, 2, 29, 10, 0)
        );
    }

    #[test]
    fn test_invalid_dates() {
        let dates = DateNormalizer::new(2024);
        assert!(matches!(
            dates.normalize("Foo 12 2001"),
            Err(Error::InvalidDate(_))
        ));
        assert!(dates.normalize("Jan 2001").is_err());
        assert!(dates.normalize("Feb 30 2001").is_err());
        assert!(dates.normalize("Feb 30 10:00").is_err());
        assert!(dates.normalize("Jan  5 25:00").is_err());
    }
}
