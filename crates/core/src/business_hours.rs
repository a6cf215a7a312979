//! # Business Hours
//!
//! A fixed weekly table saying, for each weekday, whether the business is open
//! and between which whole hours. Weekdays are indexed from Sunday (0) to
//! Saturday (6).
//!
//! The table can be written as a compact string, which is how it is read from
//! the `BUSINESS_HOURS` environment variable:
//!
//! ```
//! use slotwise_core::business_hours::BusinessHours;
//!
//! let hours: BusinessHours = "mon=8-17,wed=10-14".parse().unwrap();
//! assert!(hours.for_index(1).is_some());
//! assert!(hours.for_index(2).is_none());
//! ```
//!
//! Days that are not listed are closed.

use std::str::FromStr;

use chrono::Weekday;

use crate::errors::{SchedulingError, SchedulingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenHours {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl OpenHours {
    pub fn new(open_hour: u32, close_hour: u32) -> SchedulingResult<Self> {
        if close_hour > 24 {
            return Err(SchedulingError::Validation(format!(
                "Closing hour {} is past the end of the day",
                close_hour
            )));
        }
        if open_hour >= close_hour {
            return Err(SchedulingError::Validation(format!(
                "Opening hour {} must be before closing hour {}",
                open_hour, close_hour
            )));
        }

        Ok(Self {
            open_hour,
            close_hour,
        })
    }

    /// Whole hours at which a slot may start: `[open_hour, close_hour)`.
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.open_hour..self.close_hour
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessHours {
    days: [Option<OpenHours>; 7],
}

impl BusinessHours {
    /// A table with every day closed.
    pub fn closed() -> Self {
        Self { days: [None; 7] }
    }

    pub fn with_day(mut self, weekday: Weekday, hours: Option<OpenHours>) -> Self {
        self.days[weekday.num_days_from_sunday() as usize] = hours;
        self
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<OpenHours> {
        self.days[weekday.num_days_from_sunday() as usize]
    }

    /// Lookup by numeric weekday, 0 = Sunday. Out-of-range indices are closed.
    pub fn for_index(&self, index: usize) -> Option<OpenHours> {
        self.days.get(index).copied().flatten()
    }

    pub fn open_days(&self) -> usize {
        self.days.iter().filter(|day| day.is_some()).count()
    }
}

impl Default for BusinessHours {
    /// Monday to Friday, 08:00 to 17:00.
    fn default() -> Self {
        let weekday = Some(OpenHours {
            open_hour: 8,
            close_hour: 17,
        });

        Self::closed()
            .with_day(Weekday::Mon, weekday)
            .with_day(Weekday::Tue, weekday)
            .with_day(Weekday::Wed, weekday)
            .with_day(Weekday::Thu, weekday)
            .with_day(Weekday::Fri, weekday)
    }
}

impl FromStr for BusinessHours {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut table = BusinessHours::closed();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (day, range) = entry.split_once('=').ok_or_else(|| {
                SchedulingError::Validation(format!(
                    "Business hours entry '{}' must look like 'mon=8-17'",
                    entry
                ))
            })?;

            let weekday = Weekday::from_str(day.trim()).map_err(|_| {
                SchedulingError::Validation(format!("Unknown weekday '{}'", day.trim()))
            })?;

            let (open, close) = range.split_once('-').ok_or_else(|| {
                SchedulingError::Validation(format!(
                    "Hour range '{}' must look like '8-17'",
                    range
                ))
            })?;

            let open_hour = parse_hour(open)?;
            let close_hour = parse_hour(close)?;

            table = table.with_day(weekday, Some(OpenHours::new(open_hour, close_hour)?));
        }

        Ok(table)
    }
}

fn parse_hour(value: &str) -> SchedulingResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| SchedulingError::Validation(format!("Invalid hour '{}'", value.trim())))
}
