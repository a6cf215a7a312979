//! # Availability Engine
//!
//! Turns a date range into the list of hourly slots a customer may still book.
//!
//! ## Algorithm
//!
//! 1. Walk every calendar day in `[start, end]` (inclusive)
//! 2. Look up the weekday in the [`BusinessHours`] table and skip closed days
//! 3. For each whole hour in `[open_hour, close_hour)`, build the wall-clock time
//!    in the business timezone and convert it to UTC
//! 4. Load every active appointment overlapping the whole range with one store
//!    query, then drop each candidate that overlaps one of them
//!
//! Slots come out ordered by date, then by hour. Wall-clock times that do not
//! exist because of a DST gap are skipped; ambiguous ones take the earlier
//! instant.
//!
//! The `timezone` a client sends with its query is never used here. Hours are
//! always read in the business timezone the engine was built with.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::business_hours::BusinessHours;
use crate::errors::{SchedulingError, SchedulingResult};
use crate::models::appointment::Appointment;
use crate::models::slot::{SLOT_MINUTES, Slot};
use crate::store::AppointmentStore;

#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    hours: BusinessHours,
    timezone: Tz,
}

impl AvailabilityEngine {
    pub fn new(hours: BusinessHours, timezone: Tz) -> Self {
        Self { hours, timezone }
    }

    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Every slot business hours allow in `[start, end]`, ignoring bookings.
    pub fn candidate_slots(&self, start: NaiveDate, end: NaiveDate) -> Vec<Slot> {
        let mut slots = Vec::new();

        for day in start.iter_days().take_while(|day| *day <= end) {
            let Some(open) = self.hours.for_weekday(day.weekday()) else {
                continue;
            };

            for hour in open.hours() {
                if let Some(slot) = self.slot_at(day, hour) {
                    slots.push(slot);
                }
            }
        }

        slots
    }

    /// The slot beginning exactly at `instant`, if business hours produce one.
    pub fn slot_starting_at(&self, instant: DateTime<Utc>) -> Option<Slot> {
        let local = instant.with_timezone(&self.timezone);
        if local.minute() != 0 || local.second() != 0 || local.nanosecond() != 0 {
            return None;
        }

        let open = self.hours.for_weekday(local.weekday())?;
        if !open.contains_hour(local.hour()) {
            return None;
        }

        self.slot_at(local.date_naive(), local.hour())
            .filter(|slot| slot.starts_at == instant)
    }

    /// Available slots in `[start, end]`: candidates minus anything an active
    /// appointment overlaps.
    pub async fn available_slots(
        &self,
        store: &dyn AppointmentStore,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SchedulingResult<Vec<Slot>> {
        let candidates = self.candidate_slots(start, end);

        let (Some(first), Some(last)) = (candidates.first(), candidates.last()) else {
            return Ok(candidates);
        };

        let booked = store
            .active_appointments_between(first.starts_at, last.ends_at)
            .await?;

        debug!(
            candidates = candidates.len(),
            booked = booked.len(),
            %start,
            %end,
            "computing availability"
        );

        Ok(exclude_booked(candidates, &booked))
    }

    /// Calendar day of `instant` in the business timezone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Parses a range bound: either `YYYY-MM-DD` or an RFC 3339 timestamp, which
    /// is reduced to its calendar day in the business timezone.
    pub fn parse_day(&self, value: &str) -> SchedulingResult<NaiveDate> {
        let value = value.trim();

        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(date);
        }

        DateTime::parse_from_rfc3339(value)
            .map(|instant| self.local_date(instant.with_timezone(&Utc)))
            .map_err(|_| {
                SchedulingError::Validation(format!(
                    "Invalid date '{}': expected YYYY-MM-DD or an ISO 8601 timestamp",
                    value
                ))
            })
    }

    /// Validates and parses the `startDate`/`endDate` pair of an availability query.
    ///
    /// A reversed range is allowed and simply yields no slots.
    pub fn resolve_range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        max_days: i64,
    ) -> SchedulingResult<(NaiveDate, NaiveDate)> {
        let (Some(start), Some(end)) = (
            start.filter(|s| !s.trim().is_empty()),
            end.filter(|s| !s.trim().is_empty()),
        ) else {
            return Err(SchedulingError::Validation(
                "startDate and endDate are required".to_string(),
            ));
        };

        let start = self.parse_day(start)?;
        let end = self.parse_day(end)?;

        let days = (end - start).num_days() + 1;
        if days > max_days {
            return Err(SchedulingError::Validation(format!(
                "Date range spans {} days; at most {} are allowed",
                days, max_days
            )));
        }

        Ok((start, end))
    }

    fn slot_at(&self, day: NaiveDate, hour: u32) -> Option<Slot> {
        let start_time = NaiveTime::from_hms_opt(hour, 0, 0)?;
        let end_time = NaiveTime::from_hms_opt((hour + 1) % 24, 0, 0)?;

        let starts_at = self
            .timezone
            .from_local_datetime(&day.and_time(start_time))
            .earliest()?
            .with_timezone(&Utc);
        // Slots ending past the last representable instant are dropped.
        let ends_at = starts_at.checked_add_signed(Duration::minutes(SLOT_MINUTES))?;

        Some(Slot {
            date: day,
            start_time,
            end_time,
            starts_at,
            ends_at,
        })
    }
}

/// Drops every candidate that an active appointment overlaps.
pub fn exclude_booked(candidates: Vec<Slot>, booked: &[Appointment]) -> Vec<Slot> {
    candidates
        .into_iter()
        .filter(|slot| {
            !booked
                .iter()
                .any(|appointment| appointment.overlaps(slot.starts_at, slot.ends_at))
        })
        .collect()
}
