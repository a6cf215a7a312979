//! Persistence seam for appointments.
//!
//! The API holds an `Arc<dyn AppointmentStore>` built once at startup. The
//! PostgreSQL implementation lives in `slotwise-db`, as do the in-memory and
//! mock stores used by tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::SchedulingResult;
use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment};

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Active appointments whose time range overlaps `[start, end)`, ordered by start.
    async fn active_appointments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<Vec<Appointment>>;

    /// Writes `appointment` with status `scheduled` unless an active appointment
    /// overlaps it. The overlap check and the write happen atomically.
    ///
    /// Returns `SchedulingError::Conflict` when the range is already taken.
    async fn insert_if_available(
        &self,
        appointment: NewAppointment,
    ) -> SchedulingResult<Appointment>;

    async fn get_appointment(&self, id: Uuid) -> SchedulingResult<Option<Appointment>>;

    /// Moves the appointment from `expected` to `status` in one step.
    ///
    /// Returns `None` when no appointment with `id` is currently in `expected`,
    /// so a concurrent change since the caller's read never gets overwritten.
    /// Transition rules are enforced by the caller.
    async fn update_status(
        &self,
        id: Uuid,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> SchedulingResult<Option<Appointment>>;
}
