//! PostgreSQL-backed [`AppointmentStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotwise_core::errors::{SchedulingError, SchedulingResult};
use slotwise_core::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use slotwise_core::store::AppointmentStore;
use uuid::Uuid;

use crate::DbPool;
use crate::repositories::appointment;

/// Wraps the process-wide connection pool. Built once in `main` and shared by
/// every request through the API state.
#[derive(Debug, Clone)]
pub struct PgAppointmentStore {
    pool: DbPool,
}

impl PgAppointmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn active_appointments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<Vec<Appointment>> {
        appointment::get_active_appointments_between(&self.pool, start, end)
            .await?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }

    async fn insert_if_available(
        &self,
        new_appointment: NewAppointment,
    ) -> SchedulingResult<Appointment> {
        let scheduled_date = new_appointment.scheduled_date;

        appointment::create_appointment_if_free(&self.pool, &new_appointment)
            .await?
            .ok_or_else(|| {
                SchedulingError::Conflict(format!(
                    "The slot at {} is no longer available",
                    scheduled_date.to_rfc3339()
                ))
            })?
            .try_into()
    }

    async fn get_appointment(&self, id: Uuid) -> SchedulingResult<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> SchedulingResult<Option<Appointment>> {
        appointment::update_appointment_status(&self.pool, id, expected, status)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }
}
