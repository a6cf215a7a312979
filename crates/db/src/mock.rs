//! Test doubles for [`AppointmentStore`].
//!
//! [`InMemoryAppointmentStore`] behaves like the PostgreSQL store without a
//! database; the mockall mocks in [`repositories`] script individual calls,
//! including failures.

pub mod repositories;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotwise_core::errors::{SchedulingError, SchedulingResult};
use slotwise_core::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use slotwise_core::store::AppointmentStore;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: RwLock::new(appointments),
        }
    }

    pub async fn all(&self) -> Vec<Appointment> {
        self.appointments.read().await.clone()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn active_appointments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .iter()
            .filter(|appointment| appointment.overlaps(start, end))
            .cloned()
            .collect();
        found.sort_by_key(|appointment| appointment.scheduled_date);
        Ok(found)
    }

    async fn insert_if_available(
        &self,
        new_appointment: NewAppointment,
    ) -> SchedulingResult<Appointment> {
        // The write lock covers both the check and the push.
        let mut appointments = self.appointments.write().await;

        let (start, end) = (new_appointment.scheduled_date, new_appointment.ends_at());
        if appointments
            .iter()
            .any(|appointment| appointment.overlaps(start, end))
        {
            return Err(SchedulingError::Conflict(format!(
                "The slot at {} is no longer available",
                start.to_rfc3339()
            )));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            customer_name: new_appointment.customer_name,
            customer_email: new_appointment.customer_email,
            customer_phone: new_appointment.customer_phone,
            customer_address: new_appointment.customer_address,
            service_type: new_appointment.service_type,
            scheduled_date: new_appointment.scheduled_date,
            duration_minutes: new_appointment.duration_minutes,
            status: AppointmentStatus::Scheduled,
            notes: new_appointment.notes,
            created_at: now,
            updated_at: now,
        };
        appointments.push(appointment.clone());

        Ok(appointment)
    }

    async fn get_appointment(&self, id: Uuid) -> SchedulingResult<Option<Appointment>> {
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .find(|appointment| appointment.id == id)
            .cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> SchedulingResult<Option<Appointment>> {
        // Compare and swap under the write lock.
        let mut appointments = self.appointments.write().await;

        Ok(appointments
            .iter_mut()
            .find(|appointment| appointment.id == id && appointment.status == expected)
            .map(|appointment| {
                appointment.status = status;
                appointment.updated_at = Utc::now();
                appointment.clone()
            }))
    }
}
