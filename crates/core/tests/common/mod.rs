#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Barrier;
use chrono::{DateTime, Utc};
use slotwise_core::errors::{SchedulingError, SchedulingResult};
use slotwise_core::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use slotwise_core::store::AppointmentStore;
use uuid::Uuid;

/// Minimal store for exercising the engine and booking rules.
#[derive(Default)]
pub struct FakeStore {
    pub appointments: Mutex<Vec<Appointment>>,
    pub range_queries: AtomicUsize,
}

impl FakeStore {
    pub fn with(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Mutex::new(appointments),
            range_queries: AtomicUsize::new(0),
        }
    }

    pub fn range_queries(&self) -> usize {
        self.range_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AppointmentStore for FakeStore {
    async fn active_appointments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<Vec<Appointment>> {
        self.range_queries.fetch_add(1, Ordering::SeqCst);
        let appointments = self.appointments.lock().unwrap();
        Ok(appointments
            .iter()
            .filter(|a| a.overlaps(start, end))
            .cloned()
            .collect())
    }

    async fn insert_if_available(
        &self,
        new: NewAppointment,
    ) -> SchedulingResult<Appointment> {
        let mut appointments = self.appointments.lock().unwrap();
        if appointments
            .iter()
            .any(|a| a.overlaps(new.scheduled_date, new.ends_at()))
        {
            return Err(SchedulingError::Conflict("taken".to_string()));
        }
        let appointment = Appointment {
            id: Uuid::new_v4(),
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            customer_phone: new.customer_phone,
            customer_address: new.customer_address,
            service_type: new.service_type,
            scheduled_date: new.scheduled_date,
            duration_minutes: new.duration_minutes,
            status: AppointmentStatus::Scheduled,
            notes: new.notes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn get_appointment(&self, id: Uuid) -> SchedulingResult<Option<Appointment>> {
        let appointments = self.appointments.lock().unwrap();
        Ok(appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> SchedulingResult<Option<Appointment>> {
        let mut appointments = self.appointments.lock().unwrap();
        Ok(appointments
            .iter_mut()
            .find(|a| a.id == id && a.status == expected)
            .map(|a| {
                a.status = status;
                a.updated_at = Utc::now();
                a.clone()
            }))
    }
}

/// Holds every `get_appointment` call until `readers` calls are waiting, so
/// concurrent status changes all read the same starting state.
pub struct LockstepStore {
    pub inner: FakeStore,
    barrier: Barrier,
}

impl LockstepStore {
    pub fn new(inner: FakeStore, readers: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(readers),
        }
    }
}

#[async_trait]
impl AppointmentStore for LockstepStore {
    async fn active_appointments_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<Vec<Appointment>> {
        self.inner.active_appointments_between(start, end).await
    }

    async fn insert_if_available(
        &self,
        new: NewAppointment,
    ) -> SchedulingResult<Appointment> {
        self.inner.insert_if_available(new).await
    }

    async fn get_appointment(&self, id: Uuid) -> SchedulingResult<Option<Appointment>> {
        let found = self.inner.get_appointment(id).await;
        self.barrier.wait().await;
        found
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: AppointmentStatus,
        status: AppointmentStatus,
    ) -> SchedulingResult<Option<Appointment>> {
        self.inner.update_status(id, expected, status).await
    }
}

pub fn appointment_at(scheduled_date: DateTime<Utc>, status: AppointmentStatus) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        customer_name: "Sam Okafor".to_string(),
        customer_email: None,
        customer_phone: "+15550001111".to_string(),
        customer_address: Some("12 Elm St".to_string()),
        service_type: Some("AC tune-up".to_string()),
        scheduled_date,
        duration_minutes: 60,
        status,
        notes: None,
        created_at: scheduled_date,
        updated_at: scheduled_date,
    }
}
