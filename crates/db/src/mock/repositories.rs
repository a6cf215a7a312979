use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use slotwise_core::errors::SchedulingResult;
use slotwise_core::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use slotwise_core::store::AppointmentStore;
use uuid::Uuid;

// Mock store for testing
mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentStore for AppointmentRepo {
        async fn active_appointments_between(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> SchedulingResult<Vec<Appointment>>;

        async fn insert_if_available(
            &self,
            appointment: NewAppointment,
        ) -> SchedulingResult<Appointment>;

        async fn get_appointment(&self, id: Uuid) -> SchedulingResult<Option<Appointment>>;

        async fn update_status(
            &self,
            id: Uuid,
            expected: AppointmentStatus,
            status: AppointmentStatus,
        ) -> SchedulingResult<Option<Appointment>>;
    }
}
