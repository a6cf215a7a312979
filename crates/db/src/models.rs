use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotwise_core::errors::SchedulingError;
use slotwise_core::models::appointment::Appointment;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = SchedulingError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            SchedulingError::Database(eyre::eyre!(
                "Appointment {} has unknown status '{}'",
                row.id,
                row.status
            ))
        })?;

        Ok(Appointment {
            id: row.id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            customer_address: row.customer_address,
            service_type: row.service_type,
            scheduled_date: row.scheduled_date,
            duration_minutes: row.duration_minutes,
            status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
