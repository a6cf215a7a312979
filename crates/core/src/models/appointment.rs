use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SchedulingError;

/// Length of a booking when the caller does not say otherwise.
pub const DEFAULT_DURATION_MINUTES: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Active appointments occupy their time range; cancelled and completed ones do not.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;

        matches!(
            (self, next),
            (Scheduled, Confirmed)
                | (Scheduled, Cancelled)
                | (Scheduled, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(SchedulingError::Validation(format!(
                "Unknown appointment status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_date + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Half-open overlap between this appointment and `[start, end)`.
    ///
    /// Inactive appointments never overlap anything.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.status.is_active() && self.scheduled_date < end && start < self.ends_at()
    }
}

/// A validated booking ready to be written by an [`AppointmentStore`](crate::store::AppointmentStore).
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub service_type: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_date + Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Body of `POST /api/book-appointment`.
///
/// Every field is optional at the serde level so that missing values surface as
/// validation errors instead of extractor rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub service_type: Option<String>,
    pub appointment_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentResponse {
    pub success: bool,
    pub appointment: Appointment,
    pub sms_sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub success: bool,
    pub appointment_id: Uuid,
}
