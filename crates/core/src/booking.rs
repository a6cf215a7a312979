//! Booking submission and status changes.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::availability::AvailabilityEngine;
use crate::errors::{SchedulingError, SchedulingResult};
use crate::models::appointment::{
    Appointment, AppointmentStatus, BookAppointmentRequest, DEFAULT_DURATION_MINUTES,
    NewAppointment,
};
use crate::store::AppointmentStore;

/// Checks a booking request and turns it into a [`NewAppointment`].
///
/// `appointmentDate` must be the start of a slot the engine would offer; whether
/// that slot is still free is left to the store's atomic insert.
pub fn validate_booking(
    engine: &AvailabilityEngine,
    request: BookAppointmentRequest,
) -> SchedulingResult<NewAppointment> {
    let customer_name = required("customerName", request.customer_name)?;
    let customer_phone = required("customerPhone", request.customer_phone)?;
    let appointment_date = required("appointmentDate", request.appointment_date)?;

    let customer_email = optional(request.customer_email);
    if let Some(email) = &customer_email {
        if !email.contains('@') {
            return Err(SchedulingError::Validation(format!(
                "Invalid customerEmail '{}'",
                email
            )));
        }
    }

    let scheduled_date = DateTime::parse_from_rfc3339(&appointment_date)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| {
            SchedulingError::Validation(format!(
                "Invalid appointmentDate '{}': expected an ISO 8601 timestamp",
                appointment_date
            ))
        })?;

    if engine.slot_starting_at(scheduled_date).is_none() {
        return Err(SchedulingError::Validation(format!(
            "{} is not a bookable slot within business hours",
            scheduled_date.to_rfc3339()
        )));
    }

    Ok(NewAppointment {
        customer_name,
        customer_email,
        customer_phone,
        customer_address: optional(request.customer_address),
        service_type: optional(request.service_type),
        scheduled_date,
        duration_minutes: DEFAULT_DURATION_MINUTES,
        notes: optional(request.notes),
    })
}

/// Validates and persists a booking.
pub async fn book_appointment(
    engine: &AvailabilityEngine,
    store: &dyn AppointmentStore,
    request: BookAppointmentRequest,
) -> SchedulingResult<Appointment> {
    let new_appointment = validate_booking(engine, request)?;
    let appointment = store.insert_if_available(new_appointment).await?;

    info!(
        appointment_id = %appointment.id,
        scheduled_date = %appointment.scheduled_date,
        "appointment booked"
    );

    Ok(appointment)
}

/// Moves an appointment to `requested` if the transition is allowed.
pub async fn change_status(
    store: &dyn AppointmentStore,
    id: Uuid,
    requested: &str,
) -> SchedulingResult<Appointment> {
    let next: AppointmentStatus = requested.parse()?;

    let current = find_appointment(store, id).await?;
    if !current.status.can_transition_to(next) {
        return Err(SchedulingError::Conflict(format!(
            "Cannot change appointment {} from {} to {}",
            id, current.status, next
        )));
    }

    let updated = store
        .update_status(id, current.status, next)
        .await?
        .ok_or_else(|| {
            SchedulingError::Conflict(format!(
                "Appointment {} changed status concurrently; expected {}",
                id, current.status
            ))
        })?;

    info!(appointment_id = %id, from = %current.status, to = %next, "appointment status changed");

    Ok(updated)
}

pub async fn find_appointment(
    store: &dyn AppointmentStore,
    id: Uuid,
) -> SchedulingResult<Appointment> {
    store
        .get_appointment(id)
        .await?
        .ok_or_else(|| SchedulingError::NotFound(format!("Appointment with ID {} not found", id)))
}

fn required(field: &str, value: Option<String>) -> SchedulingResult<String> {
    optional(value).ok_or_else(|| SchedulingError::Validation(format!("{} is required", field)))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
