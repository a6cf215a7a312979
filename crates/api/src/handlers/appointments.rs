use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use slotwise_core::{
    booking,
    errors::SchedulingError,
    models::appointment::{
        Appointment, AppointmentStatus, BookAppointmentRequest, BookAppointmentResponse,
        ReminderResponse, UpdateStatusRequest,
    },
};
use slotwise_notify::{templates::Template, NotifyError};
use std::sync::Arc;
use tracing::{error, warn};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookAppointmentRequest>, JsonRejection>,
) -> Result<Json<BookAppointmentResponse>, AppError> {
    let Json(payload) = payload?;
    let appointment =
        booking::book_appointment(&state.engine, state.store.as_ref(), payload).await?;

    // The booking stands even if the text message does not go out.
    let sms_sent = notify_customer(&state, &appointment, Template::Appointment).await;

    Ok(Json(BookAppointmentResponse {
        success: true,
        appointment,
        sms_sent,
    }))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Appointment>, AppError> {
    let Path(id) = id?;
    let appointment = booking::find_appointment(state.store.as_ref(), id).await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Appointment>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let appointment = booking::change_status(state.store.as_ref(), id, &payload.status).await?;

    if appointment.status == AppointmentStatus::Confirmed {
        notify_customer(&state, &appointment, Template::Confirmation).await;
    }

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn send_reminder(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ReminderResponse>, AppError> {
    let Path(id) = id?;
    let appointment = booking::find_appointment(state.store.as_ref(), id).await?;

    if !appointment.status.is_active() {
        return Err(AppError(SchedulingError::Conflict(format!(
            "Appointment {} is {}",
            id, appointment.status
        ))));
    }

    let gateway = state.sms.as_ref().ok_or(NotifyError::NotConfigured)?;
    let body = render_for(&state, &appointment, Template::Reminder);
    gateway.send(&appointment.customer_phone, &body).await?;

    Ok(Json(ReminderResponse {
        success: true,
        appointment_id: id,
    }))
}

/// Best-effort text to the customer. Returns whether the gateway accepted it.
async fn notify_customer(state: &ApiState, appointment: &Appointment, template: Template) -> bool {
    let Some(gateway) = &state.sms else {
        warn!(
            "SMS not configured; skipping {:?} message for appointment {}",
            template, appointment.id
        );
        return false;
    };

    let body = render_for(state, appointment, template);
    match gateway.send(&appointment.customer_phone, &body).await {
        Ok(_) => true,
        Err(e) => {
            error!(
                "Failed to send {:?} message for appointment {}: {}",
                template, appointment.id, e
            );
            false
        }
    }
}

/// Fills `{date}` and `{time}` with the appointment start in the business timezone.
fn render_for(state: &ApiState, appointment: &Appointment, template: Template) -> String {
    let local = appointment
        .scheduled_date
        .with_timezone(&state.engine.timezone());
    let date = local.format("%A, %B %-d").to_string();
    let time = local.format("%-I:%M %p").to_string();

    template.render(&[("date", date.as_str()), ("time", time.as_str())])
}
