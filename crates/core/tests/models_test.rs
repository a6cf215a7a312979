use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use slotwise_core::errors::SchedulingError;
use slotwise_core::models::{
    appointment::{Appointment, AppointmentStatus, BookAppointmentRequest},
    slot::{Slot, SlotResponse},
};
use uuid::Uuid;

fn appointment(status: AppointmentStatus, duration_minutes: i32) -> Appointment {
    let scheduled_date = Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap();
    Appointment {
        id: Uuid::new_v4(),
        customer_name: "Dana Reyes".to_string(),
        customer_email: Some("dana@example.com".to_string()),
        customer_phone: "+15551234567".to_string(),
        customer_address: None,
        service_type: Some("Furnace repair".to_string()),
        scheduled_date,
        duration_minutes,
        status,
        notes: None,
        created_at: scheduled_date,
        updated_at: scheduled_date,
    }
}

#[rstest]
#[case(AppointmentStatus::Scheduled, true)]
#[case(AppointmentStatus::Confirmed, true)]
#[case(AppointmentStatus::Cancelled, false)]
#[case(AppointmentStatus::Completed, false)]
fn test_status_activity(#[case] status: AppointmentStatus, #[case] active: bool) {
    assert_eq!(status.is_active(), active);
}

#[rstest]
#[case(AppointmentStatus::Scheduled, AppointmentStatus::Confirmed, true)]
#[case(AppointmentStatus::Scheduled, AppointmentStatus::Cancelled, true)]
#[case(AppointmentStatus::Scheduled, AppointmentStatus::Completed, true)]
#[case(AppointmentStatus::Confirmed, AppointmentStatus::Completed, true)]
#[case(AppointmentStatus::Confirmed, AppointmentStatus::Scheduled, false)]
#[case(AppointmentStatus::Cancelled, AppointmentStatus::Scheduled, false)]
#[case(AppointmentStatus::Completed, AppointmentStatus::Cancelled, false)]
#[case(AppointmentStatus::Scheduled, AppointmentStatus::Scheduled, false)]
fn test_status_transitions(
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[test]
fn test_status_parsing() {
    assert_eq!(
        "Confirmed".parse::<AppointmentStatus>().unwrap(),
        AppointmentStatus::Confirmed
    );
    assert!(matches!(
        "postponed".parse::<AppointmentStatus>(),
        Err(SchedulingError::Validation(_))
    ));
}

#[test]
fn test_appointment_overlap_is_half_open() {
    let booked = appointment(AppointmentStatus::Scheduled, 60);
    let ten = booked.scheduled_date;

    assert!(booked.overlaps(ten, ten + Duration::hours(1)));
    assert!(!booked.overlaps(ten + Duration::hours(1), ten + Duration::hours(2)));
    assert!(!booked.overlaps(ten - Duration::hours(1), ten));
}

#[test]
fn test_long_appointment_covers_following_hours() {
    let booked = appointment(AppointmentStatus::Confirmed, 150);
    let ten = booked.scheduled_date;

    assert!(booked.overlaps(ten + Duration::hours(2), ten + Duration::hours(3)));
    assert!(!booked.overlaps(ten + Duration::hours(3), ten + Duration::hours(4)));
}

#[test]
fn test_inactive_appointment_never_overlaps() {
    let cancelled = appointment(AppointmentStatus::Cancelled, 60);
    let ten = cancelled.scheduled_date;

    assert!(!cancelled.overlaps(ten, ten + Duration::hours(1)));
}

#[test]
fn test_appointment_serializes_camel_case() {
    let value = to_value(appointment(AppointmentStatus::Scheduled, 60)).unwrap();

    assert_eq!(value["customerName"], json!("Dana Reyes"));
    assert_eq!(value["status"], json!("scheduled"));
    assert_eq!(value["durationMinutes"], json!(60));
}

#[test]
fn test_book_request_accepts_partial_body() {
    let request: BookAppointmentRequest =
        from_str(r#"{"customerName":"Dana","appointmentDate":"2024-06-10T14:00:00Z"}"#).unwrap();

    assert_eq!(request.customer_name.as_deref(), Some("Dana"));
    assert_eq!(request.customer_phone, None);
}

#[test]
fn test_slot_response_format() {
    let slot = Slot {
        date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        starts_at: Utc.with_ymd_and_hms(2024, 6, 10, 13, 0, 0).unwrap(),
        ends_at: Utc.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap(),
    };

    let value = to_value(SlotResponse::from(&slot)).unwrap();

    assert_eq!(
        value,
        json!({
            "date": "2024-06-10",
            "time": "09:00",
            "endTime": "10:00",
            "datetime": "2024-06-10T13:00:00Z"
        })
    );
}
