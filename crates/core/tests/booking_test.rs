mod common;

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use slotwise_core::availability::AvailabilityEngine;
use slotwise_core::booking::{book_appointment, change_status, validate_booking};
use slotwise_core::business_hours::BusinessHours;
use slotwise_core::errors::SchedulingError;
use slotwise_core::models::appointment::{AppointmentStatus, BookAppointmentRequest};
use slotwise_core::store::AppointmentStore;
use uuid::Uuid;

use common::{FakeStore, LockstepStore, appointment_at};

fn engine() -> AvailabilityEngine {
    AvailabilityEngine::new(BusinessHours::default(), Tz::UTC)
}

fn request(appointment_date: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        customer_name: Some("  Jordan Lee ".to_string()),
        customer_email: Some("jordan@example.com".to_string()),
        customer_phone: Some("+15557654321".to_string()),
        customer_address: Some("".to_string()),
        service_type: Some("Heat pump install".to_string()),
        appointment_date: Some(appointment_date.to_string()),
        notes: None,
    }
}

#[test]
fn test_validate_booking_normalizes_fields() {
    let new = validate_booking(&engine(), request("2024-06-10T14:00:00Z")).unwrap();

    assert_eq!(new.customer_name, "Jordan Lee");
    assert_eq!(new.customer_address, None);
    assert_eq!(new.duration_minutes, 60);
    assert_eq!(
        new.scheduled_date,
        Utc.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap()
    );
}

#[test]
fn test_validate_booking_requires_contact_fields() {
    let mut missing_name = request("2024-06-10T14:00:00Z");
    missing_name.customer_name = None;
    let mut blank_phone = request("2024-06-10T14:00:00Z");
    blank_phone.customer_phone = Some("   ".to_string());
    let mut missing_date = request("2024-06-10T14:00:00Z");
    missing_date.appointment_date = None;

    for (request, field) in [
        (missing_name, "customerName"),
        (blank_phone, "customerPhone"),
        (missing_date, "appointmentDate"),
    ] {
        match validate_booking(&engine(), request) {
            Err(SchedulingError::Validation(message)) => {
                assert_eq!(message, format!("{} is required", field))
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }
}

#[test]
fn test_validate_booking_rejects_times_outside_business_hours() {
    for date in [
        "2024-06-09T10:00:00Z",
        "2024-06-10T07:00:00Z",
        "2024-06-10T10:15:00Z",
        "tomorrow morning",
    ] {
        assert!(matches!(
            validate_booking(&engine(), request(date)),
            Err(SchedulingError::Validation(_))
        ));
    }
}

#[test]
fn test_validate_booking_rejects_malformed_email() {
    let mut bad_email = request("2024-06-10T14:00:00Z");
    bad_email.customer_email = Some("not-an-email".to_string());

    assert!(matches!(
        validate_booking(&engine(), bad_email),
        Err(SchedulingError::Validation(_))
    ));
}

#[tokio::test]
async fn test_booking_persists_scheduled_appointment() {
    let store = FakeStore::default();

    let appointment = book_appointment(&engine(), &store, request("2024-06-10T14:00:00Z"))
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(store.appointments.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_second_booking_for_same_slot_conflicts() {
    let store = FakeStore::default();

    book_appointment(&engine(), &store, request("2024-06-10T14:00:00Z"))
        .await
        .unwrap();
    let second = book_appointment(&engine(), &store, request("2024-06-10T14:00:00Z")).await;

    assert!(matches!(second, Err(SchedulingError::Conflict(_))));
}

#[tokio::test]
async fn test_booked_slot_disappears_from_availability() {
    let store = FakeStore::default();
    let engine = engine();
    let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    let before = engine.available_slots(&store, day, day).await.unwrap();
    let chosen = before[3].starts_at;

    book_appointment(&engine, &store, request(&chosen.to_rfc3339()))
        .await
        .unwrap();

    let after = engine.available_slots(&store, day, day).await.unwrap();
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|slot| slot.starts_at != chosen));
}

#[tokio::test]
async fn test_change_status_follows_transitions() {
    let ten = Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap();
    let existing = appointment_at(ten, AppointmentStatus::Scheduled);
    let id = existing.id;
    let store = FakeStore::with(vec![existing]);

    let confirmed = change_status(&store, id, "confirmed").await.unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let back = change_status(&store, id, "scheduled").await;
    assert!(matches!(back, Err(SchedulingError::Conflict(_))));

    let unknown = change_status(&store, id, "postponed").await;
    assert!(matches!(unknown, Err(SchedulingError::Validation(_))));
}

#[tokio::test]
async fn test_change_status_of_missing_appointment() {
    let store = FakeStore::default();

    let result = change_status(&store, Uuid::new_v4(), "cancelled").await;

    assert!(matches!(result, Err(SchedulingError::NotFound(_))));
}

#[tokio::test]
async fn test_concurrent_status_changes_from_same_state() {
    let ten = Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap();
    let existing = appointment_at(ten, AppointmentStatus::Scheduled);
    let id = existing.id;
    let store = LockstepStore::new(FakeStore::with(vec![existing]), 2);

    let (cancel, confirm) = tokio::join!(
        change_status(&store, id, "cancelled"),
        change_status(&store, id, "confirmed"),
    );

    // Both read `scheduled`; only the first write may land.
    assert!(cancel.is_ok() != confirm.is_ok());
    let (winner, loser) = match (cancel, confirm) {
        (Ok(winner), loser) | (loser, Ok(winner)) => (winner, loser),
        _ => unreachable!(),
    };
    assert!(matches!(loser, Err(SchedulingError::Conflict(_))));

    let stored = store.inner.get_appointment(id).await.unwrap().unwrap();
    assert_eq!(stored.status, winner.status);
}
