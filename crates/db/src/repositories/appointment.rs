use crate::models::DbAppointment;
use chrono::{DateTime, Utc};
use eyre::Result;
use slotwise_core::models::appointment::{AppointmentStatus, NewAppointment};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Key for the transaction-scoped advisory lock that serializes bookings.
const BOOKING_LOCK_KEY: i64 = 0x5107_b00c;

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

const APPOINTMENT_COLUMNS: &str = "id, customer_name, customer_email, customer_phone, \
    customer_address, service_type, scheduled_date, duration_minutes, status, notes, \
    created_at, updated_at";

pub async fn get_active_appointments_between(
    pool: &Pool<Postgres>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE status NOT IN ('cancelled', 'completed')
          AND scheduled_date < $2
          AND scheduled_date + make_interval(mins => duration_minutes) > $1
        ORDER BY scheduled_date ASC
        "#
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

/// Inserts a `scheduled` appointment unless an active one overlaps it.
///
/// The overlap check and the insert share one transaction holding an advisory
/// lock, so two concurrent bookings for the same range cannot both succeed.
/// Returns `Ok(None)` when the range is taken.
pub async fn create_appointment_if_free(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<Option<DbAppointment>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(BOOKING_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let conflicting = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM appointments
        WHERE status NOT IN ('cancelled', 'completed')
          AND scheduled_date < $2
          AND scheduled_date + make_interval(mins => duration_minutes) > $1
        LIMIT 1
        "#,
    )
    .bind(appointment.scheduled_date)
    .bind(appointment.ends_at())
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(existing) = conflicting {
        tracing::debug!(
            "Slot {} already held by appointment {}",
            appointment.scheduled_date,
            existing
        );
        tx.rollback().await?;
        return Ok(None);
    }

    let inserted = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (
            id, customer_name, customer_email, customer_phone, customer_address,
            service_type, scheduled_date, duration_minutes, status, notes,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&appointment.customer_name)
    .bind(&appointment.customer_email)
    .bind(&appointment.customer_phone)
    .bind(&appointment.customer_address)
    .bind(&appointment.service_type)
    .bind(appointment.scheduled_date)
    .bind(appointment.duration_minutes)
    .bind(AppointmentStatus::Scheduled.as_str())
    .bind(&appointment.notes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(row) => {
            tx.commit().await?;
            Ok(Some(row))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            tx.rollback().await?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: AppointmentStatus,
    status: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    // Matching on the old status makes this a compare-and-swap; no row means
    // someone else moved the appointment first.
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2, updated_at = $3
        WHERE id = $1 AND status = $4
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .bind(expected.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
