//! # Availability Handlers
//!
//! `GET /api/availability?startDate=&endDate=&timezone=` lists the hourly slots
//! still open between two calendar days, inclusive.
//!
//! The work is delegated to [`AvailabilityEngine`](slotwise_core::availability::AvailabilityEngine):
//! it walks the days, skips closed weekdays, builds one slot per open hour in the
//! business timezone and drops any slot an active appointment overlaps. Booked
//! appointments are loaded with a single store query for the whole range.
//!
//! The `timezone` parameter is echoed back untouched; it does not shift hours.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use slotwise_core::models::slot::{AvailabilityResponse, SlotResponse};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
///
/// Both bounds are optional at the extractor level so that a missing one is
/// reported as a validation error in the usual JSON shape.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// First day, `YYYY-MM-DD` or an ISO 8601 timestamp
    pub start_date: Option<String>,

    /// Last day (inclusive), same formats as `start_date`
    pub end_date: Option<String>,

    /// Client timezone, informational only
    pub timezone: Option<String>,
}

/// Lists available slots in the requested range
///
/// # Errors
///
/// * `SchedulingError::Validation` - missing or unparseable dates, or a range
///   longer than the configured maximum
/// * `SchedulingError::Database` - the appointment lookup failed
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let (start, end) = state.engine.resolve_range(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        state.max_range_days,
    )?;

    let slots = state
        .engine
        .available_slots(state.store.as_ref(), start, end)
        .await?;

    let timezone = query
        .timezone
        .filter(|tz| !tz.trim().is_empty())
        .unwrap_or_else(|| state.default_client_timezone.clone());

    Ok(Json(AvailabilityResponse {
        success: true,
        timezone,
        slots: slots.iter().map(SlotResponse::from).collect(),
    }))
}
