use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Every slot the engine produces is one hour long.
pub const SLOT_MINUTES: i64 = 60;

/// A bookable hour. `date`, `start_time` and `end_time` are wall-clock values in
/// the business timezone; `starts_at` and `ends_at` are the UTC instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Wire form of a slot in the availability response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub date: String,
    pub time: String,
    pub end_time: String,
    pub datetime: DateTime<Utc>,
}

impl From<&Slot> for SlotResponse {
    fn from(slot: &Slot) -> Self {
        SlotResponse {
            date: slot.date.format("%Y-%m-%d").to_string(),
            time: slot.start_time.format("%H:%M").to_string(),
            end_time: slot.end_time.format("%H:%M").to_string(),
            datetime: slot.starts_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub timezone: String,
    pub slots: Vec<SlotResponse>,
}
