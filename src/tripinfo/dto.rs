use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::tripinfo::repo::TripInfo;

#[derive(Debug, Deserialize)]
pub struct NewTripInfo {
    pub trip_id: i64,
    pub customer_mail: String,
    #[serde(with = "time::serde::rfc3339")]
    pub initial_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_date: OffsetDateTime,
}

/// Booking as returned to clients, with the activity flag evaluated against
/// the request time.
#[derive(Debug, Serialize)]
pub struct BookingView {
    pub trip_id: i64,
    pub customer_mail: String,
    #[serde(with = "time::serde::rfc3339")]
    pub initial_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_date: OffsetDateTime,
    pub active: bool,
}

impl BookingView {
    pub fn new(record: TripInfo, now: OffsetDateTime) -> Self {
        let active = record.is_active(now);
        Self {
            trip_id: record.trip_id,
            customer_mail: record.customer_mail,
            initial_date: record.initial_date,
            last_date: record.last_date,
            active,
        }
    }
}
