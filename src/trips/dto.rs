use serde::Deserialize;

use crate::trips::repo::TripType;

#[derive(Debug, Deserialize)]
pub struct NewTrip {
    pub trip_type: TripType,
    pub description: Option<String>,
    #[serde(default)]
    pub city_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTrip {
    pub trip_id: i64,
    pub trip_type: TripType,
    pub description: Option<String>,
    #[serde(default)]
    pub city_ids: Vec<i64>,
}
