use serde::Deserialize;

use crate::cities::repo::{PopulationType, WeatherType};

#[derive(Debug, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub country: String,
    pub population_type: Option<PopulationType>,
    pub weather_type: Option<WeatherType>,
}
