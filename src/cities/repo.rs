use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{translate, AppError, Op};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "population_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PopulationType {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "weather_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherType {
    Sunny,
    Rainy,
    Cloudy,
    Windy,
    Stormy,
    Snowy,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub city_id: i64,
    pub name: String,
    pub country: String,
    pub population_type: Option<PopulationType>,
    pub weather_type: Option<WeatherType>,
}

pub async fn create_city(
    db: &PgPool,
    name: &str,
    country: &str,
    population_type: Option<PopulationType>,
    weather_type: Option<WeatherType>,
) -> Result<City, AppError> {
    sqlx::query_as::<_, City>(
        r#"
        INSERT INTO cities (name, country, population_type, weather_type)
        VALUES ($1, $2, $3, $4)
        RETURNING city_id, name, country, population_type, weather_type
        "#,
    )
    .bind(name)
    .bind(country)
    .bind(population_type)
    .bind(weather_type)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Create, "city", e))
}

pub async fn update_city(db: &PgPool, city: &City) -> Result<City, AppError> {
    sqlx::query_as::<_, City>(
        r#"
        UPDATE cities
        SET name = $2, country = $3, population_type = $4, weather_type = $5
        WHERE city_id = $1
        RETURNING city_id, name, country, population_type, weather_type
        "#,
    )
    .bind(city.city_id)
    .bind(&city.name)
    .bind(&city.country)
    .bind(city.population_type)
    .bind(city.weather_type)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Update, "city", e))
}

pub async fn delete_city(db: &PgPool, city_id: i64) -> Result<(), AppError> {
    sqlx::query_as::<_, (i64,)>(
        r#"
        DELETE FROM cities
        WHERE city_id = $1
        RETURNING city_id
        "#,
    )
    .bind(city_id)
    .fetch_one(db)
    .await
    .map(|_| ())
    .map_err(|e| translate(Op::Delete, "city", e))
}

pub async fn find_by_id(db: &PgPool, city_id: i64) -> Result<City, AppError> {
    sqlx::query_as::<_, City>(
        r#"
        SELECT city_id, name, country, population_type, weather_type
        FROM cities
        WHERE city_id = $1
        "#,
    )
    .bind(city_id)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Read, "city", e))
}

pub async fn find_all(db: &PgPool) -> Result<Vec<City>, AppError> {
    sqlx::query_as::<_, City>(
        r#"
        SELECT city_id, name, country, population_type, weather_type
        FROM cities
        ORDER BY city_id
        "#,
    )
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "city", e))
}

pub async fn find_by_country(db: &PgPool, country: &str) -> Result<Vec<City>, AppError> {
    sqlx::query_as::<_, City>(
        r#"
        SELECT city_id, name, country, population_type, weather_type
        FROM cities
        WHERE country = $1
        ORDER BY city_id
        "#,
    )
    .bind(country)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "city", e))
}

pub async fn find_by_population_type(
    db: &PgPool,
    population_type: PopulationType,
) -> Result<Vec<City>, AppError> {
    sqlx::query_as::<_, City>(
        r#"
        SELECT city_id, name, country, population_type, weather_type
        FROM cities
        WHERE population_type = $1
        ORDER BY city_id
        "#,
    )
    .bind(population_type)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "city", e))
}
