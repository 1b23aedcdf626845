use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::cities::repo::City;
use crate::error::{translate, AppError, Op};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "trip_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripType {
    Culture,
    Nature,
    Leisure,
    Sports,
}

/// A trip with its destination cities. The `cities` field is filled by a
/// second query against the join table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trip {
    pub trip_id: i64,
    pub trip_type: TripType,
    pub description: Option<String>,
    #[sqlx(skip)]
    pub cities: Vec<City>,
}

async fn cities_for_trip(db: &PgPool, trip_id: i64) -> Result<Vec<City>, AppError> {
    sqlx::query_as::<_, City>(
        r#"
        SELECT c.city_id, c.name, c.country, c.population_type, c.weather_type
        FROM cities c
        JOIN trip_cities tc ON tc.city_id = c.city_id
        WHERE tc.trip_id = $1
        ORDER BY c.city_id
        "#,
    )
    .bind(trip_id)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "trip", e))
}

async fn attach_cities(db: &PgPool, mut trips: Vec<Trip>) -> Result<Vec<Trip>, AppError> {
    for trip in &mut trips {
        trip.cities = cities_for_trip(db, trip.trip_id).await?;
    }
    Ok(trips)
}

pub async fn create_trip(
    db: &PgPool,
    trip_type: TripType,
    description: Option<&str>,
    city_ids: &[i64],
) -> Result<Trip, AppError> {
    let mut tx = db
        .begin()
        .await
        .map_err(|e| translate(Op::Create, "trip", e))?;

    let mut trip = sqlx::query_as::<_, Trip>(
        r#"
        INSERT INTO trips (trip_type, description)
        VALUES ($1, $2)
        RETURNING trip_id, trip_type, description
        "#,
    )
    .bind(trip_type)
    .bind(description)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| translate(Op::Create, "trip", e))?;

    for city_id in city_ids {
        sqlx::query(
            r#"
            INSERT INTO trip_cities (trip_id, city_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(trip.trip_id)
        .bind(city_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| translate(Op::Create, "trip", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| translate(Op::Create, "trip", e))?;

    trip.cities = cities_for_trip(db, trip.trip_id).await?;
    Ok(trip)
}

/// Updates the trip fields and replaces its city set in one transaction.
pub async fn update_trip(
    db: &PgPool,
    trip_id: i64,
    trip_type: TripType,
    description: Option<&str>,
    city_ids: &[i64],
) -> Result<Trip, AppError> {
    let mut tx = db
        .begin()
        .await
        .map_err(|e| translate(Op::Update, "trip", e))?;

    let mut trip = sqlx::query_as::<_, Trip>(
        r#"
        UPDATE trips
        SET trip_type = $2, description = $3
        WHERE trip_id = $1
        RETURNING trip_id, trip_type, description
        "#,
    )
    .bind(trip_id)
    .bind(trip_type)
    .bind(description)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| translate(Op::Update, "trip", e))?;

    sqlx::query("DELETE FROM trip_cities WHERE trip_id = $1")
        .bind(trip_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| translate(Op::Update, "trip", e))?;

    for city_id in city_ids {
        sqlx::query(
            r#"
            INSERT INTO trip_cities (trip_id, city_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(trip_id)
        .bind(city_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| translate(Op::Update, "trip", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| translate(Op::Update, "trip", e))?;

    trip.cities = cities_for_trip(db, trip.trip_id).await?;
    Ok(trip)
}

/// Deleting the trip cascades to its join rows and bookings.
pub async fn delete_trip(db: &PgPool, trip_id: i64) -> Result<(), AppError> {
    sqlx::query_as::<_, (i64,)>(
        r#"
        DELETE FROM trips
        WHERE trip_id = $1
        RETURNING trip_id
        "#,
    )
    .bind(trip_id)
    .fetch_one(db)
    .await
    .map(|_| ())
    .map_err(|e| translate(Op::Delete, "trip", e))
}

pub async fn find_by_id(db: &PgPool, trip_id: i64) -> Result<Trip, AppError> {
    let mut trip = sqlx::query_as::<_, Trip>(
        r#"
        SELECT trip_id, trip_type, description
        FROM trips
        WHERE trip_id = $1
        "#,
    )
    .bind(trip_id)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Read, "trip", e))?;

    trip.cities = cities_for_trip(db, trip.trip_id).await?;
    Ok(trip)
}

pub async fn find_all(db: &PgPool) -> Result<Vec<Trip>, AppError> {
    let trips = sqlx::query_as::<_, Trip>(
        r#"
        SELECT trip_id, trip_type, description
        FROM trips
        ORDER BY trip_id
        "#,
    )
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "trip", e))?;

    attach_cities(db, trips).await
}

pub async fn find_by_trip_type(db: &PgPool, trip_type: TripType) -> Result<Vec<Trip>, AppError> {
    let trips = sqlx::query_as::<_, Trip>(
        r#"
        SELECT trip_id, trip_type, description
        FROM trips
        WHERE trip_type = $1
        ORDER BY trip_id
        "#,
    )
    .bind(trip_type)
    .fetch_all(db)
    .await
    .map_err(|e| translate(Op::Read, "trip", e))?;

    attach_cities(db, trips).await
}
