use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::trips::dto::{NewTrip, UpdateTrip};
use crate::trips::repo::{self, Trip, TripType};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/trip", get(get_all_trips))
        .route("/trip/:id", get(get_trip_by_id))
        .route("/trip/byTripType/:tripType", get(get_trips_by_type))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/trip", post(create_trip).put(update_trip))
        .route("/trip/:id", delete(delete_trip))
}

#[instrument(skip(state))]
async fn create_trip(
    State(state): State<AppState>,
    Json(body): Json<NewTrip>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let trip = repo::create_trip(
        &state.db,
        body.trip_type,
        body.description.as_deref(),
        &body.city_ids,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

#[instrument(skip(state))]
async fn update_trip(
    State(state): State<AppState>,
    Json(body): Json<UpdateTrip>,
) -> Result<Json<Trip>, AppError> {
    let trip = repo::update_trip(
        &state.db,
        body.trip_id,
        body.trip_type,
        body.description.as_deref(),
        &body.city_ids,
    )
    .await?;
    Ok(Json(trip))
}

#[instrument(skip(state))]
async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    repo::delete_trip(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn get_trip_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(repo::find_by_id(&state.db, id).await?))
}

#[instrument(skip(state))]
async fn get_all_trips(State(state): State<AppState>) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(repo::find_all(&state.db).await?))
}

#[instrument(skip(state))]
async fn get_trips_by_type(
    State(state): State<AppState>,
    Path(trip_type): Path<TripType>,
) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(repo::find_by_trip_type(&state.db, trip_type).await?))
}
