use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::cities::dto::NewCity;
use crate::cities::repo::{self, City, PopulationType};
use crate::error::AppError;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/city", get(get_all_cities))
        .route("/city/:id", get(get_city_by_id))
        .route("/city/byCountry/:country", get(get_cities_by_country))
        .route("/city/byPopulationType/:populationType", get(get_cities_by_population_type))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/city", post(create_city).put(update_city))
        .route("/city/:id", delete(delete_city))
}

#[instrument(skip(state))]
async fn create_city(
    State(state): State<AppState>,
    Json(body): Json<NewCity>,
) -> Result<(StatusCode, Json<City>), AppError> {
    let city = repo::create_city(
        &state.db,
        &body.name,
        &body.country,
        body.population_type,
        body.weather_type,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(city)))
}

#[instrument(skip(state))]
async fn update_city(
    State(state): State<AppState>,
    Json(body): Json<City>,
) -> Result<Json<City>, AppError> {
    Ok(Json(repo::update_city(&state.db, &body).await?))
}

#[instrument(skip(state))]
async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    repo::delete_city(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn get_city_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<City>, AppError> {
    Ok(Json(repo::find_by_id(&state.db, id).await?))
}

#[instrument(skip(state))]
async fn get_all_cities(State(state): State<AppState>) -> Result<Json<Vec<City>>, AppError> {
    Ok(Json(repo::find_all(&state.db).await?))
}

#[instrument(skip(state))]
async fn get_cities_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<City>>, AppError> {
    Ok(Json(repo::find_by_country(&state.db, &country).await?))
}

#[instrument(skip(state))]
async fn get_cities_by_population_type(
    State(state): State<AppState>,
    Path(population_type): Path<PopulationType>,
) -> Result<Json<Vec<City>>, AppError> {
    Ok(Json(repo::find_by_population_type(&state.db, population_type).await?))
}
