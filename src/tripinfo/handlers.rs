use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::tripinfo::dto::{BookingView, NewTripInfo};
use crate::tripinfo::repo::{self, TripInfo};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/tripinfo/:tripId/:mail", get(get_trip_info))
        .route("/tripinfo/allByTrip/:tripId", get(get_all_by_trip))
        .route("/tripinfo/allByCustomer/:mail", get(get_all_by_customer))
        .route("/tripinfo/active/:mail", get(get_active_by_customer))
        .route("/tripinfo/inactive/:mail", get(get_inactive_by_customer))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/tripinfo", post(create_trip_info).put(update_trip_info))
        .route("/tripinfo/:tripId/:mail", delete(delete_trip_info))
}

fn into_views(records: Vec<TripInfo>) -> Vec<BookingView> {
    let now = OffsetDateTime::now_utc();
    records
        .into_iter()
        .map(|record| BookingView::new(record, now))
        .collect()
}

#[instrument(skip(state))]
async fn create_trip_info(
    State(state): State<AppState>,
    Json(body): Json<NewTripInfo>,
) -> Result<(StatusCode, Json<BookingView>), AppError> {
    let record = repo::create_trip_info(
        &state.db,
        body.trip_id,
        &body.customer_mail,
        body.initial_date,
        body.last_date,
    )
    .await?;
    let view = BookingView::new(record, OffsetDateTime::now_utc());
    Ok((StatusCode::CREATED, Json(view)))
}

#[instrument(skip(state))]
async fn update_trip_info(
    State(state): State<AppState>,
    Json(body): Json<NewTripInfo>,
) -> Result<Json<BookingView>, AppError> {
    let record = repo::update_trip_info(
        &state.db,
        body.trip_id,
        &body.customer_mail,
        body.initial_date,
        body.last_date,
    )
    .await?;
    Ok(Json(BookingView::new(record, OffsetDateTime::now_utc())))
}

#[instrument(skip(state))]
async fn delete_trip_info(
    State(state): State<AppState>,
    Path((trip_id, mail)): Path<(i64, String)>,
) -> Result<StatusCode, AppError> {
    repo::delete_trip_info(&state.db, trip_id, &mail).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn get_trip_info(
    State(state): State<AppState>,
    Path((trip_id, mail)): Path<(i64, String)>,
) -> Result<Json<BookingView>, AppError> {
    let record = repo::find_by_id(&state.db, trip_id, &mail).await?;
    Ok(Json(BookingView::new(record, OffsetDateTime::now_utc())))
}

#[instrument(skip(state))]
async fn get_all_by_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let records = repo::find_all_by_trip(&state.db, trip_id).await?;
    Ok(Json(into_views(records)))
}

#[instrument(skip(state))]
async fn get_all_by_customer(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let records = repo::find_all_by_customer(&state.db, &mail).await?;
    Ok(Json(into_views(records)))
}

#[instrument(skip(state))]
async fn get_active_by_customer(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let records =
        repo::find_active_by_customer(&state.db, &mail, OffsetDateTime::now_utc()).await?;
    Ok(Json(into_views(records)))
}

#[instrument(skip(state))]
async fn get_inactive_by_customer(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let records =
        repo::find_inactive_by_customer(&state.db, &mail, OffsetDateTime::now_utc()).await?;
    Ok(Json(into_views(records)))
}
