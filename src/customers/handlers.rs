use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::customers::dto::{NewCustomer, UpdateCustomer};
use crate::customers::repo::{self, Customer};
use crate::error::AppError;
use crate::recovery::crypto::{decrypt_password, generate_hash};
use crate::state::AppState;
use crate::users::handlers::is_valid_email;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/customer", get(get_all_customers))
        .route("/customer/byMail/:mail", get(get_customer_by_mail))
        .route("/customer/withTrips", get(get_customers_with_trips))
        .route("/customer/orderByCreationDate", get(get_customers_by_creation_date))
        .route("/customer/oneWeek", get(get_one_week_customers))
        .route("/customer/byAddress/:address", get(get_customers_by_address))
        .route("/customer/byName/:partialName", get(get_customers_by_name))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/customer", post(create_customer).put(update_customer))
        .route("/customer/:mail", delete(delete_customer))
}

#[instrument(skip(state, body))]
async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    if !is_valid_email(&body.mail) {
        return Err(AppError::Invalid("malformed email address".into()));
    }
    let plaintext = decrypt_password(&state.private_key, &body.password)?;
    let customer = repo::create_customer(
        &state.db,
        &body.mail,
        &generate_hash(&plaintext),
        body.name.as_deref(),
        body.address.as_deref(),
        body.zip,
        body.phone.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[instrument(skip(state, body))]
async fn update_customer(
    State(state): State<AppState>,
    Json(body): Json<UpdateCustomer>,
) -> Result<Json<Customer>, AppError> {
    let customer = repo::update_customer(
        &state.db,
        &body.mail,
        body.name.as_deref(),
        body.address.as_deref(),
        body.zip,
        body.phone.as_deref(),
    )
    .await?;
    Ok(Json(customer))
}

#[instrument(skip(state))]
async fn delete_customer(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<StatusCode, AppError> {
    repo::delete_customer(&state.db, &mail).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn get_all_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(repo::find_all(&state.db).await?))
}

#[instrument(skip(state))]
async fn get_customer_by_mail(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(repo::find_by_mail(&state.db, &mail).await?))
}

#[instrument(skip(state))]
async fn get_customers_with_trips(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(repo::find_with_trips(&state.db).await?))
}

#[instrument(skip(state))]
async fn get_customers_by_creation_date(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(repo::find_all_order_by_creation(&state.db).await?))
}

#[instrument(skip(state))]
async fn get_one_week_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(repo::find_one_week(&state.db).await?))
}

#[instrument(skip(state))]
async fn get_customers_by_address(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(repo::find_by_address(&state.db, &address).await?))
}

#[instrument(skip(state))]
async fn get_customers_by_name(
    State(state): State<AppState>,
    Path(partial_name): Path<String>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(repo::find_by_name_containing(&state.db, &partial_name).await?))
}
