use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{instrument, warn};

use crate::error::AppError;
use crate::recovery::crypto::{decrypt_password, generate_hash, generate_password};
use crate::recovery::mailer::{recovery_email_body, RECOVERY_SUBJECT};
use crate::state::AppState;
use crate::users::dto::{NewUser, SignInRequest, UpdateUser};
use crate::users::repo::{self, User};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/users/byMail/:mail", get(get_user_by_mail))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).put(update_user))
        .route("/users/:mail", delete(delete_user))
        .route("/users/signIn", post(sign_in))
        .route("/users/recover/:mail", post(recover_password))
}

#[instrument(skip(state, body))]
async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if !is_valid_email(&body.mail) {
        return Err(AppError::Invalid("malformed email address".into()));
    }
    let plaintext = decrypt_password(&state.private_key, &body.password)?;
    let user = repo::create_user(
        &state.db,
        &body.mail,
        &generate_hash(&plaintext),
        body.user_type,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, body))]
async fn update_user(
    State(state): State<AppState>,
    Json(body): Json<UpdateUser>,
) -> Result<Json<User>, AppError> {
    let plaintext = decrypt_password(&state.private_key, &body.password)?;
    let user = repo::update_user(
        &state.db,
        &body.mail,
        &generate_hash(&plaintext),
        body.user_type,
    )
    .await?;
    Ok(Json(user))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<StatusCode, AppError> {
    repo::delete_user(&state.db, &mail).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
async fn get_user_by_mail(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = repo::find_by_mail(&state.db, &mail).await?;
    Ok(Json(user))
}

/// Verifies the decrypted password against the stored hash. Unknown mail,
/// undecryptable ciphertext and hash mismatch all collapse into 401 so the
/// response does not reveal which part failed.
#[instrument(skip(state, body))]
async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequest>,
) -> Result<Json<User>, AppError> {
    let user = repo::find_by_mail(&state.db, &body.mail)
        .await
        .map_err(|e| match e {
            AppError::NotFound => AppError::Unauthorized,
            other => other,
        })?;
    let plaintext = decrypt_password(&state.private_key, &body.password).map_err(|e| {
        warn!(error = %e, "sign-in ciphertext did not decrypt");
        AppError::Unauthorized
    })?;
    if generate_hash(&plaintext) != user.password_hash {
        return Err(AppError::Unauthorized);
    }
    Ok(Json(user))
}

/// Generates a fresh password, mails it, and only then persists its hash so
/// a failed send leaves the old credentials valid.
#[instrument(skip(state))]
async fn recover_password(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> Result<StatusCode, AppError> {
    let user = repo::find_by_mail(&state.db, &mail).await?;

    let new_password = generate_password(state.config.recovery_password_length);
    let body = recovery_email_body(&new_password);
    state.mailer.send(&user.mail, RECOVERY_SUBJECT, body).await?;

    repo::update_password(&state.db, &user.mail, &generate_hash(&new_password)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
    }

    #[test]
    fn email_validation_rejects_malformed_input() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com "));
        assert!(!is_valid_email("missing@tld"));
    }
}
