use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::{translate, AppError, Op};

/// Role tag carried by every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Customer,
    Admin,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub mail: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user_type: UserType,
}

pub async fn create_user(
    db: &PgPool,
    mail: &str,
    password_hash: &str,
    user_type: UserType,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (mail, password_hash, user_type)
        VALUES ($1, $2, $3)
        RETURNING mail, password_hash, created_at, user_type
        "#,
    )
    .bind(mail)
    .bind(password_hash)
    .bind(user_type)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Create, "user", e))
}

pub async fn update_user(
    db: &PgPool,
    mail: &str,
    password_hash: &str,
    user_type: UserType,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET password_hash = $2, user_type = $3
        WHERE mail = $1
        RETURNING mail, password_hash, created_at, user_type
        "#,
    )
    .bind(mail)
    .bind(password_hash)
    .bind(user_type)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Update, "user", e))
}

/// Replaces only the stored hash; used by the recovery flow.
pub async fn update_password(db: &PgPool, mail: &str, password_hash: &str) -> Result<(), AppError> {
    sqlx::query_as::<_, (String,)>(
        r#"
        UPDATE users
        SET password_hash = $2
        WHERE mail = $1
        RETURNING mail
        "#,
    )
    .bind(mail)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map(|_| ())
    .map_err(|e| translate(Op::Update, "user", e))
}

pub async fn delete_user(db: &PgPool, mail: &str) -> Result<(), AppError> {
    sqlx::query_as::<_, (String,)>(
        r#"
        DELETE FROM users
        WHERE mail = $1
        RETURNING mail
        "#,
    )
    .bind(mail)
    .fetch_one(db)
    .await
    .map(|_| ())
    .map_err(|e| translate(Op::Delete, "user", e))
}

pub async fn find_by_mail(db: &PgPool, mail: &str) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT mail, password_hash, created_at, user_type
        FROM users
        WHERE mail = $1
        "#,
    )
    .bind(mail)
    .fetch_one(db)
    .await
    .map_err(|e| translate(Op::Read, "user", e))
}
