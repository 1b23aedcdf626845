use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Application-wide error type. The four CRUD variants carry the message of
/// the underlying persistence failure; the remaining variants cover the
/// outcomes the HTTP layer distinguishes.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("create failed: {0}")]
    Create(String),
    #[error("read failed: {0}")]
    Read(String),
    #[error("update failed: {0}")]
    Update(String),
    #[error("delete failed: {0}")]
    Delete(String),
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("mail error: {0}")]
    Mail(String),
    #[error("crypto error: {0}")]
    Crypto(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Create(_)
            | AppError::Read(_)
            | AppError::Update(_)
            | AppError::Delete(_)
            | AppError::Config(_)
            | AppError::Mail(_)
            | AppError::Crypto(_)
            | AppError::Io(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

/// The CRUD operation a repo call was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Create,
    Read,
    Update,
    Delete,
}

impl Op {
    fn wrap(self, message: String) -> AppError {
        match self {
            Op::Create => AppError::Create(message),
            Op::Read => AppError::Read(message),
            Op::Update => AppError::Update(message),
            Op::Delete => AppError::Delete(message),
        }
    }
}

/// Single translation layer for persistence failures, parameterized by the
/// operation kind instead of being reimplemented per entity. A missing row
/// is a 404 regardless of the verb; a uniqueness clash on create is a 409;
/// everything else keeps the operation-typed wrapper and the original
/// message.
pub fn translate(op: Op, entity: &str, err: sqlx::Error) -> AppError {
    error!(entity, op = ?op, error = %err, "database operation failed");
    match err {
        sqlx::Error::RowNotFound => AppError::NotFound,
        err => {
            let unique = err
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if unique && op == Op::Create {
                AppError::Conflict(format!("{entity} already exists"))
            } else {
                op.wrap(format!("{entity}: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeUniqueViolation;

    impl std::fmt::Display for FakeUniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for FakeUniqueViolation {}

    impl sqlx::error::DatabaseError for FakeUniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    fn not_found() -> sqlx::Error {
        sqlx::Error::RowNotFound
    }

    fn backend() -> sqlx::Error {
        sqlx::Error::PoolTimedOut
    }

    fn unique_violation() -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeUniqueViolation))
    }

    #[test]
    fn missing_row_maps_to_not_found_for_every_op() {
        for op in [Op::Create, Op::Read, Op::Update, Op::Delete] {
            assert!(matches!(translate(op, "customer", not_found()), AppError::NotFound));
        }
    }

    #[test]
    fn backend_failure_keeps_operation_kind() {
        assert!(matches!(translate(Op::Create, "city", backend()), AppError::Create(_)));
        assert!(matches!(translate(Op::Read, "city", backend()), AppError::Read(_)));
        assert!(matches!(translate(Op::Update, "city", backend()), AppError::Update(_)));
        assert!(matches!(translate(Op::Delete, "city", backend()), AppError::Delete(_)));
    }

    #[test]
    fn duplicate_key_on_create_is_conflict() {
        assert!(matches!(
            translate(Op::Create, "customer", unique_violation()),
            AppError::Conflict(_)
        ));
    }

    #[test]
    fn duplicate_key_outside_create_keeps_operation_kind() {
        assert!(matches!(
            translate(Op::Update, "customer", unique_violation()),
            AppError::Update(_)
        ));
    }

    #[test]
    fn wrapped_error_carries_entity_and_message() {
        let err = translate(Op::Update, "trip", backend());
        let msg = err.to_string();
        assert!(msg.contains("update failed"), "got: {msg}");
        assert!(msg.contains("trip"), "got: {msg}");
    }
}
