use std::path::PathBuf;

use crate::error::AppError;

/// SMTP settings for the account-recovery mailer.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Tripbook <noreply@tripbook.example>`.
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub smtp: SmtpConfig,
    /// Directory holding the RSA key pair used for password transport.
    pub keys_dir: PathBuf,
    /// Length of the generated recovery password.
    pub recovery_password_length: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL is not set".into()))?;

        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".into()),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Tripbook <noreply@tripbook.example>".into()),
        };

        let keys_dir = std::env::var("KEYS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("keys"));

        let recovery_password_length = std::env::var("RECOVERY_PASSWORD_LENGTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            smtp,
            keys_dir,
            recovery_password_length,
        })
    }
}
