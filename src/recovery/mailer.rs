use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::SmtpConfig;
use crate::error::AppError;

pub const RECOVERY_SUBJECT: &str = "Account recovery";

/// Seam over the outbound mail transport so handlers can be exercised
/// without a live SMTP server.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<(), AppError>;
}

/// Mailer backed by a real SMTP connection (STARTTLS) using `lettre`.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn connect(config: &SmtpConfig) -> Result<Self, AppError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| AppError::Config(format!("invalid SMTP_FROM: {e}")))?;
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::Config(format!("SMTP relay {}: {e}", config.host)))?
            .credentials(creds)
            .build();
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: String) -> Result<(), AppError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| AppError::Mail(format!("invalid recipient: {e}")))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| AppError::Mail(format!("build message: {e}")))?;
        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP send: {e}")))?;
        info!("recovery mail sent");
        Ok(())
    }
}

/// HTML body of the recovery mail, embedding the freshly generated password.
pub fn recovery_email_body(password: &str) -> String {
    format!(
        "<body style=\"font-size:16px;color:rgb(51,51,51);\">\
         <table style=\"width:100%;max-width:600px\" align=\"center\"><tr><td>\
         <b style=\"font-size:20px;\">Tripbook</b><br/><br/>\
         Recently, we received a request to reset the account password associated \
         with this email address.<br/><br/>\
         Your new generated login password is: <i><b>{password}</b></i><br/><br/>\
         We recommend that you sign in and change it as soon as possible. \
         If you did not request a password reset, please notify customer support.<br/><br/>\
         <b>NOTE</b>: <i>Do not respond to this email. It does not accept incoming \
         emails.</i></td></tr></table>\
         </body>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_embeds_generated_password() {
        let body = recovery_email_body("aB3@xY9$zQ");
        assert!(body.contains("aB3@xY9$zQ"));
        assert!(body.starts_with("<body"));
    }
}
