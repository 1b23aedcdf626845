//! Credential transport and recovery: the legacy hash, the RSA password
//! envelope, and the SMTP mailer that delivers regenerated passwords.

pub mod crypto;
pub mod mailer;
