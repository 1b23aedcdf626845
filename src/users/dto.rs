use serde::Deserialize;

use crate::users::repo::UserType;

fn default_user_type() -> UserType {
    UserType::Customer
}

/// Request body for user creation. `password` is the base64-encoded RSA
/// ciphertext of the plaintext password; the server never sees plaintext on
/// the wire.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub mail: String,
    pub password: String,
    #[serde(default = "default_user_type")]
    pub user_type: UserType,
}

/// Request body for user update; replaces password and role. The role must
/// be stated explicitly so an update can never demote an account by
/// omission.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub mail: String,
    pub password: String,
    pub user_type: UserType,
}

/// Request body for sign-in. `password` is encrypted like in [`NewUser`].
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub mail: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_body_requires_an_explicit_role() {
        let body = r#"{"mail":"admin@example.com","password":"AAAA"}"#;
        assert!(serde_json::from_str::<UpdateUser>(body).is_err());
    }

    #[test]
    fn update_body_keeps_the_supplied_role() {
        let body = r#"{"mail":"admin@example.com","password":"AAAA","user_type":"ADMIN"}"#;
        let parsed: UpdateUser = serde_json::from_str(body).expect("body should parse");
        assert_eq!(parsed.user_type, UserType::Admin);
    }

    #[test]
    fn new_user_defaults_to_customer_role() {
        let body = r#"{"mail":"ana@example.com","password":"AAAA"}"#;
        let parsed: NewUser = serde_json::from_str(body).expect("body should parse");
        assert_eq!(parsed.user_type, UserType::Customer);
    }
}
