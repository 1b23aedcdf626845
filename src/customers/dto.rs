use serde::Deserialize;

/// Request body for customer registration. `password` is the base64 RSA
/// ciphertext, as everywhere else on the credential path.
#[derive(Debug, Deserialize)]
pub struct NewCustomer {
    pub mail: String,
    pub password: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub zip: Option<i32>,
    pub phone: Option<String>,
}

/// Request body for profile updates. Credentials change through `/users`
/// or the recovery flow, never here.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomer {
    pub mail: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub zip: Option<i32>,
    pub phone: Option<String>,
}
