/**
 * Authentication Handler Types
 *
 * Request and response bodies for registration, login and the current-user
 * lookup. Request fields are all optional so a missing field surfaces as a
 * field error rather than a deserialization failure.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Plain text; hashed before storage
    pub password: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub birthday: Option<String>,
    pub gender: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by registration and login
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// Bearer token, valid for one hour
    pub token: String,
}
