/**
 * User Model
 *
 * The account record. The password hash is carried for the store layer but
 * never serialized, so a `User` can be returned to clients as-is.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// User struct representing an account in the store
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID)
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Gravatar URL derived from the email
    pub avatar: String,
    pub birthday: NaiveDate,
    pub gender: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new account; the avatar is derived from the email
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        birthday: NaiveDate,
        gender: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            avatar: gravatar_url(&email),
            first_name,
            last_name,
            email,
            password_hash,
            birthday,
            gender,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown on posts and comments
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Public slice of a user, embedded into profile responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Gravatar URL for an email address
///
/// 200px, PG-rated, falling back to the "mystery man" silhouette.
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}
