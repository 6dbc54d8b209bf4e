/**
 * Token Service
 *
 * Issues and verifies signed bearer tokens. A token embeds
 * `{ "user": { "id": .. } }`, the issue time and an expiry one hour later,
 * signed with HS256 and the configured secret. The service holds the keys
 * only; it has no other state, so changing the secret invalidates every
 * outstanding token.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token lifetime in seconds
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Identity embedded in a token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserData {
    pub id: Uuid,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: UserData,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token failures
///
/// `Invalid` and `Expired` both reach the client as the same 401.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is invalid")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Signs and verifies bearer tokens with one process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Issue a token for `user_id`, valid from now
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if signed at `issued_at`
    pub fn issue_at(&self, user_id: Uuid, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            user: UserData { id: user_id },
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify a token and return the user it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        Ok(data.claims.user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        assert!(!token.is_empty());
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_token_claims_shape() {
        let service = TokenService::new("test-secret");
        let user_id = Uuid::new_v4();
        let token = service.issue(user_id).unwrap();

        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        assert_eq!(data.claims["user"]["id"], user_id.to_string());
        let iat = data.claims["iat"].as_i64().unwrap();
        let exp = data.claims["exp"].as_i64().unwrap();
        assert_eq!(exp - iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_expired_token() {
        let service = TokenService::new("test-secret");
        let issued_at = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 5);
        let token = service.issue_at(Uuid::new_v4(), issued_at).unwrap();

        assert_matches!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_still_valid_just_before_expiry() {
        let service = TokenService::new("test-secret");
        let user_id = Uuid::new_v4();
        let issued_at = Utc::now() - Duration::seconds(TOKEN_TTL_SECS - 60);
        let token = service.issue_at(user_id, issued_at).unwrap();

        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_rotated_secret_rejects_token() {
        let token = TokenService::new("old-secret").issue(Uuid::new_v4()).unwrap();
        let rotated = TokenService::new("new-secret");

        assert_matches!(rotated.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_verify_garbage() {
        let service = TokenService::new("test-secret");
        assert_matches!(service.verify("invalid.token.here"), Err(TokenError::Invalid));
        assert_matches!(service.verify(""), Err(TokenError::Invalid));
    }
}
