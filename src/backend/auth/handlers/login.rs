/**
 * Login Handler
 *
 * POST /api/auth
 *
 * Looks the user up by email, checks the password against the stored bcrypt
 * hash and issues a fresh token. An unknown email and a wrong password get
 * the same answer.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::password::verify_password;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::validation::JsonBody;

pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500` - store or signing failure
pub async fn login(
    State(app_state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let email = request.email.as_deref().unwrap_or_default().trim().to_lowercase();
    let password = request.password.unwrap_or_default();

    let user = app_state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown email: {}", email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify_password(&password, &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = app_state.tokens.issue(user.id)?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(TokenResponse { token }))
}
