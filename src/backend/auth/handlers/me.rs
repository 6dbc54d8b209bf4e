/**
 * Current User Handler
 *
 * GET /api/auth
 *
 * Returns the caller's account record. The password hash is never
 * serialized.
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::store::DynStore;
use crate::shared::User;

pub const USER_NOT_FOUND: &str = "User not found";

/// Current user handler
///
/// A valid token for a deleted account gets `404`.
pub async fn get_me(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
) -> Result<Json<User>, BackendError> {
    let user = store
        .find_user_by_id(identity.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", identity.user_id);
            BackendError::not_found(USER_NOT_FOUND)
        })?;

    Ok(Json(user))
}
