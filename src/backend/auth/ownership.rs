/**
 * Ownership Checks
 *
 * A single capability check applied by every handler that removes or
 * changes something owned by a user: posts by their author, comments by
 * their author, profiles by their user.
 */

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthenticatedUser;
use crate::shared::{Comment, Post, Profile};

/// Message returned when the caller does not own the resource
pub const NOT_AUTHORIZED_MESSAGE: &str = "User not authorized";

/// Anything with an owning user
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    fn owner_id(&self) -> Uuid {
        self.user
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.user
    }
}

impl Owned for Profile {
    fn owner_id(&self) -> Uuid {
        self.user
    }
}

/// Fail with `Forbidden` unless `identity` owns `resource`
pub fn require_owner<R: Owned + ?Sized>(
    resource: &R,
    identity: &AuthenticatedUser,
) -> Result<(), BackendError> {
    if resource.owner_id() == identity.user_id {
        Ok(())
    } else {
        tracing::warn!(
            "User {} denied access to resource owned by {}",
            identity.user_id,
            resource.owner_id()
        );
        Err(BackendError::forbidden(NOT_AUTHORIZED_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_owner_passes() {
        let owner = Uuid::new_v4();
        let profile = Profile::new(owner);
        assert!(require_owner(&profile, &AuthenticatedUser { user_id: owner }).is_ok());
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let profile = Profile::new(Uuid::new_v4());
        let err = require_owner(&profile, &AuthenticatedUser { user_id: Uuid::new_v4() })
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message(), NOT_AUTHORIZED_MESSAGE);
    }
}
