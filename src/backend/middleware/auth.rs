/**
 * Authentication Middleware
 *
 * Guards protected routes. The bearer token is read from the `x-auth-token`
 * header, or from `Authorization: Bearer <token>` when that header is
 * absent. A verified token puts an `AuthenticatedUser` into the request
 * extensions; handlers take it back out with the `AuthUser` extractor.
 *
 * Verification is purely cryptographic: signature and expiry. The store is
 * not consulted, so a token outlives the account it was issued for until it
 * expires.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Header carrying the raw token
pub const TOKEN_HEADER: &str = "x-auth-token";

pub const NO_TOKEN_MESSAGE: &str = "No token, authorization denied";

/// Identity resolved from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Authentication middleware
///
/// Returns 401 "No token, authorization denied" without running the
/// handler when no token is sent, and 401 "Token is not valid" when the
/// token fails verification.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Rejected {} {}: no token", request.method(), request.uri().path());
        BackendError::unauthorized(NO_TOKEN_MESSAGE)
    })?;

    let user_id = app_state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        BackendError::from(e)
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Pull the token out of the request headers
///
/// `x-auth-token` wins when both headers are present. Empty values count as
/// no token.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(token) = raw {
        return Some(token.to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`; anywhere else it rejects
/// with the same 401 the middleware would have produced.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized(NO_TOKEN_MESSAGE)
            })?;

        Ok(AuthUser(user))
    }
}
