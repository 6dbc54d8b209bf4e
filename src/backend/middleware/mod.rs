//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use devconnect::backend::middleware::{auth_middleware, AuthUser};
//! use devconnect::backend::server::state::AppState;
//!
//! async fn whoami(AuthUser(user): AuthUser) -> String {
//!     user.user_id.to_string()
//! }
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/whoami", get(whoami))
//!         .route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, extract_token, AuthUser, AuthenticatedUser, TOKEN_HEADER};
