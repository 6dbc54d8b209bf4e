//! Backend Module
//!
//! The HTTP server: an Axum REST API for developer profiles and a post feed,
//! with token authentication and a pluggable document store.
//!
//! # Architecture
//!
//! - **`server`** - Application state, store selection, app creation
//! - **`routes`** - Router assembly
//! - **`middleware`** - Token authentication for protected routes
//! - **`auth`** - Registration, login, tokens, passwords, ownership checks
//! - **`profile`** - Profiles, experience, education, GitHub proxy
//! - **`posts`** - Posts, likes, comments
//! - **`store`** - `Store` trait with PostgreSQL and in-memory implementations
//! - **`validation`** - Field-level request validation
//! - **`error`** - `BackendError` and its JSON rendering
//!
//! # Request Flow
//!
//! ```text
//! client -> router -> [auth_middleware] -> handler -> Store -> JSON response
//! ```
//!
//! Handlers load a document, mutate it through the model methods in
//! `shared::models` and write it back. Failures are `BackendError`s, which
//! render themselves as `{"msg": ..}` or `{"errors": [..]}`.
//!
//! # Example
//!
//! ```rust,no_run
//! use devconnect::backend::server::create_app;
//! use devconnect::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Profile handlers and GitHub proxy
pub mod profile;

/// Post feed handlers
pub mod posts;

/// Persistence
pub mod store;

/// Request validation helpers
pub mod validation;

pub use error::BackendError;
pub use server::{build_app, create_app, AppState};
pub use store::{DynStore, MemoryStore, PgStore, Store, StoreError};
