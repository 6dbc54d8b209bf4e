//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - Store selection (PostgreSQL or in-memory)
//! - **`init`** - App creation
//!
//! # Initialization Flow
//!
//! 1. **Store**: PostgreSQL when `DATABASE_URL` is set, in-memory otherwise
//! 2. **Token Service**: built from `JWT_SECRET`
//! 3. **GitHub Client**: API base URL and optional credentials
//! 4. **Router**: routes, auth middleware, CORS and request tracing
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
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Store selection
pub mod config;

/// Server initialization
pub mod init;

pub use init::{build_app, create_app};
pub use state::AppState;
