//! DevConnect - Main Library
//!
//! DevConnect is the REST back end of a small developer social network:
//! accounts, developer profiles with experience and education history, and
//! a post feed with likes and comments.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire and domain types
//!   - `User`, `Profile`, `Post` documents and their in-place mutations
//!   - Application configuration
//!   - Shared error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and router
//!   - Token service and authentication middleware
//!   - Profile and post handlers
//!   - Document store (PostgreSQL or in-memory)
//!
//! # Usage
//!
//! ```rust,no_run
//! use devconnect::backend::server::init::create_app;
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
//!
//! # Error Handling
//!
//! - `SharedError` for validation and serialization failures in `shared`
//! - `BackendError` for everything a handler can answer with; it converts
//!   itself into a JSON response with the right status code

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
