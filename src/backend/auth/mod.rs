//! Authentication Module
//!
//! Registration, login, token management and the ownership check shared by
//! every mutating handler.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs        - Module exports and documentation
//! ├── sessions.rs   - Token issuing and verification
//! ├── password.rs   - bcrypt hashing
//! ├── ownership.rs  - require_owner
//! └── handlers/     - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt at a fixed cost
//! - Tokens are HS256 JWTs that expire after one hour
//! - Unknown email and wrong password return the same 401

/// Token issuing and verification
pub mod sessions;

/// Password hashing
pub mod password;

/// Resource ownership checks
pub mod ownership;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, register};
pub use ownership::{require_owner, Owned};
pub use sessions::{TokenError, TokenService};
