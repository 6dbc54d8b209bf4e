//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Request and response types
//! ├── register.rs  - POST /api/users
//! ├── login.rs     - POST /api/auth
//! └── me.rs        - GET /api/auth
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: account details → user created → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Me**: token → identity from the middleware → user record returned

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Current user handler
pub mod me;

pub use types::{LoginRequest, RegisterRequest, TokenResponse};

pub use login::login;
pub use me::get_me;
pub use register::register;
