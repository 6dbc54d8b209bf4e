//! Route Configuration Module
//!
//! - **`router`** - Router assembly: health route, API routes, CORS, tracing, fallback
//! - **`api_routes`** - The REST API and its authentication layers

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
