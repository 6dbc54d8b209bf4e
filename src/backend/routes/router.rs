/**
 * Router Configuration
 *
 * Combines the API routes with the health route, CORS, request tracing and
 * a JSON 404 fallback.
 */

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

pub const HEALTH_MESSAGE: &str = "API Running";

/// Create the Axum router with all routes configured
///
/// Any origin may call the API; the token travels in a header, not a
/// cookie.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/", get(health));

    let router = configure_api_routes(router, &app_state);

    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not Found")
}
