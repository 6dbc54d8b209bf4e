/**
 * Server Initialization
 *
 * Builds the Axum application from configuration:
 * 1. Load the store (PostgreSQL or in-memory)
 * 2. Create the token service from the configured secret
 * 3. Create the GitHub client
 * 4. Create the router
 *
 * `build_app` takes a ready-made `AppState`; the integration tests use it
 * to run the full router over a `MemoryStore`.
 */

use axum::Router;

use crate::backend::auth::sessions::TokenService;
use crate::backend::profile::github::GithubClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// Fails when `DATABASE_URL` is set but the database cannot be reached.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing devconnect backend server");

    let store = load_store(config).await?;
    let tokens = TokenService::new(&config.jwt_secret);
    let github = GithubClient::from_config(config);

    Ok(build_app(AppState::new(store, tokens, github)))
}

/// Create the router over an existing state
pub fn build_app(app_state: AppState) -> Router<()> {
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
