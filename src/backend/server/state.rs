/**
 * Application State Management
 *
 * `AppState` holds everything the handlers share: the store handle, the
 * token service and the GitHub client. All three are set up once at start-up
 * and only read afterwards.
 *
 * The `FromRef` implementations let handlers extract just the part they
 * need, e.g. `State(store): State<DynStore>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::TokenService;
use crate::backend::profile::github::GithubClient;
use crate::backend::store::DynStore;

/// Central state container for the Axum application
#[derive(Clone)]
pub struct AppState {
    /// Users, profiles and posts
    pub store: DynStore,

    /// Signs and verifies bearer tokens; the secret never changes after start-up
    pub tokens: Arc<TokenService>,

    /// Repository listing proxy
    pub github: GithubClient,
}

impl AppState {
    pub fn new(store: DynStore, tokens: TokenService, github: GithubClient) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            github,
        }
    }
}

impl FromRef<AppState> for DynStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for GithubClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.github.clone()
    }
}
