/**
 * API Routes
 *
 * # Authentication
 *
 * Protected endpoints carry `auth_middleware` as a route layer on their own
 * method router, so a path can mix public and protected methods
 * (`GET /api/profile` is public, `POST /api/profile` is not).
 *
 * # Routes
 *
 * ## Users and auth
 * - `POST /api/users` - register
 * - `POST /api/auth` - log in
 * - `GET /api/auth` - current user (auth)
 *
 * ## Profiles
 * - `GET /api/profile` - all profiles
 * - `POST /api/profile` - upsert own profile (auth)
 * - `DELETE /api/profile` - delete own profile, account and posts (auth)
 * - `GET /api/profile/me` - own profile (auth)
 * - `GET /api/profile/user/{id}` - profile by user id
 * - `GET /api/profile/github/{username}` - GitHub repositories
 * - `PUT /api/profile/experience` - add experience (auth)
 * - `DELETE /api/profile/experience/{id}` - remove experience (auth)
 * - `PUT /api/profile/education` - add education (auth)
 * - `DELETE /api/profile/education/{id}` - remove education (auth)
 *
 * ## Posts (all auth)
 * - `GET|POST /api/posts`
 * - `GET|DELETE /api/posts/{id}`
 * - `PUT /api/posts/like/{id}`, `PUT /api/posts/unlike/{id}`
 * - `POST /api/posts/comment/{id}`
 * - `DELETE /api/posts/{id}/comment/{comment_id}`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::posts;
use crate::backend::profile;
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let auth = || from_fn_with_state(app_state.clone(), auth_middleware);

    router
        // Users and auth
        .route("/api/users", post(register))
        .route("/api/auth", post(login))
        .route("/api/auth", get(get_me).route_layer(auth()))
        // Profiles
        .route("/api/profile", get(profile::list_profiles))
        .route(
            "/api/profile",
            post(profile::upsert_profile)
                .delete(profile::delete_account)
                .route_layer(auth()),
        )
        .route(
            "/api/profile/me",
            get(profile::get_my_profile).route_layer(auth()),
        )
        .route("/api/profile/user/{id}", get(profile::get_profile_by_user))
        .route(
            "/api/profile/github/{username}",
            get(profile::get_github_repos),
        )
        .route(
            "/api/profile/experience",
            put(profile::add_experience).route_layer(auth()),
        )
        .route(
            "/api/profile/experience/{id}",
            delete(profile::delete_experience).route_layer(auth()),
        )
        .route(
            "/api/profile/education",
            put(profile::add_education).route_layer(auth()),
        )
        .route(
            "/api/profile/education/{id}",
            delete(profile::delete_education).route_layer(auth()),
        )
        // Posts
        .route(
            "/api/posts",
            get(posts::list_posts)
                .post(posts::create_post)
                .route_layer(auth()),
        )
        .route(
            "/api/posts/{id}",
            get(posts::get_post)
                .delete(posts::delete_post)
                .route_layer(auth()),
        )
        .route(
            "/api/posts/like/{id}",
            put(posts::like_post).route_layer(auth()),
        )
        .route(
            "/api/posts/unlike/{id}",
            put(posts::unlike_post).route_layer(auth()),
        )
        .route(
            "/api/posts/comment/{id}",
            post(posts::add_comment).route_layer(auth()),
        )
        .route(
            "/api/posts/{id}/comment/{comment_id}",
            delete(posts::delete_comment).route_layer(auth()),
        )
}
