/**
 * Registration Handler
 *
 * POST /api/users
 *
 * 1. Validate every field, reporting all failures at once
 * 2. Hash the password with bcrypt
 * 3. Insert the user; the store rejects a taken email
 * 4. Issue a token for the new account
 *
 * The account is only written once the token has been signed, so a signing
 * failure leaves nothing behind.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{RegisterRequest, TokenResponse};
use crate::backend::auth::password::hash_password;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::validation::{is_valid_email, validated, JsonBody, Validator};
use crate::shared::User;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_INVALID: &str = "Please include a valid email address";
pub const PASSWORD_LENGTH: &str = "Please enter a password in range of 6 to 100 characters";
pub const BIRTHDAY_REQUIRED: &str = "Birthday is required";
pub const GENDER_REQUIRED: &str = "gender is required";

const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 100;

/// Registration handler
///
/// # Errors
///
/// * `400` with an `errors` array - validation failed, or "User already exists"
/// * `500` - hashing, signing or store failure
pub async fn register(
    State(app_state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let mut v = Validator::new();

    let first_name = v.required("firstName", request.first_name.as_deref(), NAME_REQUIRED);
    let last_name = v.required("lastName", request.last_name.as_deref(), NAME_REQUIRED);

    let email = request.email.as_deref().unwrap_or_default().trim().to_lowercase();
    v.check(is_valid_email(&email), "email", EMAIL_INVALID);

    let password = request.password.unwrap_or_default();
    let length = password.chars().count();
    v.check(
        (PASSWORD_MIN..=PASSWORD_MAX).contains(&length),
        "password",
        PASSWORD_LENGTH,
    );

    let birthday = v.required_date("birthday", request.birthday.as_deref(), BIRTHDAY_REQUIRED);
    let gender = v.required("gender", request.gender.as_deref(), GENDER_REQUIRED);

    v.finish()?;
    let birthday = validated(birthday, "birthday", BIRTHDAY_REQUIRED)?;

    tracing::info!("Registration request for: {}", email);

    if app_state.store.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("User already exists: {}", email);
        return Err(BackendError::conflict(crate::backend::store::USER_EXISTS_MESSAGE));
    }

    let password_hash = hash_password(&password).await?;
    let user = User::new(first_name, last_name, email, password_hash, birthday, gender);

    let token = app_state.tokens.issue(user.id)?;
    app_state.store.insert_user(&user).await?;

    tracing::info!("User registered: {} ({})", user.id, user.email);

    Ok(Json(TokenResponse { token }))
}
