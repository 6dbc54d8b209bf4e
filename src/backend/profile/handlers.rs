/**
 * Profile Handlers
 *
 * # Routes
 *
 * - `GET /api/profile/me` - caller's profile (auth)
 * - `GET /api/profile` - every profile
 * - `GET /api/profile/user/{id}` - profile of a user
 * - `GET /api/profile/github/{username}` - latest GitHub repositories
 * - `POST /api/profile` - create or update the caller's profile (auth)
 * - `DELETE /api/profile` - delete the caller's profile, account and posts (auth)
 * - `PUT /api/profile/experience` - add an experience entry (auth)
 * - `DELETE /api/profile/experience/{id}` - remove an experience entry (auth)
 * - `PUT /api/profile/education` - add an education entry (auth)
 * - `DELETE /api/profile/education/{id}` - remove an education entry (auth)
 *
 * Read endpoints embed the owner's name and avatar; write endpoints answer
 * with the stored profile as-is.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::auth::handlers::me::USER_NOT_FOUND;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::profile::github::GithubClient;
use crate::backend::profile::types::{
    non_blank, AccountDeleted, EducationRequest, ExperienceRequest, ProfileRequest, ProfileView,
};
use crate::backend::store::DynStore;
use crate::backend::validation::{parse_id, validated, JsonBody, Validator};
use crate::shared::{Education, Experience, Profile};

pub const NO_PROFILE: &str = "There is no profile for this user";
pub const PROFILE_NOT_FOUND: &str = "User Profile Not Found";
pub const NO_SUCH_EXPERIENCE: &str = "There is no such experience in user profile";
pub const NO_SUCH_EDUCATION: &str = "There is no such education in user profile";
pub const INVALID_REQUEST: &str = "Invalid Request";
pub const ACCOUNT_DELETED: &str = "Profile/User deleted";

pub const STATUS_REQUIRED: &str = "Status is required";
pub const SKILLS_REQUIRED: &str = "Skills are required";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const COMPANY_REQUIRED: &str = "Company is required";
pub const FROM_REQUIRED: &str = "From date is required";
pub const SCHOOL_REQUIRED: &str = "School is required";
pub const DEGREE_REQUIRED: &str = "Degree is required";
pub const FIELD_OF_STUDY_REQUIRED: &str = "Field of study is required";

async fn view(store: &DynStore, profile: &Profile) -> Result<ProfileView, BackendError> {
    let owner = store.find_user_by_id(profile.user).await?;
    Ok(ProfileView::new(profile, owner.as_ref())?)
}

async fn own_profile(store: &DynStore, user_id: Uuid) -> Result<Profile, BackendError> {
    store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("No profile for user {}", user_id);
            BackendError::not_found(NO_PROFILE)
        })
}

/// GET /api/profile/me
///
/// A caller without a profile gets `400`, not `404`; the web client relies
/// on that to show the "create profile" prompt.
pub async fn get_my_profile(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ProfileView>, BackendError> {
    let profile = store
        .find_profile_by_user(identity.user_id)
        .await?
        .ok_or_else(|| BackendError::handler(StatusCode::BAD_REQUEST, NO_PROFILE))?;

    Ok(Json(view(&store, &profile).await?))
}

/// GET /api/profile
pub async fn list_profiles(
    State(store): State<DynStore>,
) -> Result<Json<Vec<ProfileView>>, BackendError> {
    let profiles = store.list_profiles().await?;

    let mut views = Vec::with_capacity(profiles.len());
    for profile in &profiles {
        views.push(view(&store, profile).await?);
    }

    Ok(Json(views))
}

/// GET /api/profile/user/{id}
pub async fn get_profile_by_user(
    State(store): State<DynStore>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>, BackendError> {
    let user_id = parse_id(&user_id, PROFILE_NOT_FOUND)?;

    let profile = store
        .find_profile_by_user(user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(PROFILE_NOT_FOUND))?;

    Ok(Json(view(&store, &profile).await?))
}

/// GET /api/profile/github/{username}
pub async fn get_github_repos(
    State(github): State<GithubClient>,
    Path(username): Path<String>,
) -> Result<Json<serde_json::Value>, BackendError> {
    Ok(Json(github.latest_repos(&username).await?))
}

/// POST /api/profile
///
/// Creates the caller's profile on first use and merges into it afterwards.
/// Fields left out or blank keep their stored value, except the social
/// links, which are replaced by exactly the links in this request.
pub async fn upsert_profile(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    JsonBody(request): JsonBody<ProfileRequest>,
) -> Result<Json<Profile>, BackendError> {
    let mut v = Validator::new();
    v.required("status", request.status.as_deref(), STATUS_REQUIRED);
    v.check(
        request.skills.as_ref().is_some_and(|skills| !skills.is_blank()),
        "skills",
        SKILLS_REQUIRED,
    );
    v.finish()?;

    // the token can outlive the account it was issued for
    if store.find_user_by_id(identity.user_id).await?.is_none() {
        tracing::warn!("Profile upsert for missing user {}", identity.user_id);
        return Err(BackendError::not_found(USER_NOT_FOUND));
    }

    let existing = store.find_profile_by_user(identity.user_id).await?;
    let created = existing.is_none();
    let mut profile = existing.unwrap_or_else(|| Profile::new(identity.user_id));

    profile.apply(request.into_update());
    store.save_profile(&profile).await?;

    if created {
        tracing::info!("Profile created for user {}", identity.user_id);
    } else {
        tracing::info!("Profile updated for user {}", identity.user_id);
    }

    Ok(Json(profile))
}

/// DELETE /api/profile
///
/// Removes the caller's profile, account and posts. Answers `404` and
/// deletes nothing unless both the profile and the account exist.
pub async fn delete_account(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
) -> Result<Json<AccountDeleted>, BackendError> {
    let user = store.find_user_by_id(identity.user_id).await?;
    let profile = store.find_profile_by_user(identity.user_id).await?;

    let (Some(user), Some(profile)) = (user, profile) else {
        tracing::warn!("Account deletion for {} found no profile or user", identity.user_id);
        return Err(BackendError::not_found(INVALID_REQUEST));
    };

    let posts = store.delete_posts_by_user(identity.user_id).await?;
    store.delete_profile_by_user(identity.user_id).await?;
    store.delete_user(identity.user_id).await?;

    tracing::info!("Account {} deleted with {} posts", identity.user_id, posts);

    Ok(Json(AccountDeleted {
        msg: ACCOUNT_DELETED,
        user,
        profile,
    }))
}

/// PUT /api/profile/experience
pub async fn add_experience(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    JsonBody(request): JsonBody<ExperienceRequest>,
) -> Result<Json<Profile>, BackendError> {
    let mut v = Validator::new();
    let title = v.required("title", request.title.as_deref(), TITLE_REQUIRED);
    let company = v.required("company", request.company.as_deref(), COMPANY_REQUIRED);
    let from = v.required_date("from", request.from.as_deref(), FROM_REQUIRED);
    let to = v.optional_date("to", request.to.as_deref());
    v.finish()?;

    let entry = Experience {
        id: Uuid::new_v4(),
        title,
        company,
        location: non_blank(request.location),
        from: validated(from, "from", FROM_REQUIRED)?,
        to,
        current: request.current.unwrap_or(false),
        description: non_blank(request.description),
    };

    let mut profile = own_profile(&store, identity.user_id).await?;
    profile.add_experience(entry);
    store.save_profile(&profile).await?;

    tracing::info!("Experience added for user {}", identity.user_id);

    Ok(Json(profile))
}

/// DELETE /api/profile/experience/{id}
pub async fn delete_experience(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    Path(entry_id): Path<String>,
) -> Result<Json<Profile>, BackendError> {
    let entry_id = parse_id(&entry_id, NO_SUCH_EXPERIENCE)?;
    let mut profile = own_profile(&store, identity.user_id).await?;

    if profile.remove_experience(entry_id).is_none() {
        tracing::warn!("Experience {} not in profile of {}", entry_id, identity.user_id);
        return Err(BackendError::not_found(NO_SUCH_EXPERIENCE));
    }
    store.save_profile(&profile).await?;

    Ok(Json(profile))
}

/// PUT /api/profile/education
pub async fn add_education(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    JsonBody(request): JsonBody<EducationRequest>,
) -> Result<Json<Profile>, BackendError> {
    let mut v = Validator::new();
    let school = v.required("school", request.school.as_deref(), SCHOOL_REQUIRED);
    let degree = v.required("degree", request.degree.as_deref(), DEGREE_REQUIRED);
    let fieldofstudy = v.required(
        "fieldofstudy",
        request.fieldofstudy.as_deref(),
        FIELD_OF_STUDY_REQUIRED,
    );
    let from = v.required_date("from", request.from.as_deref(), FROM_REQUIRED);
    let to = v.optional_date("to", request.to.as_deref());
    v.finish()?;

    let entry = Education {
        id: Uuid::new_v4(),
        school,
        degree,
        fieldofstudy,
        from: validated(from, "from", FROM_REQUIRED)?,
        to,
        current: request.current.unwrap_or(false),
        description: non_blank(request.description),
    };

    let mut profile = own_profile(&store, identity.user_id).await?;
    profile.add_education(entry);
    store.save_profile(&profile).await?;

    tracing::info!("Education added for user {}", identity.user_id);

    Ok(Json(profile))
}

/// DELETE /api/profile/education/{id}
pub async fn delete_education(
    State(store): State<DynStore>,
    AuthUser(identity): AuthUser,
    Path(entry_id): Path<String>,
) -> Result<Json<Profile>, BackendError> {
    let entry_id = parse_id(&entry_id, NO_SUCH_EDUCATION)?;
    let mut profile = own_profile(&store, identity.user_id).await?;

    if profile.remove_education(entry_id).is_none() {
        tracing::warn!("Education {} not in profile of {}", entry_id, identity.user_id);
        return Err(BackendError::not_found(NO_SUCH_EDUCATION));
    }
    store.save_profile(&profile).await?;

    Ok(Json(profile))
}
