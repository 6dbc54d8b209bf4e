//! Profile Module
//!
//! Developer profiles: the profile document itself, its experience and
//! education history, and the GitHub repository proxy.

/// HTTP handlers
pub mod handlers;

/// Request and response bodies
pub mod types;

/// GitHub API client
pub mod github;

pub use github::GithubClient;
pub use handlers::{
    add_education, add_experience, delete_account, delete_education, delete_experience,
    get_github_repos, get_my_profile, get_profile_by_user, list_profiles, upsert_profile,
};
