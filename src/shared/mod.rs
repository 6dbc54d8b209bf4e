//! Shared Module
//!
//! Types shared between the server, the store layer and the tests. All
//! documents serialize to the JSON shape the web client consumes
//! (`_id` identifiers, camelCase user fields).

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// User, profile and post documents
pub mod models;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use models::{
    gravatar_url, parse_date, parse_skills, Comment, Education, Experience, Like, LikeError, Post,
    Profile, ProfileUpdate, PublicUser, Social, User,
};
