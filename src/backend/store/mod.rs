//! Document Store
//!
//! The handlers' only view of persistence: plain CRUD over users, profiles
//! and posts. Handlers read a document, change it through its model methods
//! and save it back. These read-then-write sequences are not atomic; the
//! only store-level guard is the uniqueness of user emails.
//!
//! # Implementations
//!
//! - **`PgStore`** - PostgreSQL; users are rows, profiles and posts are JSONB documents
//! - **`MemoryStore`** - in-process maps, for tests and for running without a database

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{Post, Profile, User};

/// In-memory store
pub mod memory;

/// PostgreSQL store
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Shared handle to the configured store
pub type DynStore = Arc<dyn Store>;

/// Message of the duplicate-email error
pub const USER_EXISTS_MESSAGE: &str = "User already exists";

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Generic CRUD interface over the three document collections
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new user; fails with `Duplicate` if the email is taken
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Delete a user, returning the removed record
    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// Create or replace the profile of `profile.user`
    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Delete the profile of a user, returning the removed document
    async fn delete_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;

    /// All posts, newest first
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Create or replace a post
    async fn save_post(&self, post: &Post) -> Result<(), StoreError>;

    /// Delete a post, returning the removed document
    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Delete every post owned by a user, returning how many were removed
    async fn delete_posts_by_user(&self, user_id: Uuid) -> Result<u64, StoreError>;
}
