/**
 * In-Memory Store
 *
 * Keeps every collection in a `HashMap` behind a tokio `RwLock`. Used by the
 * test suite and when no `DATABASE_URL` is configured; data is lost when the
 * process exits.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, USER_EXISTS_MESSAGE};
use crate::shared::{Post, Profile, User};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    /// Keyed by owning user
    profiles: RwLock<HashMap<Uuid, Profile>>,
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(USER_EXISTS_MESSAGE.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.write().await.remove(&id))
    }

    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let mut profiles: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by_key(|p| p.date);
        Ok(profiles)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.profiles
            .write()
            .await
            .insert(profile.user, profile.clone());
        Ok(())
    }

    async fn delete_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.write().await.remove(&user_id))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save_post(&self, post: &Post) -> Result<(), StoreError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.write().await.remove(&id))
    }

    async fn delete_posts_by_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|_, post| post.user != user_id);
        Ok((before - posts.len()) as u64)
    }
}
