/**
 * PostgreSQL Store
 *
 * Users live in a relational table with a unique email index. Profiles and
 * posts are stored whole as JSONB documents, with the owning user id (and
 * the post date) pulled out into columns for lookups and ordering.
 */

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{Store, StoreError, USER_EXISTS_MESSAGE};
use crate::shared::{Post, Profile, User};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, avatar, birthday, gender, created_at, updated_at";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the bundled migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, avatar, birthday, gender, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar)
        .bind(user.birthday)
        .bind(&user.gender)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Duplicate(USER_EXISTS_MESSAGE.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_scalar::<_, Json<Profile>>(
            "SELECT document FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile.map(|Json(p)| p))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let profiles = sqlx::query_scalar::<_, Json<Profile>>(
            "SELECT document FROM profiles ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles.into_iter().map(|Json(p)| p).collect())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, document, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET document = EXCLUDED.document
            "#,
        )
        .bind(profile.id)
        .bind(profile.user)
        .bind(Json(profile))
        .bind(profile.date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_profile_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_scalar::<_, Json<Profile>>(
            "DELETE FROM profiles WHERE user_id = $1 RETURNING document",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile.map(|Json(p)| p))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let posts = sqlx::query_scalar::<_, Json<Post>>(
            "SELECT document FROM posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts.into_iter().map(|Json(p)| p).collect())
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_scalar::<_, Json<Post>>("SELECT document FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post.map(|Json(p)| p))
    }

    async fn save_post(&self, post: &Post) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, document, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET document = EXCLUDED.document
            "#,
        )
        .bind(post.id)
        .bind(post.user)
        .bind(Json(post))
        .bind(post.date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let post = sqlx::query_scalar::<_, Json<Post>>(
            "DELETE FROM posts WHERE id = $1 RETURNING document",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post.map(|Json(p)| p))
    }

    async fn delete_posts_by_user(&self, user_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    fn user(email: &str) -> User {
        User::new(
            "Ada".to_string(),
            "Lovelace".to_string(),
            email.to_string(),
            "$2b$10$hash".to_string(),
            NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            "female".to_string(),
        )
    }

    #[sqlx::test]
    #[ignore] // Requires a PostgreSQL DATABASE_URL
    async fn test_users_round_trip_and_reject_duplicate_email(pool: PgPool) {
        let store = PgStore::new(pool);
        let ada = user("ada@example.com");
        store.insert_user(&ada).await.unwrap();

        let found = store.find_user_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, ada.id);
        assert_eq!(found.birthday, ada.birthday);
        assert_eq!(store.find_user_by_id(ada.id).await.unwrap().unwrap().email, ada.email);

        let err = store.insert_user(&user("ada@example.com")).await.unwrap_err();
        assert_matches!(err, StoreError::Duplicate(msg) if msg == USER_EXISTS_MESSAGE);

        assert_eq!(store.delete_user(ada.id).await.unwrap().unwrap().id, ada.id);
        assert!(store.find_user_by_id(ada.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[ignore] // Requires a PostgreSQL DATABASE_URL
    async fn test_profile_is_upserted_per_user(pool: PgPool) {
        let store = PgStore::new(pool);
        let ada = user("ada@example.com");
        store.insert_user(&ada).await.unwrap();

        let mut profile = Profile::new(ada.id);
        profile.status = Some("Developer".to_string());
        store.save_profile(&profile).await.unwrap();

        profile.skills = vec!["Rust".to_string(), "SQL".to_string()];
        store.save_profile(&profile).await.unwrap();

        assert_eq!(store.list_profiles().await.unwrap(), vec![profile.clone()]);
        assert_eq!(store.find_profile_by_user(ada.id).await.unwrap(), Some(profile.clone()));

        assert_eq!(store.delete_profile_by_user(ada.id).await.unwrap(), Some(profile));
        assert!(store.find_profile_by_user(ada.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[ignore] // Requires a PostgreSQL DATABASE_URL
    async fn test_deleting_user_removes_profile(pool: PgPool) {
        let store = PgStore::new(pool);
        let ada = user("ada@example.com");
        store.insert_user(&ada).await.unwrap();
        store.save_profile(&Profile::new(ada.id)).await.unwrap();

        store.delete_user(ada.id).await.unwrap();

        assert!(store.find_profile_by_user(ada.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[ignore] // Requires a PostgreSQL DATABASE_URL
    async fn test_profile_for_missing_user_is_rejected(pool: PgPool) {
        let store = PgStore::new(pool);

        let err = store.save_profile(&Profile::new(Uuid::new_v4())).await.unwrap_err();
        assert_matches!(err, StoreError::Database(_));
    }

    #[sqlx::test]
    #[ignore] // Requires a PostgreSQL DATABASE_URL
    async fn test_posts_newest_first_and_bulk_delete(pool: PgPool) {
        let store = PgStore::new(pool);
        let ada = user("ada@example.com");
        let grace = user("grace@example.com");

        let mut older = Post::new(&ada, "first".to_string());
        older.date -= Duration::minutes(5);
        let newer = Post::new(&ada, "second".to_string());
        let other = Post::new(&grace, "hello".to_string());
        for post in [&older, &newer, &other] {
            store.save_post(post).await.unwrap();
        }

        let texts: Vec<_> = store
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.user == ada.id)
            .map(|p| p.text)
            .collect();
        assert_eq!(texts, vec!["second", "first"]);

        let mut liked = newer.clone();
        liked.like(grace.id).unwrap();
        store.save_post(&liked).await.unwrap();
        assert_eq!(store.find_post(newer.id).await.unwrap(), Some(liked));

        assert_eq!(store.delete_posts_by_user(ada.id).await.unwrap(), 2);
        assert_eq!(store.delete_post(other.id).await.unwrap().map(|p| p.id), Some(other.id));
        assert!(store.list_posts().await.unwrap().is_empty());
    }
}
