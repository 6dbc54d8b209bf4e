/**
 * Post Model
 *
 * A feed post. Likes and comments are owned by the post and kept
 * newest-first. A user may like a post at most once.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::User;

/// One like; the set of likes holds each user at most once
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Like {
    pub user: Uuid,
}

/// Comment on a post, with a snapshot of the author's name and avatar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Author
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// Post document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Owning user
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    /// Newest first
    #[serde(default)]
    pub likes: Vec<Like>,
    /// Newest first
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub date: DateTime<Utc>,
}

/// Rejected like/unlike transitions
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LikeError {
    #[error("Post already Liked")]
    AlreadyLiked,
    #[error("Post has not yet been liked")]
    NotYetLiked,
}

impl Comment {
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: author.id,
            text,
            name: author.display_name(),
            avatar: author.avatar.clone(),
            date: Utc::now(),
        }
    }
}

impl Post {
    pub fn new(author: &User, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: author.id,
            text,
            name: author.display_name(),
            avatar: author.avatar.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
        }
    }

    pub fn is_liked_by(&self, user: Uuid) -> bool {
        self.likes.iter().any(|like| like.user == user)
    }

    /// Add a like from `user`; fails without changes if already liked
    pub fn like(&mut self, user: Uuid) -> Result<(), LikeError> {
        if self.is_liked_by(user) {
            return Err(LikeError::AlreadyLiked);
        }
        self.likes.insert(0, Like { user });
        Ok(())
    }

    /// Remove the like from `user`; fails without changes if not liked
    pub fn unlike(&mut self, user: Uuid) -> Result<(), LikeError> {
        let index = self
            .likes
            .iter()
            .position(|like| like.user == user)
            .ok_or(LikeError::NotYetLiked)?;
        self.likes.remove(index);
        Ok(())
    }

    /// Insert a comment at the head of the thread
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn comment(&self, id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Remove the comment with the given id
    pub fn remove_comment(&mut self, id: Uuid) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == id)?;
        Some(self.comments.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn author(first: &str) -> User {
        User::new(
            first.to_string(),
            "Tester".to_string(),
            format!("{}@example.com", first.to_lowercase()),
            "hash".to_string(),
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            "other".to_string(),
        )
    }

    #[test]
    fn test_new_post_snapshots_author() {
        let user = author("Grace");
        let post = Post::new(&user, "Hello".to_string());
        assert_eq!(post.user, user.id);
        assert_eq!(post.name, "Grace Tester");
        assert_eq!(post.avatar, user.avatar);
        assert!(post.likes.is_empty());
    }

    #[test]
    fn test_like_twice_is_rejected() {
        let user = author("Grace");
        let mut post = Post::new(&user, "Hello".to_string());

        post.like(user.id).unwrap();
        assert_matches!(post.like(user.id), Err(LikeError::AlreadyLiked));
        assert_eq!(post.likes.len(), 1);
        assert_eq!(post.likes[0].user, user.id);
    }

    #[test]
    fn test_unlike_without_like_is_rejected() {
        let user = author("Grace");
        let mut post = Post::new(&user, "Hello".to_string());

        assert_matches!(post.unlike(user.id), Err(LikeError::NotYetLiked));
        assert!(post.likes.is_empty());
    }

    #[test]
    fn test_likes_are_newest_first() {
        let grace = author("Grace");
        let linus = author("Linus");
        let mut post = Post::new(&grace, "Hello".to_string());

        post.like(grace.id).unwrap();
        post.like(linus.id).unwrap();
        assert_eq!(post.likes[0].user, linus.id);

        post.unlike(linus.id).unwrap();
        assert_eq!(post.likes, vec![Like { user: grace.id }]);
    }

    #[test]
    fn test_comments() {
        let grace = author("Grace");
        let linus = author("Linus");
        let mut post = Post::new(&grace, "Hello".to_string());

        let first = Comment::new(&linus, "First".to_string());
        let first_id = first.id;
        post.add_comment(first);
        post.add_comment(Comment::new(&grace, "Second".to_string()));

        assert_eq!(post.comments[0].text, "Second");
        assert_eq!(post.comment(first_id).unwrap().name, "Linus Tester");
        assert_eq!(post.remove_comment(first_id).unwrap().user, linus.id);
        assert!(post.comment(first_id).is_none());
        assert!(post.remove_comment(first_id).is_none());
        assert_eq!(post.comments.len(), 1);
    }

    #[test]
    fn test_like_error_messages() {
        assert_eq!(LikeError::AlreadyLiked.to_string(), "Post already Liked");
        assert_eq!(LikeError::NotYetLiked.to_string(), "Post has not yet been liked");
    }

    proptest! {
        #[test]
        fn test_like_set_never_holds_duplicates(ops in proptest::collection::vec((0usize..4, any::<bool>()), 0..64)) {
            let users: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
            let mut post = Post::new(&author("Grace"), "Hello".to_string());

            for (who, like) in ops {
                let user = users[who];
                let before = post.is_liked_by(user);
                let result = if like { post.like(user) } else { post.unlike(user) };

                prop_assert_eq!(result.is_ok(), before != like);
                prop_assert_eq!(post.is_liked_by(user), like);
            }

            for user in &users {
                prop_assert!(post.likes.iter().filter(|l| l.user == *user).count() <= 1);
            }
        }
    }
}
