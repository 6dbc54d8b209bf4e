//! Posts Module
//!
//! The post feed: posts, likes and comments.

/// HTTP handlers
pub mod handlers;

/// Request and response bodies
pub mod types;

pub use handlers::{
    add_comment, create_post, delete_comment, delete_post, get_post, like_post, list_posts,
    unlike_post,
};
