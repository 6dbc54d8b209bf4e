use serde::{Deserialize, Serialize};

use crate::shared::Post;

/// Body of POST /api/posts and POST /api/posts/comment/{id}
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct TextRequest {
    pub text: Option<String>,
}

/// Response of DELETE /api/posts/{id}
#[derive(Serialize, Debug)]
pub struct PostRemoved {
    pub msg: &'static str,
    pub post: Post,
}
