use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Comment, Like, Post};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) user_id: i64,
    pub(crate) author_name: String,
    pub(crate) author_avatar: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) user_id: i64,
    pub(crate) author_name: String,
    pub(crate) author_avatar: String,
    pub(crate) text: String,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_by_user(&self, user_id: i64) -> Result<u64, DomainError>;

    /// Atomically prepends a like. `false` when `user_id` already likes the post.
    async fn add_like(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError>;
    /// Atomically removes a like. `false` when `user_id` did not like the post.
    async fn remove_like(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError>;
    async fn list_likes(&self, post_id: i64) -> Result<Vec<Like>, DomainError>;

    async fn add_comment(&self, post_id: i64, input: NewComment) -> Result<Comment, DomainError>;
    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<bool, DomainError>;
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
}
