use async_trait::async_trait;

use super::{MemoryStore, now};
use crate::data::post_repository::{NewComment, NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Comment, Like, Post};

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.inner.write().await;
        if !state.users.contains_key(&input.user_id) {
            return Err(DomainError::not_found("User"));
        }

        let id = state.next_id();
        let post = Post {
            id,
            user_id: input.user_id,
            author_name: input.author_name,
            author_avatar: input.author_avatar,
            text: input.text,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now(),
        };
        state.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let state = self.inner.read().await;
        Ok(state.posts.get(&id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let state = self.inner.read().await;
        let mut posts: Vec<Post> = state.posts.values().cloned().collect();
        posts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(posts)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        Ok(state.posts.remove(&id).is_some())
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64, DomainError> {
        let mut state = self.inner.write().await;
        let before = state.posts.len();
        state.posts.retain(|_, post| post.user_id != user_id);
        Ok((before - state.posts.len()) as u64)
    }

    async fn add_like(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or(DomainError::not_found("Post"))?;
        if post.is_liked_by(user_id) {
            return Ok(false);
        }
        post.likes.insert(0, Like { user_id });
        Ok(true)
    }

    async fn remove_like(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or(DomainError::not_found("Post"))?;
        let before = post.likes.len();
        post.likes.retain(|like| like.user_id != user_id);
        Ok(post.likes.len() != before)
    }

    async fn list_likes(&self, post_id: i64) -> Result<Vec<Like>, DomainError> {
        let state = self.inner.read().await;
        state
            .posts
            .get(&post_id)
            .map(|post| post.likes.clone())
            .ok_or(DomainError::not_found("Post"))
    }

    async fn add_comment(&self, post_id: i64, input: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.inner.write().await;
        let id = state.next_id();
        let post = state
            .posts
            .get_mut(&post_id)
            .ok_or(DomainError::not_found("Post"))?;
        let comment = Comment {
            id,
            user_id: input.user_id,
            author_name: input.author_name,
            author_avatar: input.author_avatar,
            text: input.text,
            created_at: now(),
        };
        post.comments.insert(0, comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        let Some(post) = state.posts.get_mut(&post_id) else {
            return Ok(false);
        };
        let before = post.comments.len();
        post.comments.retain(|comment| comment.id != comment_id);
        Ok(post.comments.len() != before)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let state = self.inner.read().await;
        state
            .posts
            .get(&post_id)
            .map(|post| post.comments.clone())
            .ok_or(DomainError::not_found("Post"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::{NewUser, UserRepository};

    async fn seeded_post() -> (MemoryStore, Post) {
        let store = MemoryStore::new();
        let user = store
            .create_user(NewUser {
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
                avatar: "https://avatar".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .expect("user must be created");
        let post = store
            .create_post(NewPost {
                user_id: user.id,
                author_name: user.name,
                author_avatar: user.avatar,
                text: "hello".to_string(),
            })
            .await
            .expect("post must be created");
        (store, post)
    }

    #[tokio::test]
    async fn likes_are_unique_per_user_and_newest_first() {
        let (store, post) = seeded_post().await;

        assert!(store.add_like(post.id, 7).await.expect("like"));
        assert!(store.add_like(post.id, 8).await.expect("like"));
        assert!(!store.add_like(post.id, 7).await.expect("like"));

        let likes = store.list_likes(post.id).await.expect("likes");
        assert_eq!(likes, vec![Like { user_id: 8 }, Like { user_id: 7 }]);

        assert!(store.remove_like(post.id, 7).await.expect("unlike"));
        assert!(!store.remove_like(post.id, 7).await.expect("unlike"));
    }

    #[tokio::test]
    async fn delete_comment_removes_only_the_addressed_comment() {
        let (store, post) = seeded_post().await;
        let comment = |text: &str| NewComment {
            user_id: post.user_id,
            author_name: "Ann".to_string(),
            author_avatar: String::new(),
            text: text.to_string(),
        };

        let first = store
            .add_comment(post.id, comment("first"))
            .await
            .expect("comment");
        let second = store
            .add_comment(post.id, comment("second"))
            .await
            .expect("comment");

        assert!(store.delete_comment(post.id, first.id).await.expect("delete"));
        let comments = store.list_comments(post.id).await.expect("comments");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, second.id);
        assert!(!store.delete_comment(post.id, first.id).await.expect("delete"));
    }

    #[tokio::test]
    async fn delete_by_user_removes_only_that_authors_posts() {
        let (store, post) = seeded_post().await;
        let other = store
            .create_user(NewUser {
                name: "Bob".to_string(),
                email: "bob@x.com".to_string(),
                avatar: String::new(),
                password_hash: "hash".to_string(),
            })
            .await
            .expect("user must be created");
        store
            .create_post(NewPost {
                user_id: other.id,
                author_name: other.name,
                author_avatar: other.avatar,
                text: "mine".to_string(),
            })
            .await
            .expect("post must be created");

        assert_eq!(store.delete_by_user(post.user_id).await.expect("delete"), 1);
        let remaining = store.list_posts().await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].user_id, other.id);
    }
}
