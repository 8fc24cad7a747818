use std::sync::Arc;

use crate::data::post_repository::{NewComment, NewPost, PostRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Comment, CreateCommentRequest, CreatePostRequest, Like, Post};
use crate::domain::user::User;

pub(crate) struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub(crate) fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub(crate) async fn create_post(
        &self,
        user_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        let author = self.author(user_id).await?;

        self.posts
            .create_post(NewPost {
                user_id,
                author_name: author.name,
                author_avatar: author.avatar,
                text: req.text,
            })
            .await
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts().await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or(DomainError::not_found("Post"))
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let post = self.get_post(post_id).await?;

        if post.user_id != actor_user_id {
            return Err(DomainError::Forbidden);
        }

        if !self.posts.delete_post(post_id).await? {
            return Err(DomainError::not_found("Post"));
        }
        Ok(())
    }

    pub(crate) async fn like_post(
        &self,
        user_id: i64,
        post_id: i64,
    ) -> Result<Vec<Like>, DomainError> {
        self.get_post(post_id).await?;
        if !self.posts.add_like(post_id, user_id).await? {
            return Err(DomainError::Conflict("Post already liked".to_string()));
        }
        self.posts.list_likes(post_id).await
    }

    pub(crate) async fn unlike_post(
        &self,
        user_id: i64,
        post_id: i64,
    ) -> Result<Vec<Like>, DomainError> {
        self.get_post(post_id).await?;
        if !self.posts.remove_like(post_id, user_id).await? {
            return Err(DomainError::Conflict(
                "Post has not yet been liked".to_string(),
            ));
        }
        self.posts.list_likes(post_id).await
    }

    pub(crate) async fn add_comment(
        &self,
        user_id: i64,
        post_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Vec<Comment>, DomainError> {
        let req = req.validate()?;
        self.get_post(post_id).await?;
        let author = self.author(user_id).await?;

        self.posts
            .add_comment(
                post_id,
                NewComment {
                    user_id,
                    author_name: author.name,
                    author_avatar: author.avatar,
                    text: req.text,
                },
            )
            .await?;
        self.posts.list_comments(post_id).await
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_user_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        let post = self.get_post(post_id).await?;
        let comment = post
            .comment(comment_id)
            .ok_or(DomainError::not_found("Comment"))?;

        if comment.user_id != actor_user_id {
            return Err(DomainError::Forbidden);
        }

        if !self.posts.delete_comment(post_id, comment_id).await? {
            return Err(DomainError::not_found("Comment"));
        }
        self.posts.list_comments(post_id).await
    }

    async fn author(&self, user_id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("User"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::PostService;
    use crate::data::repositories::memory::MemoryStore;
    use crate::data::user_repository::{NewUser, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreateCommentRequest, CreatePostRequest, Like};

    async fn user(store: &MemoryStore, name: &str) -> i64 {
        store
            .create_user(NewUser {
                name: name.to_string(),
                email: format!("{}@x.com", name.to_lowercase()),
                avatar: format!("https://avatar/{name}"),
                password_hash: "hash".to_string(),
            })
            .await
            .expect("user must be created")
            .id
    }

    fn service(store: &MemoryStore) -> PostService {
        PostService::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn text(value: &str) -> CreatePostRequest {
        CreatePostRequest {
            text: value.to_string(),
        }
    }

    #[tokio::test]
    async fn create_post_snapshots_author() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;
        let service = service(&store);

        let post = service
            .create_post(ann, text("  hello  "))
            .await
            .expect("create must succeed");

        assert_eq!(post.text, "hello");
        assert_eq!(post.author_name, "Ann");
        assert_eq!(post.author_avatar, "https://avatar/Ann");
        assert!(post.likes.is_empty());
    }

    #[tokio::test]
    async fn create_post_rejects_empty_text() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;

        let err = service(&store)
            .create_post(ann, text(""))
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::Validation { field: "text", .. }));
    }

    #[tokio::test]
    async fn list_posts_is_newest_first() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;
        let service = service(&store);

        let first = service.create_post(ann, text("one")).await.expect("post");
        let second = service.create_post(ann, text("two")).await.expect("post");

        let ids: Vec<i64> = service
            .list_posts()
            .await
            .expect("list")
            .iter()
            .map(|post| post.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn delete_post_requires_ownership() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;
        let bob = user(&store, "Bob").await;
        let service = service(&store);
        let post = service.create_post(ann, text("hi")).await.expect("post");

        let err = service
            .delete_post(bob, post.id)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));

        service
            .delete_post(ann, post.id)
            .await
            .expect("owner delete must succeed");
        let err = service.get_post(post.id).await.expect_err("must be gone");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn like_twice_is_a_conflict_and_like_appears_once() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;
        let bob = user(&store, "Bob").await;
        let service = service(&store);
        let post = service.create_post(ann, text("hi")).await.expect("post");

        let likes = service.like_post(bob, post.id).await.expect("like");
        assert_eq!(likes, vec![Like { user_id: bob }]);

        let err = service
            .like_post(bob, post.id)
            .await
            .expect_err("second like must fail");
        assert!(matches!(err, DomainError::Conflict(_)));

        let post = service.get_post(post.id).await.expect("post");
        assert_eq!(post.likes.iter().filter(|l| l.user_id == bob).count(), 1);
    }

    #[tokio::test]
    async fn unlike_without_like_is_a_conflict() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;
        let service = service(&store);
        let post = service.create_post(ann, text("hi")).await.expect("post");

        let err = service
            .unlike_post(ann, post.id)
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::Conflict(_)));

        service.like_post(ann, post.id).await.expect("like");
        let likes = service.unlike_post(ann, post.id).await.expect("unlike");
        assert!(likes.is_empty());
    }

    #[tokio::test]
    async fn like_on_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;

        let err = service(&store)
            .like_post(ann, 999)
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn comments_are_owned_by_their_author() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;
        let bob = user(&store, "Bob").await;
        let service = service(&store);
        let post = service.create_post(ann, text("hi")).await.expect("post");

        let comments = service
            .add_comment(
                bob,
                post.id,
                CreateCommentRequest {
                    text: "nice".to_string(),
                },
            )
            .await
            .expect("comment");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author_name, "Bob");
        let comment_id = comments[0].id;

        let err = service
            .delete_comment(ann, post.id, comment_id)
            .await
            .expect_err("post owner is not the comment owner");
        assert!(matches!(err, DomainError::Forbidden));

        let err = service
            .delete_comment(bob, post.id, comment_id + 1000)
            .await
            .expect_err("unknown comment");
        assert!(matches!(err, DomainError::NotFound(_)));

        let comments = service
            .delete_comment(bob, post.id, comment_id)
            .await
            .expect("owner delete must succeed");
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let ann = user(&store, "Ann").await;

        let err = service(&store)
            .add_comment(
                ann,
                77,
                CreateCommentRequest {
                    text: "hello".to_string(),
                },
            )
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
