use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::{NewComment, NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Comment, Like, Post};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    author_name: String,
    author_avatar: String,
    text: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct LikeRow {
    post_id: i64,
    user_id: i64,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    author_name: String,
    author_avatar: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            author_name: row.author_name,
            author_avatar: row.author_avatar,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

impl PostgresPostRepository {
    async fn fetch_likes(&self, post_ids: &[i64]) -> Result<Vec<LikeRow>, DomainError> {
        sqlx::query_as::<_, LikeRow>(
            r#"
            SELECT post_id, user_id
            FROM post_likes
            WHERE post_id = ANY($1)
            ORDER BY id DESC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)
    }

    async fn fetch_comments(&self, post_ids: &[i64]) -> Result<Vec<CommentRow>, DomainError> {
        sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, author_name, author_avatar, text, created_at
            FROM post_comments
            WHERE post_id = ANY($1)
            ORDER BY id DESC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)
    }

    async fn hydrate(&self, rows: Vec<PostRow>) -> Result<Vec<Post>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let mut likes_by_post: HashMap<i64, Vec<Like>> = HashMap::new();
        for row in self.fetch_likes(&ids).await? {
            likes_by_post.entry(row.post_id).or_default().push(Like {
                user_id: row.user_id,
            });
        }

        let mut comments_by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
        for row in self.fetch_comments(&ids).await? {
            comments_by_post
                .entry(row.post_id)
                .or_default()
                .push(Comment::from(row));
        }

        Ok(rows
            .into_iter()
            .map(|row| Post {
                id: row.id,
                user_id: row.user_id,
                author_name: row.author_name,
                author_avatar: row.author_avatar,
                text: row.text,
                likes: likes_by_post.remove(&row.id).unwrap_or_default(),
                comments: comments_by_post.remove(&row.id).unwrap_or_default(),
                created_at: row.created_at,
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, author_name, author_avatar, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, author_name, author_avatar, text, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.author_name)
        .bind(&input.author_avatar)
        .bind(&input.text)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(Post {
            id: row.id,
            user_id: row.user_id,
            author_name: row.author_name,
            author_avatar: row.author_avatar,
            text: row.text,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: row.created_at,
        })
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, author_name, author_avatar, text, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, author_name, author_avatar, text, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        self.hydrate(rows).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected())
    }

    async fn add_like(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_like(&self, post_id: i64, user_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_likes(&self, post_id: i64) -> Result<Vec<Like>, DomainError> {
        Ok(self
            .fetch_likes(&[post_id])
            .await?
            .into_iter()
            .map(|row| Like {
                user_id: row.user_id,
            })
            .collect())
    }

    async fn add_comment(&self, post_id: i64, input: NewComment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO post_comments (post_id, user_id, author_name, author_avatar, text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, post_id, user_id, author_name, author_avatar, text, created_at
            "#,
        )
        .bind(post_id)
        .bind(input.user_id)
        .bind(&input.author_name)
        .bind(&input.author_avatar)
        .bind(&input.text)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(Comment::from(row))
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM post_comments WHERE id = $1 AND post_id = $2")
            .bind(comment_id)
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .fetch_comments(&[post_id])
            .await?
            .into_iter()
            .map(Comment::from)
            .collect())
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return match db_err.constraint() {
            Some("posts_user_id_fkey") => DomainError::not_found("User"),
            _ => DomainError::not_found("Post"),
        };
    }
    DomainError::Unexpected(err.to_string())
}
