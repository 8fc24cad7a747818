use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{Comment, CreateCommentRequest, CreatePostRequest, Like, Post};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, MsgBody};
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct TextDto {
    #[validate(length(min = 1, message = "Text is required"))]
    pub(crate) text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LikeDto {
    pub(crate) user_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) name: String,
    pub(crate) avatar: String,
    pub(crate) text: String,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) name: String,
    pub(crate) avatar: String,
    pub(crate) text: String,
    pub(crate) likes: Vec<LikeDto>,
    pub(crate) comments: Vec<CommentDto>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<Like> for LikeDto {
    fn from(like: Like) -> Self {
        Self {
            user_id: like.user_id,
        }
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            name: comment.author_name,
            avatar: comment.author_avatar,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            name: post.author_name,
            avatar: post.author_avatar,
            text: post.text,
            likes: post.likes.into_iter().map(LikeDto::from).collect(),
            comments: post.comments.into_iter().map(CommentDto::from).collect(),
            created_at: post.created_at,
        }
    }
}

fn likes_dto(likes: Vec<Like>) -> Json<Vec<LikeDto>> {
    Json(likes.into_iter().map(LikeDto::from).collect())
}

fn comments_dto(comments: Vec<Comment>) -> Json<Vec<CommentDto>> {
    Json(comments.into_iter().map(CommentDto::from).collect())
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    request_body = TextDto,
    responses(
        (status = 200, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<TextDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;
    let req = CreatePostRequest { text: dto.text };

    let post = state.post_service.create_post(auth.user_id, req).await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Posts, newest first", body = [PostDto]),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.post_service.list_posts().await?;
    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.post_service.get_post(id).await?;
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post removed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<MsgBody>)> {
    state.post_service.delete_post(auth.user_id, id).await?;
    Ok((StatusCode::OK, Json(MsgBody::new("Post removed"))))
}

#[utoipa::path(
    put,
    path = "/api/posts/like/{id}",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Updated likes", body = [LikeDto]),
        (status = 400, description = "Post already liked"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Vec<LikeDto>>)> {
    let likes = state.post_service.like_post(auth.user_id, id).await?;
    Ok((StatusCode::OK, likes_dto(likes)))
}

#[utoipa::path(
    put,
    path = "/api/posts/unlike/{id}",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Updated likes", body = [LikeDto]),
        (status = 400, description = "Post has not yet been liked"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Vec<LikeDto>>)> {
    let likes = state.post_service.unlike_post(auth.user_id, id).await?;
    Ok((StatusCode::OK, likes_dto(likes)))
}

#[utoipa::path(
    post,
    path = "/api/posts/comment/{id}",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = TextDto,
    responses(
        (status = 200, description = "Updated comments", body = [CommentDto]),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn add_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<TextDto>,
) -> AppResult<(StatusCode, Json<Vec<CommentDto>>)> {
    dto.validate()?;
    let req = CreateCommentRequest { text: dto.text };

    let comments = state
        .post_service
        .add_comment(auth.user_id, id, req)
        .await?;
    Ok((StatusCode::OK, comments_dto(comments)))
}

#[utoipa::path(
    delete,
    path = "/api/posts/comment/{id}/{comment_id}",
    tag = "posts",
    security(
        ("api_key" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Updated comments", body = [CommentDto]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the comment author"),
        (status = 404, description = "Post or comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath((id, comment_id)): AppPath<(i64, i64)>,
) -> AppResult<(StatusCode, Json<Vec<CommentDto>>)> {
    let comments = state
        .post_service
        .delete_comment(auth.user_id, id, comment_id)
        .await?;
    Ok((StatusCode::OK, comments_dto(comments)))
}
