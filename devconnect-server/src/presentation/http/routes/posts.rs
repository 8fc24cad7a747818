use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    add_comment, create_post, delete_comment, delete_post, get_post, like_post, list_posts,
    unlike_post,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

/// Every post route requires a token.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_post).get(list_posts))
        .route("/{id}", get(get_post).delete(delete_post))
        .route("/like/{id}", put(like_post))
        .route("/unlike/{id}", put(unlike_post))
        .route("/comment/{id}", post(add_comment))
        .route("/comment/{id}/{comment_id}", delete(delete_comment))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
