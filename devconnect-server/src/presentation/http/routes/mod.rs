use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod posts;
pub(crate) mod profiles;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/users", users::router())
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/profile", profiles::router(state.clone()))
        .nest("/api/posts", posts::router(state))
}
