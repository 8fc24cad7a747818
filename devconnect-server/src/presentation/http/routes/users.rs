use axum::{Router, routing::post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::users::register;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(register))
}
