use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};

use crate::presentation::AppState;
use crate::presentation::http::handlers::profiles::{
    add_education, add_experience, current_profile, delete_account, github_repos, list_profiles,
    profile_by_user, remove_education, remove_experience, upsert_profile,
};
use crate::presentation::http::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_profiles))
        .route("/user/{user_id}", get(profile_by_user))
        .route("/github/{username}", get(github_repos));

    let protected = Router::new()
        .route("/", post(upsert_profile).delete(delete_account))
        .route("/currentuser", get(current_profile))
        .route("/experience", put(add_experience))
        .route("/experience/{exp_id}", delete(remove_experience))
        .route("/education", put(add_education))
        .route("/education/{edu_id}", delete(remove_education))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
