use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LoginRequest, User};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::AppJson;
use crate::presentation::http::handlers::users::TokenDto;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct LoginDto {
    #[validate(email(message = "Please include a valid email"))]
    pub(crate) email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
}

/// The authenticated user, without credentials.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) avatar: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = TokenDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    AppJson(mut dto): AppJson<LoginDto>,
) -> AppResult<(StatusCode, Json<TokenDto>)> {
    dto.email = dto.email.trim().to_string();
    dto.validate()?;

    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(TokenDto {
            token: result.access_token,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth",
    tag = "auth",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn current_user(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.auth_service.current_user(auth.user_id).await?;
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}
