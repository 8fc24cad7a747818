use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::RegisterRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::extract::AppJson;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub(crate) name: String,
    #[validate(email(message = "Please include a valid email"))]
    pub(crate) email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Please enter a password with 6 or more characters"
    ))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TokenDto {
    pub(crate) token: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = RegisterDto,
    responses(
        (status = 200, description = "Registered successfully", body = TokenDto),
        (status = 400, description = "Validation error or user already exists"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    AppJson(mut dto): AppJson<RegisterDto>,
) -> AppResult<(StatusCode, Json<TokenDto>)> {
    dto.email = dto.email.trim().to_string();
    dto.validate()?;

    let req = RegisterRequest {
        name: dto.name,
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.register(req).await?;

    Ok((
        StatusCode::OK,
        Json(TokenDto {
            token: result.access_token,
        }),
    ))
}
