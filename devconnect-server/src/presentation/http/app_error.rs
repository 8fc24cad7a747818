use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("No token, authorization denied")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub(crate) struct MsgBody {
    pub(crate) msg: String,
}

impl MsgBody {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Serialize)]
struct FieldError {
    msg: String,
    param: String,
}

#[derive(Debug, Serialize)]
struct ErrorsBody {
    errors: Vec<FieldError>,
}

const SERVER_ERROR: &str = "Server error";

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection.body_text(), "path parameter rejected");
        AppError::NotFound("Resource not found")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { field, message } => {
                    errors_response(vec![FieldError {
                        msg: message.to_string(),
                        param: field.to_string(),
                    }])
                }
                DomainError::Conflict(_) => msg_response(StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::InvalidCredentials => {
                    msg_response(StatusCode::UNAUTHORIZED, err.to_string())
                }
                DomainError::NotFound(_) => msg_response(StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Forbidden => msg_response(StatusCode::FORBIDDEN, err.to_string()),
                DomainError::Unexpected(msg) => {
                    error!(error = %msg, "unexpected domain error");
                    server_error()
                }
            },
            AppError::Validation(errors) => errors_response(field_errors(&errors)),
            AppError::NotFound(msg) => msg_response(StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => errors_response(vec![FieldError {
                msg,
                param: "body".to_string(),
            }]),
            err @ (AppError::MissingToken | AppError::InvalidToken) => {
                msg_response(StatusCode::UNAUTHORIZED, err.to_string())
            }
        }
    }
}

fn msg_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(MsgBody::new(msg))).into_response()
}

fn errors_response(errors: Vec<FieldError>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR).into_response()
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let param = field.to_string();
            errs.iter().map(move |err| FieldError {
                msg: err
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {param}")),
                param: param.clone(),
            })
        })
        .collect();
    // HashMap order is random
    out.sort_by(|a, b| a.param.cmp(&b.param));
    out
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    use super::AppError;
    use crate::domain::error::DomainError;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        (
            status,
            serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        )
    }

    #[tokio::test]
    async fn domain_validation_uses_errors_array() {
        let (status, body) = body_json(AppError::Domain(DomainError::Validation {
            field: "text",
            message: "Text is required",
        }))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["msg"], "Text is required");
        assert_eq!(body["errors"][0]["param"], "text");
    }

    #[tokio::test]
    async fn conflict_is_bad_request_with_msg() {
        let (status, body) = body_json(AppError::Domain(DomainError::Conflict(
            "Post already liked".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Post already liked");
    }

    #[tokio::test]
    async fn forbidden_and_not_found_statuses() {
        let (status, body) = body_json(AppError::Domain(DomainError::Forbidden)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["msg"], "User not authorized");

        let (status, body) = body_json(AppError::Domain(DomainError::not_found("Post"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Post not found");
    }

    #[tokio::test]
    async fn unexpected_error_hides_details() {
        let response =
            AppError::Domain(DomainError::Unexpected("db exploded".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        assert_eq!(&bytes[..], b"Server error");
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (status, body) = body_json(AppError::MissingToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["msg"], "No token, authorization denied");
    }
}
