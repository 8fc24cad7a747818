use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибка валидации одного поля, как её возвращает сервер.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Текст ошибки для пользователя.
    pub msg: String,
    /// Имя поля запроса.
    #[serde(default)]
    pub param: Option<String>,
}

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `devconnect-client`.
pub enum ClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// В клиенте нет токена, а операция его требует.
    #[error("no token, authorization denied")]
    MissingToken,

    /// Сервер отклонил токен или учётные данные (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Операция над чужим ресурсом (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Запрошенный ресурс не найден (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Сервер вернул список ошибок валидации (400).
    #[error("validation failed: {}", join_messages(.0))]
    Validation(Vec<FieldError>),

    /// Некорректный запрос или конфликт состояния (400 с `msg`).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Ошибка на стороне сервера (5xx).
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `devconnect-client`.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBodyDto {
    msg: Option<String>,
    errors: Option<Vec<FieldError>>,
}

impl ClientError {
    pub(crate) fn from_http_response(status: reqwest::StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBodyDto>(body).ok();
        let (msg, errors) = match parsed {
            Some(dto) => (dto.msg, dto.errors),
            None => (None, None),
        };
        let message = msg.unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("http status {status}")
            } else {
                body.trim().to_string()
            }
        });

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden(message),
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            s if s.is_server_error() => Self::Server(message),
            _ => match errors {
                Some(errors) if !errors.is_empty() => Self::Validation(errors),
                _ => Self::InvalidRequest(message),
            },
        }
    }

    /// HTTP-статус ответа сервера, если ошибка пришла от сервера.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => err.status().map(|status| status.as_u16()),
            Self::MissingToken => None,
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) | Self::InvalidRequest(_) => Some(400),
            Self::Server(_) => Some(500),
        }
    }

    /// Сообщения, пригодные для показа пользователю (по одному на алерт).
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.iter().map(|err| err.msg.clone()).collect(),
            Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::InvalidRequest(msg)
            | Self::Server(msg) => vec![msg.clone()],
            other => vec![other.to_string()],
        }
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|err| err.msg.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{ClientError, FieldError};

    #[test]
    fn validation_body_becomes_field_errors() {
        let body = r#"{"errors":[{"msg":"Text is required","param":"text"}]}"#;
        let err = ClientError::from_http_response(StatusCode::BAD_REQUEST, body);

        match err {
            ClientError::Validation(errors) => assert_eq!(
                errors,
                vec![FieldError {
                    msg: "Text is required".to_string(),
                    param: Some("text".to_string()),
                }]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn msg_body_maps_by_status() {
        let err = ClientError::from_http_response(
            StatusCode::BAD_REQUEST,
            r#"{"msg":"Post already liked"}"#,
        );
        assert!(matches!(err, ClientError::InvalidRequest(ref msg) if msg == "Post already liked"));

        let err = ClientError::from_http_response(
            StatusCode::NOT_FOUND,
            r#"{"msg":"Post not found"}"#,
        );
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.messages(), vec!["Post not found".to_string()]);
    }

    #[test]
    fn plain_text_server_error_is_kept() {
        let err = ClientError::from_http_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
        assert!(matches!(err, ClientError::Server(ref msg) if msg == "Server error"));
    }
}
