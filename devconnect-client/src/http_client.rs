use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Заголовок, в котором сервер ожидает JWT.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequestDto<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequestDto<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextRequestDto<'a> {
    pub(crate) text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponseDto {
    pub(crate) token: String,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `devconnect-server`.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ClientError::from_http_response(status, &body)
    }

    /// универсальный helper для запросов с json-payload
    pub(crate) async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> ClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let request = self.request(method, path, token).json(body);
        Self::execute(request).await
    }

    /// запрос без тела (GET/DELETE и PUT для лайков)
    pub(crate) async fn send_empty<TRes>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> ClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        Self::execute(self.request(method, path, token)).await
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.header(AUTH_TOKEN_HEADER, token),
            None => request,
        }
    }

    async fn execute<TRes>(request: RequestBuilder) -> ClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(response.json::<TRes>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:5000/").expect("client must build");
        let full = client.endpoint("/api/posts");
        assert_eq!(full, "http://localhost:5000/api/posts");
    }

    #[test]
    fn register_payload_uses_server_field_names() {
        let payload = RegisterRequestDto {
            name: "Ann",
            email: "ann@x.com",
            password: "secret1",
        };
        let json = serde_json::to_value(&payload).expect("payload must serialize");
        assert_eq!(
            json,
            serde_json::json!({ "name": "Ann", "email": "ann@x.com", "password": "secret1" })
        );
    }
}
