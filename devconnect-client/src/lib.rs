//! Клиентская библиотека для работы с `devconnect-server` по HTTP.
//!
//! - [`DevConnectClient`]: типизированный метод на каждый endpoint REST API.
//!   Клиент хранит JWT после `register`/`login` и подставляет его в
//!   заголовок `x-auth-token` в защищённых операциях.
//! - [`state`]: клиентское хранилище состояния (actions + reducer), которое
//!   повторяет серверные ресурсы: auth, profile, posts и алерты.
//! - [`Session`]: связка клиента и хранилища; каждая операция вызывает API и
//!   диспатчит action успеха или ошибки.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;
mod session;
pub mod state;

pub use error::{ClientError, ClientResult, FieldError};
pub use http_client::AUTH_TOKEN_HEADER;
pub use models::{
    Comment, Education, EducationInput, Experience, ExperienceInput, GithubRepo, Like, Post,
    Profile, ProfileInput, ProfileUser, Social, User,
};
pub use session::Session;

use reqwest::Method;
use serde::de::IgnoredAny;

use http_client::{HttpClient, LoginRequestDto, RegisterRequestDto, TextRequestDto, TokenResponseDto};

#[derive(Debug, Clone)]
/// Клиент REST API `devconnect-server`.
pub struct DevConnectClient {
    http: HttpClient,
    token: Option<String>,
}

impl DevConnectClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную (например, восстановленный из хранилища).
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя и сохраняет полученный токен.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<String> {
        let payload = RegisterRequestDto {
            name,
            email,
            password,
        };
        let dto: TokenResponseDto = self
            .http
            .send_json(Method::POST, "/api/users", &payload, None)
            .await?;
        self.token = Some(dto.token.clone());
        Ok(dto.token)
    }

    /// Выполняет вход и сохраняет полученный токен.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<String> {
        let payload = LoginRequestDto { email, password };
        let dto: TokenResponseDto = self
            .http
            .send_json(Method::POST, "/api/auth", &payload, None)
            .await?;
        self.token = Some(dto.token.clone());
        Ok(dto.token)
    }

    /// Загружает текущего пользователя по токену.
    pub async fn load_user(&self) -> ClientResult<User> {
        let token = self.require_token()?;
        self.http
            .send_empty(Method::GET, "/api/auth", Some(token))
            .await
    }

    /// Возвращает все профили.
    pub async fn list_profiles(&self) -> ClientResult<Vec<Profile>> {
        self.http.send_empty(Method::GET, "/api/profile", None).await
    }

    /// Возвращает профиль текущего пользователя.
    pub async fn current_profile(&self) -> ClientResult<Profile> {
        let token = self.require_token()?;
        self.http
            .send_empty(Method::GET, "/api/profile/currentuser", Some(token))
            .await
    }

    /// Возвращает профиль пользователя по его идентификатору.
    pub async fn profile_by_user(&self, user_id: i64) -> ClientResult<Profile> {
        self.http
            .send_empty(Method::GET, &format!("/api/profile/user/{user_id}"), None)
            .await
    }

    /// Создаёт или обновляет профиль текущего пользователя.
    pub async fn upsert_profile(&self, input: &ProfileInput) -> ClientResult<Profile> {
        let token = self.require_token()?;
        self.http
            .send_json(Method::POST, "/api/profile", input, Some(token))
            .await
    }

    /// Удаляет пользователя вместе с профилем и постами и очищает токен.
    pub async fn delete_account(&mut self) -> ClientResult<()> {
        let token = self.require_token()?;
        let _: IgnoredAny = self
            .http
            .send_empty(Method::DELETE, "/api/profile", Some(token))
            .await?;
        self.token = None;
        Ok(())
    }

    /// Добавляет запись об опыте работы.
    pub async fn add_experience(&self, input: &ExperienceInput) -> ClientResult<Profile> {
        let token = self.require_token()?;
        self.http
            .send_json(Method::PUT, "/api/profile/experience", input, Some(token))
            .await
    }

    /// Удаляет запись об опыте работы.
    pub async fn delete_experience(&self, exp_id: i64) -> ClientResult<Profile> {
        let token = self.require_token()?;
        self.http
            .send_empty(
                Method::DELETE,
                &format!("/api/profile/experience/{exp_id}"),
                Some(token),
            )
            .await
    }

    /// Добавляет запись об образовании.
    pub async fn add_education(&self, input: &EducationInput) -> ClientResult<Profile> {
        let token = self.require_token()?;
        self.http
            .send_json(Method::PUT, "/api/profile/education", input, Some(token))
            .await
    }

    /// Удаляет запись об образовании.
    pub async fn delete_education(&self, edu_id: i64) -> ClientResult<Profile> {
        let token = self.require_token()?;
        self.http
            .send_empty(
                Method::DELETE,
                &format!("/api/profile/education/{edu_id}"),
                Some(token),
            )
            .await
    }

    /// Возвращает публичные репозитории пользователя GitHub.
    pub async fn github_repos(&self, username: &str) -> ClientResult<Vec<GithubRepo>> {
        self.http
            .send_empty(
                Method::GET,
                &format!("/api/profile/github/{username}"),
                None,
            )
            .await
    }

    /// Возвращает ленту постов, новые первыми.
    pub async fn list_posts(&self) -> ClientResult<Vec<Post>> {
        let token = self.require_token()?;
        self.http
            .send_empty(Method::GET, "/api/posts", Some(token))
            .await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> ClientResult<Post> {
        let token = self.require_token()?;
        self.http
            .send_empty(Method::GET, &format!("/api/posts/{id}"), Some(token))
            .await
    }

    /// Публикует пост.
    pub async fn create_post(&self, text: &str) -> ClientResult<Post> {
        let token = self.require_token()?;
        self.http
            .send_json(
                Method::POST,
                "/api/posts",
                &TextRequestDto { text },
                Some(token),
            )
            .await
    }

    /// Удаляет собственный пост.
    pub async fn delete_post(&self, id: i64) -> ClientResult<()> {
        let token = self.require_token()?;
        let _: IgnoredAny = self
            .http
            .send_empty(Method::DELETE, &format!("/api/posts/{id}"), Some(token))
            .await?;
        Ok(())
    }

    /// Ставит лайк и возвращает обновлённый список лайков.
    pub async fn like_post(&self, id: i64) -> ClientResult<Vec<Like>> {
        let token = self.require_token()?;
        self.http
            .send_empty(Method::PUT, &format!("/api/posts/like/{id}"), Some(token))
            .await
    }

    /// Снимает лайк и возвращает обновлённый список лайков.
    pub async fn unlike_post(&self, id: i64) -> ClientResult<Vec<Like>> {
        let token = self.require_token()?;
        self.http
            .send_empty(Method::PUT, &format!("/api/posts/unlike/{id}"), Some(token))
            .await
    }

    /// Добавляет комментарий и возвращает обновлённый список комментариев.
    pub async fn add_comment(&self, post_id: i64, text: &str) -> ClientResult<Vec<Comment>> {
        let token = self.require_token()?;
        self.http
            .send_json(
                Method::POST,
                &format!("/api/posts/comment/{post_id}"),
                &TextRequestDto { text },
                Some(token),
            )
            .await
    }

    /// Удаляет собственный комментарий и возвращает оставшиеся.
    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> ClientResult<Vec<Comment>> {
        let token = self.require_token()?;
        self.http
            .send_empty(
                Method::DELETE,
                &format!("/api/posts/comment/{post_id}/{comment_id}"),
                Some(token),
            )
            .await
    }

    fn require_token(&self) -> ClientResult<&str> {
        self.token.as_deref().ok_or(ClientError::MissingToken)
    }
}
