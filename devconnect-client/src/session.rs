use chrono::Duration;
use uuid::Uuid;

use crate::DevConnectClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{EducationInput, ExperienceInput, Profile, ProfileInput};
use crate::state::{Action, Alert, AlertKind, ErrorInfo, Store};

#[derive(Debug, Clone)]
/// Клиент API вместе с состоянием, которое он обновляет.
///
/// Каждая операция вызывает API и диспатчит action успеха либо ошибки;
/// ошибки дополнительно показываются алертами.
pub struct Session {
    client: DevConnectClient,
    store: Store,
}

impl Session {
    /// Создаёт сессию; токен клиента (если есть) попадает в состояние.
    pub fn new(client: DevConnectClient) -> Self {
        let mut store = Store::default();
        store.auth.token = client.token().map(str::to_string);
        Self { client, store }
    }

    /// Текущее состояние.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Клиент API.
    pub fn client(&self) -> &DevConnectClient {
        &self.client
    }

    /// Показывает алерт на стандартное время и возвращает его идентификатор.
    pub fn set_alert(&mut self, msg: impl Into<String>, kind: AlertKind) -> Uuid {
        self.push_alert(Alert::new(msg, kind))
    }

    /// Показывает алерт, который исчезнет через `timeout`.
    pub fn set_alert_with_timeout(
        &mut self,
        msg: impl Into<String>,
        kind: AlertKind,
        timeout: Duration,
    ) -> Uuid {
        self.push_alert(Alert::with_timeout(msg, kind, timeout))
    }

    fn push_alert(&mut self, alert: Alert) -> Uuid {
        let id = alert.id;
        self.store.dispatch(Action::SetAlert(alert));
        id
    }

    /// Убирает алерт.
    pub fn remove_alert(&mut self, id: Uuid) {
        self.store.dispatch(Action::RemoveAlert(id));
    }

    /// Загружает пользователя по сохранённому токену.
    pub async fn load_user(&mut self) -> ClientResult<()> {
        match self.client.load_user().await {
            Ok(user) => {
                self.store.dispatch(Action::UserLoaded(user));
                Ok(())
            }
            Err(err) => {
                self.store.dispatch(Action::AuthError);
                Err(err)
            }
        }
    }

    /// Регистрирует пользователя и загружает его данные.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> ClientResult<()> {
        match self.client.register(name, email, password).await {
            Ok(token) => {
                self.store.dispatch(Action::RegisterSuccess { token });
                self.load_user().await
            }
            Err(err) => {
                self.raise_alerts(&err);
                self.store.dispatch(Action::RegisterFail);
                Err(err)
            }
        }
    }

    /// Выполняет вход и загружает данные пользователя.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<()> {
        match self.client.login(email, password).await {
            Ok(token) => {
                self.store.dispatch(Action::LoginSuccess { token });
                self.load_user().await
            }
            Err(err) => {
                self.raise_alerts(&err);
                self.store.dispatch(Action::LoginFail);
                Err(err)
            }
        }
    }

    /// Выход: забывает токен и открытый профиль.
    pub fn logout(&mut self) {
        self.client.clear_token();
        self.store.dispatch(Action::ClearProfile);
        self.store.dispatch(Action::Logout);
    }

    /// Загружает профиль текущего пользователя.
    pub async fn get_current_profile(&mut self) -> ClientResult<()> {
        match self.client.current_profile().await {
            Ok(profile) => {
                self.store.dispatch(Action::GetProfile(profile));
                Ok(())
            }
            Err(err) => {
                // отсутствие профиля у нового пользователя ожидаемо, без алерта
                self.store
                    .dispatch(Action::ProfileError(Self::error_info(&err)));
                Err(err)
            }
        }
    }

    /// Загружает все профили.
    pub async fn get_profiles(&mut self) -> ClientResult<()> {
        self.store.dispatch(Action::ClearProfile);
        match self.client.list_profiles().await {
            Ok(profiles) => {
                self.store.dispatch(Action::GetProfiles(profiles));
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::ProfileError)),
        }
    }

    /// Загружает профиль пользователя по идентификатору.
    pub async fn get_profile_by_id(&mut self, user_id: i64) -> ClientResult<()> {
        match self.client.profile_by_user(user_id).await {
            Ok(profile) => {
                self.store.dispatch(Action::GetProfile(profile));
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::ProfileError)),
        }
    }

    /// Загружает репозитории GitHub.
    pub async fn get_github_repos(&mut self, username: &str) -> ClientResult<()> {
        match self.client.github_repos(username).await {
            Ok(repos) => {
                self.store.dispatch(Action::GetRepos(repos));
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::ProfileError)),
        }
    }

    /// Создаёт (`edit == false`) или обновляет профиль.
    pub async fn create_profile(&mut self, input: &ProfileInput, edit: bool) -> ClientResult<()> {
        match self.client.upsert_profile(input).await {
            Ok(profile) => {
                self.store.dispatch(Action::GetProfile(profile));
                let msg = if edit {
                    "Profile Updated"
                } else {
                    "Profile Created"
                };
                self.set_alert(msg, AlertKind::Success);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::ProfileError)),
        }
    }

    /// Добавляет опыт работы.
    pub async fn add_experience(&mut self, input: &ExperienceInput) -> ClientResult<()> {
        let result = self.client.add_experience(input).await;
        self.profile_updated(result, "Experience Added")
    }

    /// Добавляет образование.
    pub async fn add_education(&mut self, input: &EducationInput) -> ClientResult<()> {
        let result = self.client.add_education(input).await;
        self.profile_updated(result, "Education Added")
    }

    /// Удаляет опыт работы.
    pub async fn delete_experience(&mut self, exp_id: i64) -> ClientResult<()> {
        let result = self.client.delete_experience(exp_id).await;
        self.profile_updated(result, "Experience Removed")
    }

    /// Удаляет образование.
    pub async fn delete_education(&mut self, edu_id: i64) -> ClientResult<()> {
        let result = self.client.delete_education(edu_id).await;
        self.profile_updated(result, "Education Removed")
    }

    /// Удаляет аккаунт вместе с профилем и постами.
    pub async fn delete_account(&mut self) -> ClientResult<()> {
        match self.client.delete_account().await {
            Ok(()) => {
                self.store.dispatch(Action::ClearProfile);
                self.store.dispatch(Action::AccountDeleted);
                self.set_alert(
                    "Your account has been permanently deleted",
                    AlertKind::Success,
                );
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::ProfileError)),
        }
    }

    /// Загружает ленту.
    pub async fn get_posts(&mut self) -> ClientResult<()> {
        match self.client.list_posts().await {
            Ok(posts) => {
                self.store.dispatch(Action::GetPosts(posts));
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    /// Открывает пост.
    pub async fn get_post(&mut self, id: i64) -> ClientResult<()> {
        match self.client.get_post(id).await {
            Ok(post) => {
                self.store.dispatch(Action::GetPost(post));
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    /// Публикует пост.
    pub async fn add_post(&mut self, text: &str) -> ClientResult<()> {
        match self.client.create_post(text).await {
            Ok(post) => {
                self.store.dispatch(Action::AddPost(post));
                self.set_alert("Post Created", AlertKind::Success);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    /// Удаляет пост.
    pub async fn delete_post(&mut self, id: i64) -> ClientResult<()> {
        match self.client.delete_post(id).await {
            Ok(()) => {
                self.store.dispatch(Action::DeletePost(id));
                self.set_alert("Post Removed", AlertKind::Success);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    /// Ставит лайк.
    pub async fn add_like(&mut self, id: i64) -> ClientResult<()> {
        match self.client.like_post(id).await {
            Ok(likes) => {
                self.store.dispatch(Action::UpdateLikes { id, likes });
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    /// Снимает лайк.
    pub async fn remove_like(&mut self, id: i64) -> ClientResult<()> {
        match self.client.unlike_post(id).await {
            Ok(likes) => {
                self.store.dispatch(Action::UpdateLikes { id, likes });
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    /// Комментирует пост.
    pub async fn add_comment(&mut self, post_id: i64, text: &str) -> ClientResult<()> {
        match self.client.add_comment(post_id, text).await {
            Ok(comments) => {
                self.store.dispatch(Action::AddComment(comments));
                self.set_alert("Comment Added", AlertKind::Success);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    /// Удаляет свой комментарий.
    pub async fn delete_comment(&mut self, post_id: i64, comment_id: i64) -> ClientResult<()> {
        match self.client.delete_comment(post_id, comment_id).await {
            Ok(_) => {
                self.store.dispatch(Action::RemoveComment(comment_id));
                self.set_alert("Comment Removed", AlertKind::Success);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::PostError)),
        }
    }

    fn profile_updated(
        &mut self,
        result: ClientResult<Profile>,
        msg: &str,
    ) -> ClientResult<()> {
        match result {
            Ok(profile) => {
                self.store.dispatch(Action::UpdateProfile(profile));
                self.set_alert(msg, AlertKind::Success);
                Ok(())
            }
            Err(err) => Err(self.fail(err, Action::ProfileError)),
        }
    }

    fn fail(&mut self, err: ClientError, action: fn(ErrorInfo) -> Action) -> ClientError {
        self.raise_alerts(&err);
        self.store.dispatch(action(Self::error_info(&err)));
        err
    }

    fn raise_alerts(&mut self, err: &ClientError) {
        for msg in err.messages() {
            self.set_alert(msg, AlertKind::Danger);
        }
    }

    fn error_info(err: &ClientError) -> ErrorInfo {
        ErrorInfo {
            msg: err.messages().join("; "),
            status: err.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::Session;
    use crate::DevConnectClient;
    use crate::error::ClientError;
    use crate::state::{Action, AlertKind};

    fn session() -> Session {
        let mut client = DevConnectClient::new("http://127.0.0.1:9").expect("client must build");
        client.set_token("stored-token");
        Session::new(client)
    }

    #[test]
    fn new_session_picks_up_client_token() {
        let session = session();
        assert_eq!(session.store().auth.token.as_deref(), Some("stored-token"));
    }

    #[test]
    fn failure_raises_one_alert_per_message() {
        let mut session = session();
        let err = ClientError::from_http_response(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"errors":[{"msg":"Status is required","param":"status"},{"msg":"Skills is required","param":"skills"}]}"#,
        );

        let returned = session.fail(err, Action::ProfileError);

        assert!(matches!(returned, ClientError::Validation(_)));
        let alerts = &session.store().alerts;
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|alert| alert.kind == AlertKind::Danger));
        let error = session
            .store()
            .profile
            .error
            .as_ref()
            .expect("error must be stored");
        assert_eq!(error.status, Some(400));
    }

    #[test]
    fn repeated_failures_do_not_pile_up_alerts() {
        let mut session = session();
        for _ in 0..100 {
            let err = ClientError::from_http_response(
                reqwest::StatusCode::BAD_REQUEST,
                r#"{"msg":"Post already liked"}"#,
            );
            session.fail(err, Action::PostError);
        }

        let alerts = &session.store().alerts;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].msg, "Post already liked");
    }

    #[test]
    fn expired_alert_is_gone_on_next_dispatch() {
        let mut session = session();
        session.set_alert_with_timeout("Post Removed", AlertKind::Success, Duration::zero());
        let kept = session.set_alert("Comment Added", AlertKind::Success);

        session.logout();

        let ids: Vec<_> = session.store().alerts.iter().map(|alert| alert.id).collect();
        assert_eq!(ids, vec![kept]);
    }

    #[test]
    fn logout_clears_token_everywhere() {
        let mut session = session();
        session.logout();
        assert!(session.client().token().is_none());
        assert!(session.store().auth.token.is_none());
        assert!(!session.store().auth.is_authenticated);
    }
}
