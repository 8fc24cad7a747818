//! Клиентское состояние: срезы `auth`, `profile`, `post` и `alerts`,
//! изменяемые только через [`reduce`].

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{Comment, GithubRepo, Like, Post, Profile, User};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Состояние аутентификации.
pub struct AuthState {
    /// Текущий JWT.
    pub token: Option<String>,
    /// Пользователь вошёл в систему.
    pub is_authenticated: bool,
    /// Идёт загрузка пользователя.
    pub loading: bool,
    /// Загруженный пользователь.
    pub user: Option<User>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            is_authenticated: false,
            loading: true,
            user: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ошибка запроса, сохранённая в состоянии.
pub struct ErrorInfo {
    /// Сообщение сервера.
    pub msg: String,
    /// HTTP-статус, если ответ пришёл от сервера.
    pub status: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Состояние профилей.
pub struct ProfileState {
    /// Открытый профиль (свой или чужой).
    pub profile: Option<Profile>,
    /// Список всех профилей.
    pub profiles: Vec<Profile>,
    /// Репозитории GitHub открытого профиля.
    pub repos: Vec<GithubRepo>,
    /// Идёт загрузка.
    pub loading: bool,
    /// Последняя ошибка.
    pub error: Option<ErrorInfo>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            profile: None,
            profiles: Vec::new(),
            repos: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Состояние ленты.
pub struct PostState {
    /// Посты, новые первыми.
    pub posts: Vec<Post>,
    /// Открытый пост.
    pub post: Option<Post>,
    /// Идёт загрузка.
    pub loading: bool,
    /// Последняя ошибка.
    pub error: Option<ErrorInfo>,
}

impl Default for PostState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            post: None,
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Вид алерта.
pub enum AlertKind {
    /// Успешная операция.
    Success,
    /// Ошибка.
    Danger,
}

/// Время жизни алерта по умолчанию, мс.
pub const ALERT_TIMEOUT_MS: i64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Всплывающее сообщение для пользователя.
pub struct Alert {
    /// Идентификатор для последующего удаления.
    pub id: Uuid,
    /// Текст.
    pub msg: String,
    /// Вид.
    pub kind: AlertKind,
    /// Момент, после которого алерт убирается из состояния.
    pub expires_at: DateTime<Utc>,
}

impl Alert {
    /// Создаёт алерт со свежим идентификатором и временем жизни
    /// [`ALERT_TIMEOUT_MS`].
    pub fn new(msg: impl Into<String>, kind: AlertKind) -> Self {
        Self::with_timeout(msg, kind, Duration::milliseconds(ALERT_TIMEOUT_MS))
    }

    /// Создаёт алерт с заданным временем жизни.
    pub fn with_timeout(msg: impl Into<String>, kind: AlertKind, timeout: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            msg: msg.into(),
            kind,
            expires_at: Utc::now() + timeout,
        }
    }

    /// Истёк ли алерт к моменту `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Полное состояние клиента.
pub struct Store {
    /// Аутентификация.
    pub auth: AuthState,
    /// Профили.
    pub profile: ProfileState,
    /// Посты.
    pub post: PostState,
    /// Активные алерты.
    pub alerts: Vec<Alert>,
}

impl Store {
    /// Применяет action к состоянию на месте; перед этим убирает
    /// истёкшие алерты.
    pub fn dispatch(&mut self, action: Action) {
        self.prune_alerts(Utc::now());
        let state = std::mem::take(self);
        *self = reduce(state, action);
    }

    /// Убирает алерты, истёкшие к моменту `now`.
    pub fn prune_alerts(&mut self, now: DateTime<Utc>) {
        self.alerts.retain(|alert| !alert.is_expired(now));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Событие, меняющее состояние.
pub enum Action {
    /// Регистрация прошла, получен токен.
    RegisterSuccess {
        /// Токен.
        token: String,
    },
    /// Регистрация не удалась.
    RegisterFail,
    /// Пользователь загружен по токену.
    UserLoaded(User),
    /// Токен отклонён или пользователь не найден.
    AuthError,
    /// Вход выполнен, получен токен.
    LoginSuccess {
        /// Токен.
        token: String,
    },
    /// Вход не удался.
    LoginFail,
    /// Выход.
    Logout,
    /// Аккаунт удалён.
    AccountDeleted,
    /// Загружен один профиль.
    GetProfile(Profile),
    /// Загружен список профилей.
    GetProfiles(Vec<Profile>),
    /// Загружены репозитории GitHub.
    GetRepos(Vec<GithubRepo>),
    /// Профиль изменён (опыт, образование, поля формы).
    UpdateProfile(Profile),
    /// Ошибка запроса профиля.
    ProfileError(ErrorInfo),
    /// Сброс открытого профиля.
    ClearProfile,
    /// Загружена лента.
    GetPosts(Vec<Post>),
    /// Загружен пост.
    GetPost(Post),
    /// Опубликован пост.
    AddPost(Post),
    /// Пост удалён.
    DeletePost(i64),
    /// Обновлены лайки поста.
    UpdateLikes {
        /// Пост.
        id: i64,
        /// Новый список лайков.
        likes: Vec<Like>,
    },
    /// Обновлены комментарии открытого поста после добавления.
    AddComment(Vec<Comment>),
    /// Комментарий удалён из открытого поста.
    RemoveComment(i64),
    /// Ошибка запроса постов.
    PostError(ErrorInfo),
    /// Показать алерт.
    SetAlert(Alert),
    /// Убрать алерт.
    RemoveAlert(Uuid),
}

/// Чистая функция перехода состояния.
pub fn reduce(mut state: Store, action: Action) -> Store {
    match action {
        Action::RegisterSuccess { token } | Action::LoginSuccess { token } => {
            state.auth.token = Some(token);
            state.auth.is_authenticated = true;
            state.auth.loading = false;
        }
        Action::UserLoaded(user) => {
            state.auth.is_authenticated = true;
            state.auth.loading = false;
            state.auth.user = Some(user);
        }
        Action::RegisterFail
        | Action::AuthError
        | Action::LoginFail
        | Action::Logout
        | Action::AccountDeleted => {
            state.auth = AuthState {
                loading: false,
                ..AuthState::default()
            };
        }

        Action::GetProfile(profile) | Action::UpdateProfile(profile) => {
            state.profile.profile = Some(profile);
            state.profile.loading = false;
        }
        Action::GetProfiles(profiles) => {
            state.profile.profiles = profiles;
            state.profile.loading = false;
        }
        Action::GetRepos(repos) => {
            state.profile.repos = repos;
            state.profile.loading = false;
        }
        Action::ProfileError(error) => {
            state.profile.error = Some(error);
            state.profile.loading = false;
            state.profile.profile = None;
        }
        Action::ClearProfile => {
            state.profile.profile = None;
            state.profile.repos.clear();
            state.profile.loading = false;
        }

        Action::GetPosts(posts) => {
            state.post.posts = posts;
            state.post.loading = false;
        }
        Action::GetPost(post) => {
            state.post.post = Some(post);
            state.post.loading = false;
        }
        Action::AddPost(post) => {
            state.post.posts.insert(0, post);
            state.post.loading = false;
        }
        Action::DeletePost(id) => {
            state.post.posts.retain(|post| post.id != id);
            state.post.loading = false;
        }
        Action::UpdateLikes { id, likes } => {
            for post in state.post.posts.iter_mut().filter(|post| post.id == id) {
                post.likes = likes.clone();
            }
            if let Some(post) = state.post.post.as_mut()
                && post.id == id
            {
                post.likes = likes;
            }
            state.post.loading = false;
        }
        Action::AddComment(comments) => {
            if let Some(post) = state.post.post.as_mut() {
                post.comments = comments;
            }
            state.post.loading = false;
        }
        Action::RemoveComment(comment_id) => {
            if let Some(post) = state.post.post.as_mut() {
                post.comments.retain(|comment| comment.id != comment_id);
            }
            state.post.loading = false;
        }
        Action::PostError(error) => {
            state.post.error = Some(error);
            state.post.loading = false;
        }

        Action::SetAlert(alert) => {
            // повтор того же сообщения продлевает его, а не копится
            state
                .alerts
                .retain(|active| active.msg != alert.msg || active.kind != alert.kind);
            state.alerts.push(alert);
        }
        Action::RemoveAlert(id) => state.alerts.retain(|alert| alert.id != id),
    }
    state
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn post(id: i64, text: &str) -> Post {
        Post {
            id,
            user_id: 1,
            name: "Ann".to_string(),
            avatar: String::new(),
            text: text.to_string(),
            likes: vec![],
            comments: vec![],
            created_at: Utc.timestamp_opt(10, 0).single().expect("valid ts"),
        }
    }

    fn comment(id: i64) -> Comment {
        Comment {
            id,
            user_id: 2,
            name: "Bob".to_string(),
            avatar: String::new(),
            text: "nice".to_string(),
            created_at: Utc.timestamp_opt(20, 0).single().expect("valid ts"),
        }
    }

    #[test]
    fn login_then_logout_resets_auth() {
        let mut store = Store::default();
        assert!(store.auth.loading);

        store.dispatch(Action::LoginSuccess {
            token: "t".to_string(),
        });
        assert!(store.auth.is_authenticated);
        assert_eq!(store.auth.token.as_deref(), Some("t"));

        store.dispatch(Action::Logout);
        assert!(!store.auth.is_authenticated);
        assert!(!store.auth.loading);
        assert!(store.auth.token.is_none());
        assert!(store.auth.user.is_none());
    }

    #[test]
    fn add_and_delete_post_keep_newest_first() {
        let mut store = Store::default();
        store.dispatch(Action::GetPosts(vec![post(1, "old")]));
        store.dispatch(Action::AddPost(post(2, "new")));

        let ids: Vec<i64> = store.post.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);

        store.dispatch(Action::DeletePost(1));
        let ids: Vec<i64> = store.post.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn update_likes_touches_only_matching_post() {
        let mut store = Store::default();
        store.dispatch(Action::GetPosts(vec![post(1, "a"), post(2, "b")]));
        store.dispatch(Action::GetPost(post(2, "b")));

        store.dispatch(Action::UpdateLikes {
            id: 2,
            likes: vec![Like { user_id: 7 }],
        });

        assert!(store.post.posts[0].likes.is_empty());
        assert_eq!(store.post.posts[1].likes, vec![Like { user_id: 7 }]);
        assert_eq!(
            store.post.post.as_ref().map(|p| p.likes.len()),
            Some(1)
        );
    }

    #[test]
    fn comments_replace_and_remove_on_open_post() {
        let mut store = Store::default();
        store.dispatch(Action::GetPost(post(1, "a")));

        store.dispatch(Action::AddComment(vec![comment(5), comment(4)]));
        store.dispatch(Action::RemoveComment(4));

        let ids: Vec<i64> = store
            .post
            .post
            .as_ref()
            .expect("post is open")
            .comments
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn profile_error_clears_open_profile() {
        let mut store = Store::default();
        store.dispatch(Action::GetRepos(vec![GithubRepo {
            name: "hello".to_string(),
            html_url: None,
            description: None,
            stargazers_count: 0,
            watchers_count: 0,
            forks_count: 0,
        }]));
        store.dispatch(Action::ProfileError(ErrorInfo {
            msg: "Profile not found".to_string(),
            status: Some(404),
        }));

        assert!(store.profile.profile.is_none());
        assert_eq!(
            store.profile.error.as_ref().map(|e| e.status),
            Some(Some(404))
        );

        store.dispatch(Action::ClearProfile);
        assert!(store.profile.repos.is_empty());
    }

    #[test]
    fn alerts_are_removed_by_id() {
        let mut store = Store::default();
        let keep = Alert::new("Post Created", AlertKind::Success);
        let gone = Alert::new("Oops", AlertKind::Danger);
        store.dispatch(Action::SetAlert(keep.clone()));
        store.dispatch(Action::SetAlert(gone.clone()));

        store.dispatch(Action::RemoveAlert(gone.id));
        assert_eq!(store.alerts, vec![keep]);
    }

    #[test]
    fn expired_alerts_are_pruned() {
        let mut store = Store::default();
        let short = Alert::with_timeout("Post Removed", AlertKind::Success, Duration::zero());
        let long = Alert::new("Comment Added", AlertKind::Success);
        store.alerts = vec![short.clone(), long.clone()];

        store.dispatch(Action::ClearProfile);
        assert_eq!(store.alerts, vec![long.clone()]);

        store.prune_alerts(long.expires_at + Duration::milliseconds(1));
        assert!(store.alerts.is_empty());
    }

    #[test]
    fn repeated_alert_replaces_the_previous_one() {
        let mut store = Store::default();
        let first = Alert::new("Post already liked", AlertKind::Danger);
        let second = Alert::new("Post already liked", AlertKind::Danger);
        store.dispatch(Action::SetAlert(first));
        store.dispatch(Action::SetAlert(second.clone()));
        store.dispatch(Action::SetAlert(Alert::new(
            "Post already liked",
            AlertKind::Success,
        )));

        assert_eq!(store.alerts.len(), 2);
        assert_eq!(store.alerts[0], second);
    }
}
