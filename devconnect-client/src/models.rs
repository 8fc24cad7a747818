use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Текущий пользователь (ответ `GET /api/auth`).
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// URL аватара (Gravatar).
    pub avatar: String,
    /// Дата и время регистрации (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Владелец профиля.
pub struct ProfileUser {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Имя.
    pub name: String,
    /// URL аватара.
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Ссылки на социальные сети.
pub struct Social {
    /// YouTube.
    pub youtube: Option<String>,
    /// Twitter.
    pub twitter: Option<String>,
    /// Facebook.
    pub facebook: Option<String>,
    /// LinkedIn.
    pub linkedin: Option<String>,
    /// Instagram.
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Запись об опыте работы.
pub struct Experience {
    /// Идентификатор записи.
    pub id: i64,
    /// Должность.
    pub title: String,
    /// Компания.
    pub company: String,
    /// Место.
    pub location: Option<String>,
    /// Дата начала.
    pub from: NaiveDate,
    /// Дата окончания; `None` для текущего места.
    pub to: Option<NaiveDate>,
    /// Работает ли пользователь там сейчас.
    pub current: bool,
    /// Описание.
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Запись об образовании.
pub struct Education {
    /// Идентификатор записи.
    pub id: i64,
    /// Учебное заведение.
    pub school: String,
    /// Степень.
    pub degree: String,
    /// Специальность.
    pub field_of_study: String,
    /// Дата начала.
    pub from: NaiveDate,
    /// Дата окончания; `None` если обучение продолжается.
    pub to: Option<NaiveDate>,
    /// Продолжается ли обучение.
    pub current: bool,
    /// Описание.
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Профиль разработчика.
///
/// `experience` и `education` упорядочены от новых к старым.
pub struct Profile {
    /// Идентификатор профиля.
    pub id: i64,
    /// Владелец профиля.
    pub user: ProfileUser,
    /// Компания.
    pub company: Option<String>,
    /// Сайт.
    pub website: Option<String>,
    /// Местоположение.
    pub location: Option<String>,
    /// О себе.
    pub bio: Option<String>,
    /// Статус (например, `Developer`).
    pub status: String,
    /// Логин на GitHub.
    pub github_username: Option<String>,
    /// Навыки.
    pub skills: Vec<String>,
    /// Социальные сети.
    pub social: Social,
    /// Опыт работы.
    pub experience: Vec<Experience>,
    /// Образование.
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичный репозиторий GitHub (подмножество полей upstream API).
pub struct GithubRepo {
    /// Имя репозитория.
    pub name: String,
    /// Ссылка на репозиторий.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Описание.
    #[serde(default)]
    pub description: Option<String>,
    /// Звёзды.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Наблюдатели.
    #[serde(default)]
    pub watchers_count: u64,
    /// Форки.
    #[serde(default)]
    pub forks_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Лайк поста.
pub struct Like {
    /// Кто поставил лайк.
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Комментарий к посту.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Автор.
    pub user_id: i64,
    /// Имя автора на момент написания.
    pub name: String,
    /// Аватар автора на момент написания.
    pub avatar: String,
    /// Текст.
    pub text: String,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пост ленты.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Автор.
    pub user_id: i64,
    /// Имя автора на момент публикации.
    pub name: String,
    /// Аватар автора на момент публикации.
    pub avatar: String,
    /// Текст.
    pub text: String,
    /// Лайки, новые первыми.
    pub likes: Vec<Like>,
    /// Комментарии, новые первыми.
    pub comments: Vec<Comment>,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Данные формы профиля для `POST /api/profile`.
pub struct ProfileInput {
    /// Компания.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Сайт.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Местоположение.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// О себе.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Статус (обязательное поле).
    pub status: String,
    /// Логин на GitHub.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    /// Навыки через запятую (обязательное поле).
    pub skills: String,
    /// YouTube.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Twitter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Facebook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    /// LinkedIn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Instagram.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Данные формы опыта работы для `PUT /api/profile/experience`.
pub struct ExperienceInput {
    /// Должность.
    pub title: String,
    /// Компания.
    pub company: String,
    /// Место.
    pub location: Option<String>,
    /// Дата начала.
    pub from: NaiveDate,
    /// Дата окончания.
    pub to: Option<NaiveDate>,
    /// Текущее место работы.
    pub current: bool,
    /// Описание.
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Данные формы образования для `PUT /api/profile/education`.
pub struct EducationInput {
    /// Учебное заведение.
    pub school: String,
    /// Степень.
    pub degree: String,
    /// Специальность.
    pub field_of_study: String,
    /// Дата начала.
    pub from: NaiveDate,
    /// Дата окончания.
    pub to: Option<NaiveDate>,
    /// Обучение продолжается.
    pub current: bool,
    /// Описание.
    pub description: Option<String>,
}
