use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::profile::{
    Education, Experience, NewEducationRequest, NewExperienceRequest, Profile, Social,
    UpsertProfileRequest,
};
use crate::domain::user::UserSummary;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult, MsgBody};
use crate::presentation::http::extract::{AppJson, AppPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

/// Skills may be sent as a comma separated string or as a list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum SkillsInput {
    Csv(String),
    List(Vec<String>),
}

impl SkillsInput {
    fn into_csv(self) -> String {
        match self {
            SkillsInput::Csv(raw) => raw,
            SkillsInput::List(items) => items.join(","),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct UpsertProfileDto {
    pub(crate) company: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) bio: Option<String>,
    #[validate(length(min = 1, message = "Status is required"))]
    pub(crate) status: String,
    #[serde(alias = "githubusername")]
    pub(crate) github_username: Option<String>,
    #[validate(required(message = "Skills is required"))]
    pub(crate) skills: Option<SkillsInput>,
    pub(crate) youtube: Option<String>,
    pub(crate) twitter: Option<String>,
    pub(crate) facebook: Option<String>,
    pub(crate) linkedin: Option<String>,
    pub(crate) instagram: Option<String>,
}

impl From<UpsertProfileDto> for UpsertProfileRequest {
    fn from(dto: UpsertProfileDto) -> Self {
        Self {
            company: dto.company,
            website: dto.website,
            location: dto.location,
            bio: dto.bio,
            status: dto.status,
            github_username: dto.github_username,
            skills: dto.skills.map(SkillsInput::into_csv).unwrap_or_default(),
            social: Social {
                youtube: dto.youtube,
                twitter: dto.twitter,
                facebook: dto.facebook,
                linkedin: dto.linkedin,
                instagram: dto.instagram,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct AddExperienceDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub(crate) company: String,
    pub(crate) location: Option<String>,
    #[validate(required(message = "From date is required"))]
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

impl From<AddExperienceDto> for NewExperienceRequest {
    fn from(dto: AddExperienceDto) -> Self {
        Self {
            title: dto.title,
            company: dto.company,
            location: dto.location,
            from: dto.from,
            to: dto.to,
            current: dto.current,
            description: dto.description,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub(crate) struct AddEducationDto {
    #[validate(length(min = 1, message = "School is required"))]
    pub(crate) school: String,
    #[validate(length(min = 1, message = "Degree is required"))]
    pub(crate) degree: String,
    #[serde(alias = "fieldofstudy")]
    #[validate(length(min = 1, message = "Field of study is required"))]
    pub(crate) field_of_study: String,
    #[validate(required(message = "From date is required"))]
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

impl From<AddEducationDto> for NewEducationRequest {
    fn from(dto: AddEducationDto) -> Self {
        Self {
            school: dto.school,
            degree: dto.degree,
            field_of_study: dto.field_of_study,
            from: dto.from,
            to: dto.to,
            current: dto.current,
            description: dto.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileUserDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) avatar: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SocialDto {
    pub(crate) youtube: Option<String>,
    pub(crate) twitter: Option<String>,
    pub(crate) facebook: Option<String>,
    pub(crate) linkedin: Option<String>,
    pub(crate) instagram: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ExperienceDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) location: Option<String>,
    pub(crate) from: NaiveDate,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct EducationDto {
    pub(crate) id: i64,
    pub(crate) school: String,
    pub(crate) degree: String,
    pub(crate) field_of_study: String,
    pub(crate) from: NaiveDate,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileDto {
    pub(crate) id: i64,
    pub(crate) user: ProfileUserDto,
    pub(crate) company: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) status: String,
    pub(crate) github_username: Option<String>,
    pub(crate) skills: Vec<String>,
    pub(crate) social: SocialDto,
    pub(crate) experience: Vec<ExperienceDto>,
    pub(crate) education: Vec<EducationDto>,
}

impl From<UserSummary> for ProfileUserDto {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            name: user.name,
            avatar: user.avatar,
        }
    }
}

impl From<Social> for SocialDto {
    fn from(social: Social) -> Self {
        Self {
            youtube: social.youtube,
            twitter: social.twitter,
            facebook: social.facebook,
            linkedin: social.linkedin,
            instagram: social.instagram,
        }
    }
}

impl From<Experience> for ExperienceDto {
    fn from(exp: Experience) -> Self {
        Self {
            id: exp.id,
            title: exp.title,
            company: exp.company,
            location: exp.location,
            from: exp.from,
            to: exp.to,
            current: exp.current,
            description: exp.description,
        }
    }
}

impl From<Education> for EducationDto {
    fn from(edu: Education) -> Self {
        Self {
            id: edu.id,
            school: edu.school,
            degree: edu.degree,
            field_of_study: edu.field_of_study,
            from: edu.from,
            to: edu.to,
            current: edu.current,
            description: edu.description,
        }
    }
}

impl From<Profile> for ProfileDto {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            user: profile.user.into(),
            company: profile.company,
            website: profile.website,
            location: profile.location,
            bio: profile.bio,
            status: profile.status,
            github_username: profile.github_username,
            skills: profile.skills,
            social: profile.social.into(),
            experience: profile.experience.into_iter().map(Into::into).collect(),
            education: profile.education.into_iter().map(Into::into).collect(),
        }
    }
}

type ProfileResponse = AppResult<(StatusCode, Json<ProfileDto>)>;

fn ok_profile(profile: Profile) -> ProfileResponse {
    Ok((StatusCode::OK, Json(ProfileDto::from(profile))))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "All profiles", body = [ProfileDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_profiles(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<ProfileDto>>)> {
    let profiles = state.profile_service.list_profiles().await?;
    Ok((
        StatusCode::OK,
        Json(profiles.into_iter().map(ProfileDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/profile/currentuser",
    tag = "profile",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Own profile", body = ProfileDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn current_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> ProfileResponse {
    ok_profile(state.profile_service.profile_by_user(auth.user_id).await?)
}

#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    tag = "profile",
    params(
        ("user_id" = i64, Path, description = "Owner user id")
    ),
    responses(
        (status = 200, description = "Profile found", body = ProfileDto),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn profile_by_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> ProfileResponse {
    ok_profile(state.profile_service.profile_by_user(user_id).await?)
}

#[utoipa::path(
    post,
    path = "/api/profile",
    tag = "profile",
    security(
        ("api_key" = [])
    ),
    request_body = UpsertProfileDto,
    responses(
        (status = 200, description = "Profile created or updated", body = ProfileDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn upsert_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<UpsertProfileDto>,
) -> ProfileResponse {
    dto.validate()?;
    let profile = state
        .profile_service
        .upsert_profile(auth.user_id, dto.into())
        .await?;
    ok_profile(profile)
}

#[utoipa::path(
    delete,
    path = "/api/profile",
    tag = "profile",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "User, profile and posts deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_account(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<MsgBody>)> {
    state.profile_service.delete_account(auth.user_id).await?;
    Ok((StatusCode::OK, Json(MsgBody::new("User deleted"))))
}

#[utoipa::path(
    put,
    path = "/api/profile/experience",
    tag = "profile",
    security(
        ("api_key" = [])
    ),
    request_body = AddExperienceDto,
    responses(
        (status = 200, description = "Experience added", body = ProfileDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn add_experience(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<AddExperienceDto>,
) -> ProfileResponse {
    dto.validate()?;
    let profile = state
        .profile_service
        .add_experience(auth.user_id, dto.into())
        .await?;
    ok_profile(profile)
}

#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    tag = "profile",
    security(
        ("api_key" = [])
    ),
    params(
        ("exp_id" = i64, Path, description = "Experience entry id")
    ),
    responses(
        (status = 200, description = "Experience removed", body = ProfileDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Profile or entry not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn remove_experience(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(exp_id): AppPath<i64>,
) -> ProfileResponse {
    let profile = state
        .profile_service
        .remove_experience(auth.user_id, exp_id)
        .await?;
    ok_profile(profile)
}

#[utoipa::path(
    put,
    path = "/api/profile/education",
    tag = "profile",
    security(
        ("api_key" = [])
    ),
    request_body = AddEducationDto,
    responses(
        (status = 200, description = "Education added", body = ProfileDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn add_education(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppJson(dto): AppJson<AddEducationDto>,
) -> ProfileResponse {
    dto.validate()?;
    let profile = state
        .profile_service
        .add_education(auth.user_id, dto.into())
        .await?;
    ok_profile(profile)
}

#[utoipa::path(
    delete,
    path = "/api/profile/education/{edu_id}",
    tag = "profile",
    security(
        ("api_key" = [])
    ),
    params(
        ("edu_id" = i64, Path, description = "Education entry id")
    ),
    responses(
        (status = 200, description = "Education removed", body = ProfileDto),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Profile or entry not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn remove_education(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    AppPath(edu_id): AppPath<i64>,
) -> ProfileResponse {
    let profile = state
        .profile_service
        .remove_education(auth.user_id, edu_id)
        .await?;
    ok_profile(profile)
}

#[utoipa::path(
    get,
    path = "/api/profile/github/{username}",
    tag = "profile",
    params(
        ("username" = String, Path, description = "GitHub login")
    ),
    responses(
        (status = 200, description = "Upstream repository list, passed through"),
        (status = 404, description = "No GitHub profile found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn github_repos(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let repos = state
        .profile_service
        .github_repos(&username)
        .await
        .map_err(|err| match err {
            DomainError::NotFound(_) => AppError::NotFound("No GitHub profile found"),
            other => AppError::Domain(other),
        })?;
    Ok((StatusCode::OK, Json(repos)))
}
