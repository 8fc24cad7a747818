use std::sync::Arc;

use tracing::info;

use crate::data::post_repository::PostRepository;
use crate::data::profile_repository::ProfileRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::profile::{
    NewEducationRequest, NewExperienceRequest, Profile, UpsertProfileRequest,
    is_valid_github_username,
};
use crate::infrastructure::github::GithubClient;

pub(crate) struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    github: Arc<dyn GithubClient>,
}

impl ProfileService {
    pub(crate) fn new(
        profiles: Arc<dyn ProfileRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        github: Arc<dyn GithubClient>,
    ) -> Self {
        Self {
            profiles,
            posts,
            users,
            github,
        }
    }

    pub(crate) async fn profile_by_user(&self, user_id: i64) -> Result<Profile, DomainError> {
        self.profiles
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::not_found("Profile"))
    }

    pub(crate) async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        self.profiles.list_profiles().await
    }

    pub(crate) async fn upsert_profile(
        &self,
        user_id: i64,
        req: UpsertProfileRequest,
    ) -> Result<Profile, DomainError> {
        let fields = req.validate()?;
        self.profiles.upsert_profile(user_id, fields).await
    }

    pub(crate) async fn add_experience(
        &self,
        user_id: i64,
        req: NewExperienceRequest,
    ) -> Result<Profile, DomainError> {
        let input = req.validate()?;
        let profile = self.profile_by_user(user_id).await?;
        self.profiles.add_experience(profile.id, input).await?;
        self.profile_by_user(user_id).await
    }

    pub(crate) async fn remove_experience(
        &self,
        user_id: i64,
        experience_id: i64,
    ) -> Result<Profile, DomainError> {
        let profile = self.profile_by_user(user_id).await?;
        if !self
            .profiles
            .remove_experience(profile.id, experience_id)
            .await?
        {
            return Err(DomainError::not_found("Experience"));
        }
        self.profile_by_user(user_id).await
    }

    pub(crate) async fn add_education(
        &self,
        user_id: i64,
        req: NewEducationRequest,
    ) -> Result<Profile, DomainError> {
        let input = req.validate()?;
        let profile = self.profile_by_user(user_id).await?;
        self.profiles.add_education(profile.id, input).await?;
        self.profile_by_user(user_id).await
    }

    pub(crate) async fn remove_education(
        &self,
        user_id: i64,
        education_id: i64,
    ) -> Result<Profile, DomainError> {
        let profile = self.profile_by_user(user_id).await?;
        if !self
            .profiles
            .remove_education(profile.id, education_id)
            .await?
        {
            return Err(DomainError::not_found("Education"));
        }
        self.profile_by_user(user_id).await
    }

    /// Removes the user's posts, then the profile, then the user.
    pub(crate) async fn delete_account(&self, user_id: i64) -> Result<(), DomainError> {
        let posts = self.posts.delete_by_user(user_id).await?;
        let profile = self.profiles.delete_by_user(user_id).await?;
        let user = self.users.delete_user(user_id).await?;
        info!(user_id, posts, profile, user, "account deleted");
        Ok(())
    }

    pub(crate) async fn github_repos(
        &self,
        username: &str,
    ) -> Result<serde_json::Value, DomainError> {
        if !is_valid_github_username(username) {
            return Err(DomainError::not_found("GitHub profile"));
        }
        self.github
            .user_repos(username)
            .await?
            .ok_or(DomainError::not_found("GitHub profile"))
    }
}
