use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::profile::{NewEducation, NewExperience, Profile, ProfileFields};

#[async_trait]
pub(crate) trait ProfileRepository: Send + Sync {
    /// Creates the profile of `user_id` or updates it in place; one profile per user.
    async fn upsert_profile(
        &self,
        user_id: i64,
        fields: ProfileFields,
    ) -> Result<Profile, DomainError>;
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Profile>, DomainError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError>;
    async fn delete_by_user(&self, user_id: i64) -> Result<bool, DomainError>;

    async fn add_experience(
        &self,
        profile_id: i64,
        input: NewExperience,
    ) -> Result<(), DomainError>;
    /// Returns `false` when the profile holds no experience with that id.
    async fn remove_experience(
        &self,
        profile_id: i64,
        experience_id: i64,
    ) -> Result<bool, DomainError>;

    async fn add_education(&self, profile_id: i64, input: NewEducation)
    -> Result<(), DomainError>;
    async fn remove_education(
        &self,
        profile_id: i64,
        education_id: i64,
    ) -> Result<bool, DomainError>;
}
