use async_trait::async_trait;

use super::{Collections, MemoryStore, ProfileRecord};
use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::profile::{
    Education, Experience, NewEducation, NewExperience, Profile, ProfileFields,
};
use crate::domain::user::UserSummary;

fn assemble(
    state: &Collections,
    user_id: i64,
    record: &ProfileRecord,
) -> Result<Profile, DomainError> {
    let owner = state
        .users
        .get(&user_id)
        .ok_or_else(|| DomainError::Unexpected(format!("profile owner {user_id} is missing")))?;
    let fields = record.fields.clone();

    Ok(Profile {
        id: record.id,
        user: UserSummary::from(&owner.user),
        company: fields.company,
        website: fields.website,
        location: fields.location,
        bio: fields.bio,
        status: fields.status,
        github_username: fields.github_username,
        skills: fields.skills,
        social: fields.social,
        experience: record.experience.clone(),
        education: record.education.clone(),
    })
}

fn by_profile_id(state: &mut Collections, profile_id: i64) -> Option<&mut ProfileRecord> {
    state.profiles.values_mut().find(|p| p.id == profile_id)
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn upsert_profile(
        &self,
        user_id: i64,
        fields: ProfileFields,
    ) -> Result<Profile, DomainError> {
        let mut state = self.inner.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(DomainError::not_found("User"));
        }

        if state.profiles.contains_key(&user_id) {
            if let Some(record) = state.profiles.get_mut(&user_id) {
                record.fields = fields.merged_over(&record.fields);
            }
        } else {
            let id = state.next_id();
            state.profiles.insert(
                user_id,
                ProfileRecord {
                    id,
                    fields,
                    experience: Vec::new(),
                    education: Vec::new(),
                },
            );
        }

        let record = state
            .profiles
            .get(&user_id)
            .ok_or_else(|| DomainError::Unexpected("profile vanished during upsert".into()))?;
        assemble(&state, user_id, record)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Profile>, DomainError> {
        let state = self.inner.read().await;
        state
            .profiles
            .get(&user_id)
            .map(|record| assemble(&state, user_id, record))
            .transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let state = self.inner.read().await;
        state
            .profiles
            .iter()
            .map(|(user_id, record)| assemble(&state, *user_id, record))
            .collect()
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        Ok(state.profiles.remove(&user_id).is_some())
    }

    async fn add_experience(
        &self,
        profile_id: i64,
        input: NewExperience,
    ) -> Result<(), DomainError> {
        let mut state = self.inner.write().await;
        let id = state.next_id();
        let record =
            by_profile_id(&mut state, profile_id).ok_or(DomainError::not_found("Profile"))?;
        record.experience.insert(
            0,
            Experience {
                id,
                title: input.title,
                company: input.company,
                location: input.location,
                from: input.from,
                to: input.to,
                current: input.current,
                description: input.description,
            },
        );
        Ok(())
    }

    async fn remove_experience(
        &self,
        profile_id: i64,
        experience_id: i64,
    ) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        let Some(record) = by_profile_id(&mut state, profile_id) else {
            return Ok(false);
        };
        let before = record.experience.len();
        record.experience.retain(|e| e.id != experience_id);
        Ok(record.experience.len() != before)
    }

    async fn add_education(
        &self,
        profile_id: i64,
        input: NewEducation,
    ) -> Result<(), DomainError> {
        let mut state = self.inner.write().await;
        let id = state.next_id();
        let record =
            by_profile_id(&mut state, profile_id).ok_or(DomainError::not_found("Profile"))?;
        record.education.insert(
            0,
            Education {
                id,
                school: input.school,
                degree: input.degree,
                field_of_study: input.field_of_study,
                from: input.from,
                to: input.to,
                current: input.current,
                description: input.description,
            },
        );
        Ok(())
    }

    async fn remove_education(
        &self,
        profile_id: i64,
        education_id: i64,
    ) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        let Some(record) = by_profile_id(&mut state, profile_id) else {
            return Ok(false);
        };
        let before = record.education.len();
        record.education.retain(|e| e.id != education_id);
        Ok(record.education.len() != before)
    }
}
