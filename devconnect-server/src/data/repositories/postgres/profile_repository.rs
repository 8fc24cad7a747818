use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::profile::{
    Education, Experience, NewEducation, NewExperience, Profile, ProfileFields, Social,
};
use crate::domain::user::UserSummary;

#[derive(Debug, Clone)]
pub(crate) struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_SELECT: &str = r#"
    SELECT
        p.id,
        p.user_id,
        u.name AS user_name,
        u.avatar AS user_avatar,
        p.company,
        p.website,
        p.location,
        p.bio,
        p.status,
        p.github_username,
        p.skills,
        p.youtube,
        p.twitter,
        p.facebook,
        p.linkedin,
        p.instagram
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    user_id: i64,
    user_name: String,
    user_avatar: String,
    company: Option<String>,
    website: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    status: String,
    github_username: Option<String>,
    skills: Vec<String>,
    youtube: Option<String>,
    twitter: Option<String>,
    facebook: Option<String>,
    linkedin: Option<String>,
    instagram: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ExperienceRow {
    id: i64,
    profile_id: i64,
    title: String,
    company: String,
    location: Option<String>,
    from_date: NaiveDate,
    to_date: Option<NaiveDate>,
    is_current: bool,
    description: Option<String>,
}

#[derive(sqlx::FromRow)]
struct EducationRow {
    id: i64,
    profile_id: i64,
    school: String,
    degree: String,
    field_of_study: String,
    from_date: NaiveDate,
    to_date: Option<NaiveDate>,
    is_current: bool,
    description: Option<String>,
}

impl PostgresProfileRepository {
    /// Loads embedded experience/education for the given rows and assembles profiles.
    async fn hydrate(&self, rows: Vec<ProfileRow>) -> Result<Vec<Profile>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let experience = sqlx::query_as::<_, ExperienceRow>(
            r#"
            SELECT id, profile_id, title, company, location, from_date, to_date, is_current, description
            FROM profile_experience
            WHERE profile_id = ANY($1)
            ORDER BY id DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        let education = sqlx::query_as::<_, EducationRow>(
            r#"
            SELECT id, profile_id, school, degree, field_of_study, from_date, to_date, is_current, description
            FROM profile_education
            WHERE profile_id = ANY($1)
            ORDER BY id DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        let mut experience_by_profile: HashMap<i64, Vec<Experience>> = HashMap::new();
        for row in experience {
            experience_by_profile
                .entry(row.profile_id)
                .or_default()
                .push(Experience {
                    id: row.id,
                    title: row.title,
                    company: row.company,
                    location: row.location,
                    from: row.from_date,
                    to: row.to_date,
                    current: row.is_current,
                    description: row.description,
                });
        }

        let mut education_by_profile: HashMap<i64, Vec<Education>> = HashMap::new();
        for row in education {
            education_by_profile
                .entry(row.profile_id)
                .or_default()
                .push(Education {
                    id: row.id,
                    school: row.school,
                    degree: row.degree,
                    field_of_study: row.field_of_study,
                    from: row.from_date,
                    to: row.to_date,
                    current: row.is_current,
                    description: row.description,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| Profile {
                id: row.id,
                user: UserSummary {
                    id: row.user_id,
                    name: row.user_name,
                    avatar: row.user_avatar,
                },
                company: row.company,
                website: row.website,
                location: row.location,
                bio: row.bio,
                status: row.status,
                github_username: row.github_username,
                skills: row.skills,
                social: Social {
                    youtube: row.youtube,
                    twitter: row.twitter,
                    facebook: row.facebook,
                    linkedin: row.linkedin,
                    instagram: row.instagram,
                },
                experience: experience_by_profile.remove(&row.id).unwrap_or_default(),
                education: education_by_profile.remove(&row.id).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn upsert_profile(
        &self,
        user_id: i64,
        fields: ProfileFields,
    ) -> Result<Profile, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id, company, website, location, bio, status, github_username, skills,
                youtube, twitter, facebook, linkedin, instagram
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                company = COALESCE(EXCLUDED.company, profiles.company),
                website = COALESCE(EXCLUDED.website, profiles.website),
                location = COALESCE(EXCLUDED.location, profiles.location),
                bio = COALESCE(EXCLUDED.bio, profiles.bio),
                status = EXCLUDED.status,
                github_username = COALESCE(EXCLUDED.github_username, profiles.github_username),
                skills = EXCLUDED.skills,
                youtube = EXCLUDED.youtube,
                twitter = EXCLUDED.twitter,
                facebook = EXCLUDED.facebook,
                linkedin = EXCLUDED.linkedin,
                instagram = EXCLUDED.instagram
            "#,
        )
        .bind(user_id)
        .bind(&fields.company)
        .bind(&fields.website)
        .bind(&fields.location)
        .bind(&fields.bio)
        .bind(&fields.status)
        .bind(&fields.github_username)
        .bind(&fields.skills)
        .bind(&fields.social.youtube)
        .bind(&fields.social.twitter)
        .bind(&fields.social.facebook)
        .bind(&fields.social.linkedin)
        .bind(&fields.social.instagram)
        .execute(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        self.find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::Unexpected("profile vanished during upsert".to_string()))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!("{PROFILE_SELECT} WHERE p.user_id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![row]).await?.pop())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!("{PROFILE_SELECT} ORDER BY p.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        self.hydrate(rows).await
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_experience(
        &self,
        profile_id: i64,
        input: NewExperience,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profile_experience
                (profile_id, title, company, location, from_date, to_date, is_current, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile_id)
        .bind(&input.title)
        .bind(&input.company)
        .bind(&input.location)
        .bind(input.from)
        .bind(input.to)
        .bind(input.current)
        .bind(&input.description)
        .execute(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        Ok(())
    }

    async fn remove_experience(
        &self,
        profile_id: i64,
        experience_id: i64,
    ) -> Result<bool, DomainError> {
        let result =
            sqlx::query("DELETE FROM profile_experience WHERE id = $1 AND profile_id = $2")
                .bind(experience_id)
                .bind(profile_id)
                .execute(&self.pool)
                .await
                .map_err(map_profile_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_education(
        &self,
        profile_id: i64,
        input: NewEducation,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profile_education
                (profile_id, school, degree, field_of_study, from_date, to_date, is_current, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(profile_id)
        .bind(&input.school)
        .bind(&input.degree)
        .bind(&input.field_of_study)
        .bind(input.from)
        .bind(input.to)
        .bind(input.current)
        .bind(&input.description)
        .execute(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        Ok(())
    }

    async fn remove_education(
        &self,
        profile_id: i64,
        education_id: i64,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM profile_education WHERE id = $1 AND profile_id = $2")
            .bind(education_id)
            .bind(profile_id)
            .execute(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_profile_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return match db_err.constraint() {
            Some("profiles_user_id_fkey") => DomainError::not_found("User"),
            _ => DomainError::not_found("Profile"),
        };
    }
    DomainError::Unexpected(err.to_string())
}
