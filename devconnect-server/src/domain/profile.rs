use chrono::NaiveDate;

use super::error::DomainError;
use super::user::UserSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Social {
    pub(crate) youtube: Option<String>,
    pub(crate) twitter: Option<String>,
    pub(crate) facebook: Option<String>,
    pub(crate) linkedin: Option<String>,
    pub(crate) instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Experience {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) location: Option<String>,
    pub(crate) from: NaiveDate,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Education {
    pub(crate) id: i64,
    pub(crate) school: String,
    pub(crate) degree: String,
    pub(crate) field_of_study: String,
    pub(crate) from: NaiveDate,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

/// A profile as read back from the store, with its owner populated.
///
/// `experience` and `education` are ordered most-recent-first.
#[derive(Debug, Clone)]
pub(crate) struct Profile {
    pub(crate) id: i64,
    pub(crate) user: UserSummary,
    pub(crate) company: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) status: String,
    pub(crate) github_username: Option<String>,
    pub(crate) skills: Vec<String>,
    pub(crate) social: Social,
    pub(crate) experience: Vec<Experience>,
    pub(crate) education: Vec<Education>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct UpsertProfileRequest {
    pub(crate) company: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) status: String,
    pub(crate) github_username: Option<String>,
    pub(crate) skills: String,
    pub(crate) social: Social,
}

/// Validated profile submission. `None` scalars keep whatever is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProfileFields {
    pub(crate) company: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) status: String,
    pub(crate) github_username: Option<String>,
    pub(crate) skills: Vec<String>,
    pub(crate) social: Social,
}

impl ProfileFields {
    /// Applies a new submission over stored fields: omitted scalars are kept,
    /// `status`, `skills` and `social` are replaced.
    pub(crate) fn merged_over(self, previous: &ProfileFields) -> ProfileFields {
        ProfileFields {
            company: self.company.or_else(|| previous.company.clone()),
            website: self.website.or_else(|| previous.website.clone()),
            location: self.location.or_else(|| previous.location.clone()),
            bio: self.bio.or_else(|| previous.bio.clone()),
            status: self.status,
            github_username: self
                .github_username
                .or_else(|| previous.github_username.clone()),
            skills: self.skills,
            social: self.social,
        }
    }
}

impl UpsertProfileRequest {
    pub(crate) fn validate(self) -> Result<ProfileFields, DomainError> {
        let status = required(&self.status, "status", "Status is required")?;
        let skills = split_skills(&self.skills);
        if skills.is_empty() {
            return Err(DomainError::Validation {
                field: "skills",
                message: "Skills is required",
            });
        }

        Ok(ProfileFields {
            company: optional(self.company),
            website: optional(self.website),
            location: optional(self.location),
            bio: optional(self.bio),
            status,
            github_username: optional(self.github_username),
            skills,
            social: Social {
                youtube: optional(self.social.youtube),
                twitter: optional(self.social.twitter),
                facebook: optional(self.social.facebook),
                linkedin: optional(self.social.linkedin),
                instagram: optional(self.social.instagram),
            },
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NewExperienceRequest {
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) location: Option<String>,
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewExperience {
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) location: Option<String>,
    pub(crate) from: NaiveDate,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

impl NewExperienceRequest {
    pub(crate) fn validate(self) -> Result<NewExperience, DomainError> {
        let title = required(&self.title, "title", "Title is required")?;
        let company = required(&self.company, "company", "Company is required")?;
        let from = self.from.ok_or(DomainError::Validation {
            field: "from",
            message: "From date is required",
        })?;
        let to = closing_date(from, self.to, self.current)?;

        Ok(NewExperience {
            title,
            company,
            location: optional(self.location),
            from,
            to,
            current: self.current,
            description: optional(self.description),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NewEducationRequest {
    pub(crate) school: String,
    pub(crate) degree: String,
    pub(crate) field_of_study: String,
    pub(crate) from: Option<NaiveDate>,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewEducation {
    pub(crate) school: String,
    pub(crate) degree: String,
    pub(crate) field_of_study: String,
    pub(crate) from: NaiveDate,
    pub(crate) to: Option<NaiveDate>,
    pub(crate) current: bool,
    pub(crate) description: Option<String>,
}

impl NewEducationRequest {
    pub(crate) fn validate(self) -> Result<NewEducation, DomainError> {
        let school = required(&self.school, "school", "School is required")?;
        let degree = required(&self.degree, "degree", "Degree is required")?;
        let field_of_study = required(
            &self.field_of_study,
            "field_of_study",
            "Field of study is required",
        )?;
        let from = self.from.ok_or(DomainError::Validation {
            field: "from",
            message: "From date is required",
        })?;
        let to = closing_date(from, self.to, self.current)?;

        Ok(NewEducation {
            school,
            degree,
            field_of_study,
            from,
            to,
            current: self.current,
            description: optional(self.description),
        })
    }
}

/// GitHub logins are 1..=39 ASCII alphanumerics or dashes.
pub(crate) fn is_valid_github_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

pub(crate) fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn closing_date(
    from: NaiveDate,
    to: Option<NaiveDate>,
    current: bool,
) -> Result<Option<NaiveDate>, DomainError> {
    if current {
        return Ok(None);
    }
    match to {
        Some(to) if to < from => Err(DomainError::Validation {
            field: "to",
            message: "To date must not be before from date",
        }),
        other => Ok(other),
    }
}

fn required(
    value: &str,
    field: &'static str,
    message: &'static str,
) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation { field, message });
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
