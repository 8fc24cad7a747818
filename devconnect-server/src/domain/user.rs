use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = normalize_name(&self.name)?;
        let email = normalize_email(&self.email)?;
        let password_len = self.password.chars().count();
        if !(6..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "Please enter a password with 6 or more characters",
            });
        }
        Ok(Self {
            name,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "Password is required",
            });
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) avatar: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let name = normalize_name(&name.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            name,
            email,
            avatar: avatar.into(),
            created_at,
        })
    }
}

/// Public part of a user that other documents embed or populate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserSummary {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) avatar: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err(DomainError::Validation {
            field: "name",
            message: "Name is required",
        });
    }
    Ok(name.to_string())
}

pub(crate) fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "Please include a valid email",
        });
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, RegisterRequest, User, normalize_email, normalize_name};
    use chrono::Utc;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "Ann", "test@example.com", "", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn normalize_email_rejects_garbage() {
        assert!(normalize_email("not-an-email").is_err());
    }

    #[test]
    fn name_must_not_be_blank() {
        assert!(normalize_name("   ").is_err());
        assert_eq!(normalize_name("  Ann ").expect("valid"), "Ann");
    }

    #[test]
    fn register_password_length_is_checked() {
        let short = RegisterRequest {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = RegisterRequest {
            name: " A ".to_string(),
            email: "A@X.com".to_string(),
            password: "secret1".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.name, "A");
        assert_eq!(validated.email, "a@x.com");
    }

    #[test]
    fn login_requires_password() {
        let req = LoginRequest {
            email: "a@x.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
