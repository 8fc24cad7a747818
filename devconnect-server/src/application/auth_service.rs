use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::info;

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::avatar::gravatar_url;
use crate::infrastructure::jwt::JwtService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService {
    repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".to_string()));
        }

        let password_hash = self.hash_password(&req.password)?;
        let new_user = Self::into_new_user(req, password_hash);
        let user = self.repo.create_user(new_user).await?;
        info!(user_id = user.id, "user registered");

        let access_token = self.issue_token(&user)?;
        Ok(AuthResult { user, access_token })
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_email(&req.email).await? {
            Some(user_creds) => user_creds,
            None => {
                // одинаковое время ответа для неизвестного email и неверного пароля
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &user_creds.password_hash)?;

        let access_token = self.issue_token(&user_creds.user)?;
        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }

    pub(crate) async fn current_user(&self, user_id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("User"))
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.jwt
            .generate_token(user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    fn into_new_user(req: RegisterRequest, password_hash: String) -> NewUser {
        NewUser {
            avatar: gravatar_url(&req.email),
            name: req.name,
            email: req.email,
            password_hash,
        }
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::AuthService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, User};
    use crate::infrastructure::jwt::JwtService;

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        login_credentials: Arc<Mutex<Option<UserCredentials>>>,
        create_user_out: User,
    }

    impl FakeUserRepo {
        fn new(create_user_out: User) -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                login_credentials: Arc::new(Mutex::new(None)),
                create_user_out,
            }
        }

        fn set_login_credentials(&self, creds: Option<UserCredentials>) {
            *self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(self.create_user_out.clone())
        }

        async fn find_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned")
                .clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
            Ok(Some(self.create_user_out.clone()).filter(|user| user.id == id))
        }

        async fn delete_user(&self, _id: i64) -> Result<bool, DomainError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn register_creates_user_and_returns_token() {
        let repo = FakeUserRepo::new(sample_user(1, "Ann", "ann@example.com"));
        let service = AuthService::new(Arc::new(repo.clone()), test_jwt());

        let req = RegisterRequest {
            name: "  Ann  ".to_string(),
            email: "  ANN@EXAMPLE.COM  ".to_string(),
            password: "secret1".to_string(),
        };

        let result = service.register(req).await.expect("register must succeed");

        assert_eq!(result.user.name, "Ann");
        assert!(!result.access_token.is_empty());

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.name, "Ann");
        assert_eq!(created.email, "ann@example.com");
        assert!(created.avatar.starts_with("https://www.gravatar.com/avatar/"));
        assert!(created.password_hash.starts_with("$argon2id$"));
        assert_ne!(created.password_hash, "secret1");
    }

    #[tokio::test]
    async fn register_rejects_taken_email_without_creating() {
        let repo = FakeUserRepo::new(sample_user(1, "Ann", "ann@example.com"));
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(1, "Ann", "ann@example.com"),
            password_hash: "irrelevant".to_string(),
        }));
        let service = AuthService::new(Arc::new(repo.clone()), test_jwt());

        let req = RegisterRequest {
            name: "Other".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret1".to_string(),
        };

        let err = service.register(req).await.expect_err("register must fail");
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new(sample_user(1, "Ann", "ann@example.com"));
        repo.set_login_credentials(None);
        let service = AuthService::new(Arc::new(repo), test_jwt());

        let req = LoginRequest {
            email: "ann@example.com".to_string(),
            password: "some-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new(sample_user(1, "Ann", "ann@example.com"));
        let service = AuthService::new(Arc::new(repo.clone()), test_jwt());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(1, "Ann", "ann@example.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            email: "ann@example.com".to_string(),
            password: "wrong-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let repo = FakeUserRepo::new(sample_user(1, "Ann", "ann@example.com"));
        let jwt = test_jwt();
        let service = AuthService::new(Arc::new(repo.clone()), jwt.clone());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(1, "Ann", "ann@example.com"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            email: "ann@example.com".to_string(),
            password: "correct-password".to_string(),
        };

        let result = service.login(req).await.expect("login must succeed");
        assert_eq!(result.user.id, 1);
        let claims = jwt
            .verify_token(&result.access_token)
            .expect("issued token must verify");
        assert_eq!(claims.user_id, 1);
    }

    #[test]
    fn dummy_hash_is_a_valid_argon2_hash() {
        let service = AuthService::new(
            Arc::new(FakeUserRepo::new(sample_user(1, "Ann", "ann@example.com"))),
            test_jwt(),
        );

        let err = service
            .verify_password("whatever", AuthService::DUMMY_PASSWORD_HASH)
            .expect_err("dummy hash must not match");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn current_user_is_not_found_after_deletion() {
        let repo = FakeUserRepo::new(sample_user(1, "Ann", "ann@example.com"));
        let service = AuthService::new(Arc::new(repo), test_jwt());

        assert_eq!(service.current_user(1).await.expect("user").id, 1);
        let err = service.current_user(2).await.expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    fn sample_user(id: i64, name: &str, email: &str) -> User {
        User::new(id, name, email, "https://avatar", Utc::now())
            .expect("sample user must be valid")
    }

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("0123456789abcdef0123456789abcdef", 3600))
    }
}
