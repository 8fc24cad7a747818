use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) user_id: i64,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

/// Stateless HS256 token issuer/verifier. Tokens cannot be revoked before `exp`.
pub(crate) struct JwtService {
    secret: String,
    ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 100 * 60 * 60;
    const LEEWAY_SECONDS: u64 = 10;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    pub(crate) fn generate_token(&self, user_id: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = Self::LEEWAY_SECONDS;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::{Claims, JwtError, JwtService};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_verifies_to_same_user() {
        let jwt = JwtService::new(SECRET, 3600);
        let token = jwt.generate_token(42).expect("token must be issued");

        let claims = jwt.verify_token(&token).expect("token must verify");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn non_positive_ttl_falls_back_to_default() {
        let jwt = JwtService::new(SECRET, 0);
        let token = jwt.generate_token(1).expect("token must be issued");
        let claims = jwt.verify_token(&token).expect("token must verify");
        assert_eq!(claims.exp - claims.iat, 360_000);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("ffffffffffffffffffffffffffffffff", 3600);
        let verifier = JwtService::new(SECRET, 3600);
        let token = issuer.generate_token(1).expect("token must be issued");

        assert!(matches!(
            verifier.verify_token(&token),
            Err(JwtError::Decode(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtService::new(SECRET, 3600);
        let claims = Claims {
            user_id: 1,
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token must encode");

        assert!(jwt.verify_token(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let jwt = JwtService::new(SECRET, 3600);
        assert!(jwt.verify_token("not.a.token").is_err());
    }
}
