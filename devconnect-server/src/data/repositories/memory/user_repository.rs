use async_trait::async_trait;

use super::{MemoryStore, UserRecord, now};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.inner.write().await;
        if state.users.values().any(|r| r.user.email == input.email) {
            return Err(DomainError::Conflict("User already exists".to_string()));
        }

        let id = state.next_id();
        let user = User::new(id, input.name, input.email, input.avatar, now())?;
        state.users.insert(
            id,
            UserRecord {
                user: user.clone(),
                password_hash: input.password_hash,
            },
        );
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let state = self.inner.read().await;
        Ok(state
            .users
            .values()
            .find(|r| r.user.email == email)
            .map(|r| UserCredentials {
                user: r.user.clone(),
                password_hash: r.password_hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let state = self.inner.read().await;
        Ok(state.users.get(&id).map(|r| r.user.clone()))
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.inner.write().await;
        Ok(state.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ann".to_string(),
            email: email.to_string(),
            avatar: "https://avatar".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store
            .create_user(new_user("a@x.com"))
            .await
            .expect("first insert must succeed");

        let err = store
            .create_user(new_user("a@x.com"))
            .await
            .expect_err("second insert must fail");
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.inner.read().await.users.len(), 1);
    }

    #[tokio::test]
    async fn find_and_delete_roundtrip() {
        let store = MemoryStore::new();
        let user = store
            .create_user(new_user("a@x.com"))
            .await
            .expect("insert must succeed");

        let creds = store
            .find_by_email("a@x.com")
            .await
            .expect("lookup must succeed")
            .expect("user must exist");
        assert_eq!(creds.user.id, user.id);
        assert_eq!(creds.password_hash, "hash");

        assert!(store.delete_user(user.id).await.expect("delete"));
        assert!(store.find_by_id(user.id).await.expect("lookup").is_none());
        assert!(!store.delete_user(user.id).await.expect("delete"));
    }
}
