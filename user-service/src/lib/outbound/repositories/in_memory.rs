//! In-memory user repository implementation

use std::collections::BTreeMap;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserCredentials;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-memory implementation of UserRepository.
///
/// Ids are assigned sequentially from 1 and email uniqueness is enforced
/// under the write lock, matching the Postgres `UNIQUE(email)` constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, UserCredentials>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, i64>,
    last_id: i64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        let state = self.state.read().await;
        Ok(state.email_index.contains_key(email.as_str()))
    }

    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state.email_index.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        state.last_id += 1;
        let id = state.last_id;
        let created = User {
            id: UserId(id),
            name: user.name,
            email: user.email,
        };

        state
            .email_index
            .insert(created.email.as_str().to_string(), id);
        state.users.insert(
            id,
            UserCredentials {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, UserError> {
        let state = self.state.read().await;

        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state.users.get(&id.0).map(|c| c.user.clone()))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let state = self.state.read().await;
        Ok(state.users.values().map(|c| c.user.clone()).collect())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        name: &Name,
        email: &EmailAddress,
    ) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        let old_email = match state.users.get(&id.0) {
            Some(existing) => existing.user.email.clone(),
            None => return Err(UserError::NotFound(id.to_string())),
        };

        // If email changed, check uniqueness and update index
        if old_email != *email {
            if state.email_index.contains_key(email.as_str()) {
                return Err(UserError::EmailAlreadyExists(email.to_string()));
            }
            state.email_index.remove(old_email.as_str());
            state.email_index.insert(email.as_str().to_string(), id.0);
        }

        let entry = state
            .users
            .get_mut(&id.0)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        entry.user.name = name.clone();
        entry.user.email = email.clone();

        Ok(entry.user.clone())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserError> {
        let mut state = self.state.write().await;

        match state.users.remove(&id.0) {
            Some(removed) => {
                state.email_index.remove(removed.user.email.as_str());
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}
