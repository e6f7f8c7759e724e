//! User Repository Module
//!
//! Defines the data-access boundary the route handlers talk to, plus an
//! in-process implementation used when no database is configured and in tests.
//! The PostgreSQL implementation lives in [`crate::postgres::database`].

use super::error::UserError;
use super::models::{NewUser, User, UserField, UserPatch};
use crate::utils::password::security::PasswordService;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Operations the user routes need from persistence
///
/// Lookups return a list even when at most one row is expected; callers
/// decide how to treat surplus rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lists every user
    async fn find_all(&self) -> Result<Vec<User>, UserError>;

    /// Finds users by id; an unknown id is `UserNotFound`
    async fn find_by_id(&self, id: i64) -> Result<Vec<User>, UserError>;

    /// Finds users whose `field` equals `value`
    async fn find(&self, field: UserField, value: &str) -> Result<Vec<User>, UserError>;

    /// Creates a user and returns the stored record
    async fn create(&self, new_user: NewUser) -> Result<User, UserError>;

    /// Applies `patch` to a user and returns the updated record
    async fn find_by_id_and_update(&self, id: i64, patch: UserPatch) -> Result<User, UserError>;

    /// Removes a user and returns the removed record
    async fn find_by_id_and_delete(&self, id: i64) -> Result<User, UserError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    last_id: i64,
}

/// In-memory implementation of the UserStore
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    state: RwLock<MemoryState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record as-is, keeping its id
    ///
    /// The id counter moves past the seeded id. Duplicate ids are accepted.
    pub async fn insert_raw(&self, user: User) {
        let mut state = self.state.write().await;
        state.last_id = state.last_id.max(user.user_id);
        state.users.push(user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.state.read().await.users.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Vec<User>, UserError> {
        let state = self.state.read().await;
        let found: Vec<User> = state.users.iter().filter(|u| u.user_id == id).cloned().collect();

        if found.is_empty() {
            return Err(UserError::UserNotFound);
        }
        Ok(found)
    }

    async fn find(&self, field: UserField, value: &str) -> Result<Vec<User>, UserError> {
        let state = self.state.read().await;
        Ok(state.users.iter().filter(|u| field.matches(u, value)).cloned().collect())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let password = PasswordService::hash_password_blocking(new_user.password).await?;

        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.user_email == new_user.user_email) {
            return Err(UserError::EmailTaken);
        }

        state.last_id += 1;
        let user = User {
            user_id: state.last_id,
            user_email: new_user.user_email,
            password,
            color: None,
            token: new_user.token,
        };
        state.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id_and_update(&self, id: i64, patch: UserPatch) -> Result<User, UserError> {
        let password = match patch.password {
            Some(plain) => Some(PasswordService::hash_password_blocking(plain).await?),
            None => None,
        };

        let mut state = self.state.write().await;
        let user = state.users.iter_mut().find(|u| u.user_id == id).ok_or(UserError::UserNotFound)?;

        if let Some(hash) = password {
            user.password = hash;
        }
        Ok(user.clone())
    }

    async fn find_by_id_and_delete(&self, id: i64) -> Result<User, UserError> {
        let mut state = self.state.write().await;
        let index =
            state.users.iter().position(|u| u.user_id == id).ok_or(UserError::UserNotFound)?;

        Ok(state.users.remove(index))
    }
}
