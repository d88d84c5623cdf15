//! Port abstraction for account and profile persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Account, Email, PasswordDigest, UserId, UserProfile, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// A unique account attribute is already taken.
        Conflict { message: String } =>
            "account conflict: {message}",
    }
}

/// Port for account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. Duplicate usernames or emails yield
    /// [`AccountRepositoryError::Conflict`].
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Non-admin accounts, oldest first.
    async fn list_members(&self) -> Result<Vec<Account>, AccountRepositoryError>;

    /// Delete an account and its profile. Returns `false` when absent.
    async fn delete(&self, id: &UserId) -> Result<bool, AccountRepositoryError>;

    async fn update_password(
        &self,
        id: &UserId,
        password: &PasswordDigest,
    ) -> Result<(), AccountRepositoryError>;

    /// Change the account email. Duplicates yield
    /// [`AccountRepositoryError::Conflict`].
    async fn update_email(
        &self,
        id: &UserId,
        email: &Email,
    ) -> Result<(), AccountRepositoryError>;

    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError>;

    /// Profile for `id`, created empty on first access.
    async fn profile(&self, id: &UserId) -> Result<UserProfile, AccountRepositoryError>;

    async fn save_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<(), AccountRepositoryError>;

    /// Number of stored accounts.
    async fn count(&self) -> Result<i64, AccountRepositoryError>;
}
