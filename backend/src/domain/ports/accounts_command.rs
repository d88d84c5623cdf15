//! Driving port for account mutations: registration, removal and
//! self-service profile changes.

use async_trait::async_trait;

use crate::domain::{
    Error, PasswordChange, ProfileUpdate, RegistrationRequest, Role, SessionIdentity, UserId,
};

/// Domain use-case port for changing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create an account and return the identity to log in as.
    async fn register(&self, request: RegistrationRequest) -> Result<SessionIdentity, Error>;

    /// Remove a non-admin account on behalf of an administrator.
    async fn delete_member(&self, actor: &SessionIdentity, target: &UserId) -> Result<(), Error>;

    /// Apply a partial profile update to the caller's account.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<(), Error>;

    /// Replace the caller's password after checking the current one.
    async fn change_password(&self, user_id: &UserId, change: PasswordChange)
    -> Result<(), Error>;
}

/// Fixture command that accepts every change without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountsCommand;

#[async_trait]
impl AccountsCommand for FixtureAccountsCommand {
    async fn register(&self, request: RegistrationRequest) -> Result<SessionIdentity, Error> {
        Ok(SessionIdentity {
            user_id: UserId::random(),
            role: request.role,
        })
    }

    async fn delete_member(&self, actor: &SessionIdentity, target: &UserId) -> Result<(), Error> {
        if actor.role != Role::Admin {
            return Err(Error::forbidden("admin role required"));
        }
        Err(Error::not_found(format!("user not found: {target}")))
    }

    async fn update_profile(&self, _user_id: &UserId, _update: ProfileUpdate) -> Result<(), Error> {
        Ok(())
    }

    async fn change_password(
        &self,
        _user_id: &UserId,
        _change: PasswordChange,
    ) -> Result<(), Error> {
        Ok(())
    }
}
