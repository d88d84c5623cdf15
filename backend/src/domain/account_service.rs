//! Account services: authentication, registration, administration and
//! self-service profile management.
//!
//! This module implements the [`LoginService`], [`AccountsCommand`] and
//! [`AccountsQuery`] driving ports over an [`AccountRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AccountsCommand, AccountsQuery, LoginService,
};
use crate::domain::{
    Account, AccountProfile, Error, LoginCredentials, PasswordChange, PasswordDigest,
    ProfileUpdate, RegistrationRequest, SessionIdentity, UserId, Username,
};

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    accounts: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R> {
    /// Create a new service with the given repository and clock.
    pub fn new(accounts: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { accounts, clock }
    }
}

fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        AccountRepositoryError::Query { message } => {
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::Conflict { message } => Error::conflict(message),
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    async fn require_account(&self, id: &UserId) -> Result<Account, Error> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(map_account_error)?
            .ok_or_else(|| Error::not_found(format!("user not found: {id}")))
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: AccountRepository,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<SessionIdentity, Error> {
        let username = Username::new(credentials.username()).map_err(|_| invalid_credentials())?;
        let account = self
            .accounts
            .find_by_username(&username)
            .await
            .map_err(map_account_error)?
            .ok_or_else(invalid_credentials)?;

        if !account.password.verify(credentials.password()) {
            return Err(invalid_credentials());
        }
        if account.role != credentials.role() {
            return Err(Error::forbidden("user type does not match this account"));
        }

        self.accounts
            .record_login(&account.id, self.clock.utc())
            .await
            .map_err(map_account_error)?;
        info!(user_id = %account.id, role = %account.role, "login succeeded");
        Ok(account.identity())
    }
}

#[async_trait]
impl<R> AccountsCommand for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, request: RegistrationRequest) -> Result<SessionIdentity, Error> {
        let account = Account {
            id: UserId::random(),
            username: request.username,
            email: request.email,
            role: request.role,
            password: PasswordDigest::derive(request.password.as_str()),
            created_at: self.clock.utc(),
            last_login_at: None,
        };
        self.accounts
            .insert(&account)
            .await
            .map_err(map_account_error)?;
        info!(user_id = %account.id, role = %account.role, "account registered");
        Ok(account.identity())
    }

    async fn delete_member(&self, actor: &SessionIdentity, target: &UserId) -> Result<(), Error> {
        if !actor.role.is_admin() {
            return Err(Error::forbidden("admin role required"));
        }
        if actor.user_id == *target {
            return Err(Error::invalid_request("cannot delete your own account"));
        }
        let account = self.require_account(target).await?;
        if account.role.is_admin() {
            return Err(Error::invalid_request("cannot delete an administrator"));
        }
        let deleted = self
            .accounts
            .delete(target)
            .await
            .map_err(map_account_error)?;
        if !deleted {
            return Err(Error::not_found(format!("user not found: {target}")));
        }
        info!(user_id = %target, actor = %actor.user_id, "account deleted");
        Ok(())
    }

    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate) -> Result<(), Error> {
        let account = self.require_account(user_id).await?;
        if let Some(email) = update.email.as_ref().filter(|email| **email != account.email) {
            self.accounts
                .update_email(user_id, email)
                .await
                .map_err(map_account_error)?;
        }
        let current = self
            .accounts
            .profile(user_id)
            .await
            .map_err(map_account_error)?;
        self.accounts
            .save_profile(user_id, &update.apply_to(&current))
            .await
            .map_err(map_account_error)
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        change: PasswordChange,
    ) -> Result<(), Error> {
        let account = self.require_account(user_id).await?;
        if !account.password.verify(change.current()) {
            return Err(Error::invalid_request("current password is incorrect"));
        }
        self.accounts
            .update_password(user_id, &PasswordDigest::derive(change.new_password()))
            .await
            .map_err(map_account_error)?;
        info!(user_id = %user_id, "password changed");
        Ok(())
    }
}

#[async_trait]
impl<R> AccountsQuery for AccountService<R>
where
    R: AccountRepository,
{
    async fn list_members(&self) -> Result<Vec<Account>, Error> {
        self.accounts
            .list_members()
            .await
            .map_err(map_account_error)
    }

    async fn profile(&self, user_id: &UserId) -> Result<AccountProfile, Error> {
        let account = self.require_account(user_id).await?;
        let profile = self
            .accounts
            .profile(user_id)
            .await
            .map_err(map_account_error)?;
        Ok(AccountProfile {
            username: account.username,
            email: account.email,
            profile,
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
