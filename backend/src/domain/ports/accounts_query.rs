//! Driving port for account reads.

use async_trait::async_trait;

use crate::domain::{Account, AccountProfile, Email, Error, UserId, UserProfile, Username};

/// Domain use-case port for listing accounts and reading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Every non-admin account.
    async fn list_members(&self) -> Result<Vec<Account>, Error>;

    /// Account details and profile of `user_id`.
    async fn profile(&self, user_id: &UserId) -> Result<AccountProfile, Error>;
}

/// Fixture query returning no members and a canned profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountsQuery;

#[async_trait]
impl AccountsQuery for FixtureAccountsQuery {
    async fn list_members(&self) -> Result<Vec<Account>, Error> {
        Ok(Vec::new())
    }

    async fn profile(&self, _user_id: &UserId) -> Result<AccountProfile, Error> {
        let username = Username::new("grower")
            .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
        let email = Email::new("grower@example.com")
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(AccountProfile {
            username,
            email,
            profile: UserProfile::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_profile_is_empty_but_valid() {
        let profile = FixtureAccountsQuery
            .profile(&UserId::random())
            .await
            .expect("fixture profile");
        assert_eq!(profile.username.as_ref(), "grower");
        assert_eq!(profile.profile, UserProfile::default());
    }
}
