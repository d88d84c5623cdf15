//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing infrastructure, so
//! HTTP handler tests can substitute a test double instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Role, SessionIdentity, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and the requested role.
    ///
    /// Unknown usernames and wrong passwords are `unauthorized`; a valid
    /// password for an account whose role differs from the requested one is
    /// `forbidden`.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<SessionIdentity, Error>;
}

const FIXTURE_PASSWORD: &str = "password";
const FIXTURE_ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// In-memory authenticator used when no database is configured.
///
/// `admin` / `password` is an administrator and `grower` / `password` a
/// regular user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<SessionIdentity, Error> {
        let (id, role) = match credentials.username() {
            "admin" => (FIXTURE_ADMIN_ID, Role::Admin),
            "grower" => (FIXTURE_USER_ID, Role::User),
            _ => return Err(Error::unauthorized("invalid credentials")),
        };
        if credentials.password() != FIXTURE_PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        if credentials.role() != role {
            return Err(Error::forbidden("user type does not match this account"));
        }
        let user_id = UserId::new(id)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
        Ok(SessionIdentity { user_id, role })
    }
}
