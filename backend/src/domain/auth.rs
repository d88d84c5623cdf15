//! Authentication primitives: login credentials, registrations and password
//! changes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{AccountValidationError, Email, Role, Username};

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// `userType` was neither `admin` nor `user`.
    UnknownRole,
    /// Password and confirmation differ.
    PasswordMismatch,
    /// A registration field failed account validation.
    Account(AccountValidationError),
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::UnknownRole => write!(f, "user type must be one of: admin, user"),
            Self::PasswordMismatch => write!(f, "passwords do not match"),
            Self::Account(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<AccountValidationError> for LoginValidationError {
    fn from(value: AccountValidationError) -> Self {
        match value {
            AccountValidationError::EmptyUsername => Self::EmptyUsername,
            AccountValidationError::UnknownRole => Self::UnknownRole,
            other => Self::Account(other),
        }
    }
}

fn require_password(password: &str) -> Result<Zeroizing<String>, LoginValidationError> {
    if password.is_empty() {
        return Err(LoginValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
/// - `role` is the role the caller claims; it must match the account's.
///
/// # Examples
/// ```
/// use fieldtrack::domain::{LoginCredentials, Role};
///
/// let creds = LoginCredentials::try_from_parts("admin", "password", "admin").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "password");
/// assert_eq!(creds.role(), Role::Admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
    role: Role,
}

impl LoginCredentials {
    /// Construct credentials from raw username, password and `userType`.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        user_type: &str,
    ) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        let password = require_password(password)?;
        let role = user_type.parse::<Role>()?;

        Ok(Self {
            username: normalized.to_owned(),
            password,
            role,
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Role the caller asked to log in as.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Validated self-service registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub username: Username,
    pub email: Email,
    pub password: Zeroizing<String>,
    pub role: Role,
}

/// Raw registration values as submitted by a client.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationParts<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub user_type: &'a str,
}

impl TryFrom<RegistrationParts<'_>> for RegistrationRequest {
    type Error = LoginValidationError;

    fn try_from(parts: RegistrationParts<'_>) -> Result<Self, Self::Error> {
        let username = Username::new(parts.username)?;
        let email = Email::new(parts.email)?;
        let password = require_password(parts.password)?;
        if parts.password != parts.confirm_password {
            return Err(LoginValidationError::PasswordMismatch);
        }
        let role = parts.user_type.parse::<Role>()?;
        Ok(Self {
            username,
            email,
            password,
            role,
        })
    }
}

/// Validated password change for the logged-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current: Zeroizing<String>,
    new: Zeroizing<String>,
}

impl PasswordChange {
    pub fn try_from_parts(current: &str, new: &str) -> Result<Self, LoginValidationError> {
        Ok(Self {
            current: require_password(current)?,
            new: require_password(new)?,
        })
    }

    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    pub fn new_password(&self) -> &str {
        self.new.as_str()
    }
}
