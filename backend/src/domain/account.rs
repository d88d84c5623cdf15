//! Accounts, roles and the optional contact profile attached to them.
//!
//! Every account carries exactly one [`Role`]. Administrators manage fields
//! and other accounts; regular users upload and browse track data.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 150;
/// Maximum email length in characters.
pub const EMAIL_MAX: usize = 254;
/// Maximum phone number length in characters.
pub const PHONE_MAX: usize = 20;
/// Maximum organisation name length in characters.
pub const ORGANIZATION_MAX: usize = 100;

const SALT_BYTES: usize = 16;
const DIGEST_BYTES: usize = 32;
const DIGEST_SCHEME: &str = "pbkdf2_sha256";
/// PBKDF2 rounds for newly derived digests. Stored digests carry their own
/// count, so raising this never invalidates existing passwords.
const PBKDF2_ROUNDS: u32 = if cfg!(test) { 1_000 } else { 600_000 };

/// Validation failures for account and profile values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("email must be a valid address")]
    InvalidEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("phone must be at most {max} characters")]
    PhoneTooLong { max: usize },
    #[error("organization must be at most {max} characters")]
    OrganizationTooLong { max: usize },
    #[error("user type must be one of: admin, user")]
    UnknownRole,
}

/// Stable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its hyphenated UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role. Serialised as the `userType` values `admin` and `user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccountValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(AccountValidationError::UnknownRole),
        }
    }
}

/// Login name, trimmed and unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact email address, unique across accounts.
///
/// Only the shape `local@domain` is checked; deliverability is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(AccountValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// PBKDF2-HMAC-SHA256 password digest stored as
/// `pbkdf2_sha256$<rounds>$<salt hex>$<hash hex>`.
///
/// # Examples
/// ```
/// use fieldtrack::domain::PasswordDigest;
///
/// let digest = PasswordDigest::derive("hunter2");
/// assert!(digest.verify("hunter2"));
/// assert!(!digest.verify("hunter3"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `password` with a fresh random salt.
    #[must_use]
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(&salt, PBKDF2_ROUNDS, password)
    }

    fn with_salt(salt: &[u8], rounds: u32, password: &str) -> Self {
        Self(format!(
            "{DIGEST_SCHEME}${rounds}${}${}",
            hex::encode(salt),
            hex::encode(Self::hash(salt, rounds, password))
        ))
    }

    fn hash(salt: &[u8], rounds: u32, password: &str) -> [u8; DIGEST_BYTES] {
        let mut out = [0_u8; DIGEST_BYTES];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut out);
        out
    }

    /// Wrap a digest read back from storage.
    #[must_use]
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Check `password` against the digest in constant time. Malformed
    /// stored values never verify.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let mut parts = self.0.split('$');
        let (Some(DIGEST_SCHEME), Some(rounds), Some(salt_hex), Some(digest_hex), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return false;
        };
        let Some(rounds) = rounds.parse::<u32>().ok().filter(|r| *r > 0) else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
            return false;
        };
        let actual = Self::hash(&salt, rounds, password);
        expected.len() == actual.len()
            && expected
                .iter()
                .zip(actual.iter())
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub role: Role,
    pub password: PasswordDigest,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Identity recorded in the session once this account logs in.
    #[must_use]
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.id,
            role: self.role,
        }
    }
}

/// Who is logged in, as carried by the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub user_id: UserId,
    pub role: Role,
}

/// Optional contact details kept alongside an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub phone: Option<String>,
    pub organization: Option<String>,
}

/// Account details merged with its profile, as shown to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub username: Username,
    pub email: Email,
    pub profile: UserProfile,
}

/// Validated partial profile update. `None` leaves a value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub organization: Option<String>,
}

impl ProfileUpdate {
    /// Validate raw update values. Blank phone or organisation values clear
    /// the stored value.
    pub fn try_from_parts(
        email: Option<&str>,
        phone: Option<&str>,
        organization: Option<&str>,
    ) -> Result<Self, AccountValidationError> {
        let email = email.map(Email::new).transpose()?;
        let phone = phone
            .map(|raw| bounded(raw, PHONE_MAX, AccountValidationError::PhoneTooLong { max: PHONE_MAX }))
            .transpose()?;
        let organization = organization
            .map(|raw| {
                bounded(
                    raw,
                    ORGANIZATION_MAX,
                    AccountValidationError::OrganizationTooLong {
                        max: ORGANIZATION_MAX,
                    },
                )
            })
            .transpose()?;
        Ok(Self {
            email,
            phone,
            organization,
        })
    }

    /// Apply the update over `profile`, returning the merged value.
    #[must_use]
    pub fn apply_to(&self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            phone: merge(self.phone.as_ref(), profile.phone.as_ref()),
            organization: merge(self.organization.as_ref(), profile.organization.as_ref()),
        }
    }
}

fn bounded(
    raw: &str,
    max: usize,
    too_long: AccountValidationError,
) -> Result<String, AccountValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

fn merge(update: Option<&String>, current: Option<&String>) -> Option<String> {
    match update {
        Some(value) if value.is_empty() => None,
        Some(value) => Some(value.clone()),
        None => current.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn usernames_are_trimmed() {
        let parsed = Username::new("  alice ").expect("valid username");
        assert_eq!(parsed.as_ref(), "alice");
        assert_eq!(
            Username::new("   "),
            Err(AccountValidationError::EmptyUsername)
        );
    }

    #[rstest]
    fn usernames_are_bounded() {
        let long = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(long),
            Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    #[case("ada@example.org", true)]
    #[case(" ada@example.org ", true)]
    #[case("ada", false)]
    #[case("@example.org", false)]
    #[case("ada@", false)]
    #[case("a@b@c", false)]
    fn emails_need_local_and_domain_parts(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(Email::new(raw).is_ok(), valid);
    }

    #[rstest]
    #[case("admin", Ok(Role::Admin))]
    #[case(" user ", Ok(Role::User))]
    #[case("root", Err(AccountValidationError::UnknownRole))]
    fn roles_parse_from_user_type(
        #[case] raw: &str,
        #[case] expected: Result<Role, AccountValidationError>,
    ) {
        assert_eq!(raw.parse::<Role>(), expected);
    }

    #[rstest]
    fn digests_are_salted() {
        let first = PasswordDigest::derive("secret");
        let second = PasswordDigest::derive("secret");
        assert_ne!(first, second);
        assert!(first.verify("secret"));
        assert!(second.verify("secret"));
    }

    #[rstest]
    #[case("")]
    #[case("no-separator")]
    #[case("zz$zz")]
    #[case("00$00")]
    #[case("pbkdf2_sha256$0$00$00")]
    #[case("pbkdf2_sha256$x$00$00")]
    #[case("sha256$1$00$00")]
    #[case("pbkdf2_sha256$1$00$00$00")]
    fn malformed_digests_never_verify(#[case] stored: &str) {
        assert!(!PasswordDigest::from_stored(stored).verify(""));
    }

    #[rstest]
    fn known_digest_round_trips_through_storage() {
        let digest = PasswordDigest::with_salt(&[1, 2, 3], 10, "pw");
        let restored = PasswordDigest::from_stored(digest.as_str().to_owned());
        assert!(restored.as_str().starts_with("pbkdf2_sha256$10$010203$"));
        assert!(restored.verify("pw"));
        assert!(!restored.verify("pW"));
    }

    #[rstest]
    fn digests_record_their_round_count() {
        let stored = PasswordDigest::derive("secret");
        let rounds = stored.as_str().split('$').nth(1).expect("round count");
        assert_eq!(rounds, PBKDF2_ROUNDS.to_string());
        let reloaded = PasswordDigest::from_stored(stored.as_str().to_owned());
        assert!(reloaded.verify("secret"));
        assert!(!reloaded.verify("secret "));
    }

    #[rstest]
    fn known_pbkdf2_vector_verifies() {
        // RFC 7914 section 11: PBKDF2-HMAC-SHA256("passwd", "salt", 1).
        let stored = PasswordDigest::from_stored(
            "pbkdf2_sha256$1$73616c74$55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc",
        );
        assert!(stored.verify("passwd"));
        assert!(!stored.verify("password"));
    }

    #[rstest]
    fn profile_update_merges_and_clears() {
        let current = UserProfile {
            phone: Some("123".into()),
            organization: Some("Acme".into()),
        };
        let update = ProfileUpdate::try_from_parts(None, Some(" "), Some("Farm Co")).expect("valid");
        let merged = update.apply_to(&current);
        assert_eq!(merged.phone, None);
        assert_eq!(merged.organization.as_deref(), Some("Farm Co"));
    }

    #[rstest]
    fn profile_update_rejects_long_phone() {
        let phone = "1".repeat(PHONE_MAX + 1);
        assert_eq!(
            ProfileUpdate::try_from_parts(None, Some(&phone), None),
            Err(AccountValidationError::PhoneTooLong { max: PHONE_MAX })
        );
    }
}
