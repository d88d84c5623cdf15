//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! Accounts live in `accounts`; optional contact details live in
//! `user_profiles` and are created lazily on first read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::now;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, Email, PasswordDigest, Role, UserId, UserProfile, Username,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{AccountRow, NewAccountRow, NewUserProfileRow, UserProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, user_profiles};

const USERNAME_CONSTRAINT: &str = "accounts_username_key";
const EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, AccountRepositoryError::connection)
}

/// Unique violations become conflicts naming the taken attribute.
fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match unique_violation(&error) {
        Some(USERNAME_CONSTRAINT) => AccountRepositoryError::conflict("username already registered"),
        Some(EMAIL_CONSTRAINT) => AccountRepositoryError::conflict("email already registered"),
        Some(_) => AccountRepositoryError::conflict("account already exists"),
        None => map_basic_diesel_error(
            error,
            AccountRepositoryError::query,
            AccountRepositoryError::connection,
        ),
    }
}

fn corrupt(column: &str, err: impl std::fmt::Display) -> AccountRepositoryError {
    AccountRepositoryError::query(format!("invalid stored {column}: {err}"))
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    Ok(Account {
        id: UserId::from_uuid(row.id),
        username: Username::new(&row.username).map_err(|err| corrupt("username", err))?,
        email: Email::new(&row.email).map_err(|err| corrupt("email", err))?,
        role: row
            .role
            .parse::<Role>()
            .map_err(|err| corrupt("role", err))?,
        password: PasswordDigest::from_stored(row.password_digest),
        created_at: row.created_at,
        last_login_at: row.last_login_at,
    })
}

fn row_to_profile(row: UserProfileRow) -> UserProfile {
    UserProfile {
        phone: row.phone,
        organization: row.organization,
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAccountRow {
            id: *account.id.as_uuid(),
            username: account.username.as_ref(),
            email: account.email.as_ref(),
            role: account.role.as_str(),
            password_digest: account.password.as_str(),
            created_at: account.created_at,
        };
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        accounts::table
            .filter(accounts::username.eq(username.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        accounts::table
            .find(id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn list_members(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AccountRow> = accounts::table
            .filter(accounts::role.ne(Role::Admin.as_str()))
            .order((accounts::created_at.asc(), accounts::username.asc()))
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_account).collect()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(accounts::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn update_password(
        &self,
        id: &UserId,
        password: &PasswordDigest,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(accounts::table.find(id.as_uuid()))
            .set(accounts::password_digest.eq(password.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update_email(
        &self,
        id: &UserId,
        email: &Email,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(accounts::table.find(id.as_uuid()))
            .set(accounts::email.eq(email.as_ref()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn record_login(
        &self,
        id: &UserId,
        at: DateTime<Utc>,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(accounts::table.find(id.as_uuid()))
            .set(accounts::last_login_at.eq(Some(at)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn profile(&self, id: &UserId) -> Result<UserProfile, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_profiles::table)
            .values(&NewUserProfileRow {
                user_id: *id.as_uuid(),
                phone: None,
                organization: None,
            })
            .on_conflict(user_profiles::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row: UserProfileRow = user_profiles::table
            .find(id.as_uuid())
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_profile(row))
    }

    async fn save_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(user_profiles::table)
            .values(&NewUserProfileRow {
                user_id: *id.as_uuid(),
                phone: profile.phone.as_deref(),
                organization: profile.organization.as_deref(),
            })
            .on_conflict(user_profiles::user_id)
            .do_update()
            .set((
                user_profiles::phone.eq(excluded(user_profiles::phone)),
                user_profiles::organization.eq(excluded(user_profiles::organization)),
                user_profiles::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        accounts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
