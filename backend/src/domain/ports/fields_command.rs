//! Driving port for field administration.

use async_trait::async_trait;

use crate::domain::{Error, FieldName};

/// Domain use-case port for removing fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldsCommand: Send + Sync {
    /// Delete a field together with its track points.
    ///
    /// Returns a `not_found` error when no field has that name.
    async fn delete_field(&self, name: &FieldName) -> Result<(), Error>;
}

/// Fixture command with nothing stored, so every delete misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFieldsCommand;

#[async_trait]
impl FieldsCommand for FixtureFieldsCommand {
    async fn delete_field(&self, name: &FieldName) -> Result<(), Error> {
        Err(Error::not_found(format!("field not found: {name}")))
    }
}
