//! Fields: named agricultural plots that own uploaded track recordings.

use serde::{Deserialize, Serialize};

/// Maximum length of a field name, in characters.
pub const FIELD_NAME_MAX: usize = 100;

/// Suffix an upload file name must carry.
pub const CSV_SUFFIX: &str = ".csv";

/// Validation errors for [`FieldName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldNameValidationError {
    /// The name was empty once trimmed.
    #[error("field name must not be empty")]
    Empty,
    /// The name exceeded [`FIELD_NAME_MAX`] characters.
    #[error("field name must be at most {max} characters")]
    TooLong { max: usize },
    /// The upload file name did not end in `.csv`.
    #[error("file name must end in .csv")]
    NotCsv,
}

/// Unique, validated field name.
///
/// Field names are derived from upload file names by stripping the `.csv`
/// suffix, so `north-plot.csv` creates the field `north-plot`.
///
/// # Examples
/// ```
/// use fieldtrack::domain::FieldName;
///
/// let name = FieldName::from_file_name("north-plot.csv").expect("valid");
/// assert_eq!(name.as_ref(), "north-plot");
/// assert!(FieldName::from_file_name("north-plot.xlsx").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Validate and wrap a field name.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldNameValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(FieldNameValidationError::Empty);
        }
        if value.chars().count() > FIELD_NAME_MAX {
            return Err(FieldNameValidationError::TooLong {
                max: FIELD_NAME_MAX,
            });
        }
        Ok(Self(value))
    }

    /// Derive a field name from an uploaded file name.
    pub fn from_file_name(file_name: &str) -> Result<Self, FieldNameValidationError> {
        let stem = file_name
            .strip_suffix(CSV_SUFFIX)
            .ok_or(FieldNameValidationError::NotCsv)?;
        Self::new(stem)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = FieldNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

/// Stored field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Database-assigned identifier.
    pub id: i64,
    /// Unique name.
    pub name: FieldName,
}

/// Field name together with the number of tracks recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSummary {
    /// Field name.
    pub name: FieldName,
    /// Number of track points owned by the field.
    pub track_count: i64,
}
