//! Request validation failures rendered as `invalid_request` errors.
//!
//! Each error carries `details: {field, code}` so clients can highlight the
//! offending input.

use serde_json::json;

use crate::domain::{AccountValidationError, Error, LoginValidationError, UserId};

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Field name and stable code for an account validation failure.
fn describe_account_error(error: &AccountValidationError) -> (&'static str, &'static str) {
    match error {
        AccountValidationError::InvalidId => ("id", "invalid_uuid"),
        AccountValidationError::EmptyUsername => ("username", "empty_username"),
        AccountValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
        AccountValidationError::InvalidEmail => ("email", "invalid_email"),
        AccountValidationError::EmailTooLong { .. } => ("email", "email_too_long"),
        AccountValidationError::PhoneTooLong { .. } => ("phone", "phone_too_long"),
        AccountValidationError::OrganizationTooLong { .. } => {
            ("organization", "organization_too_long")
        }
        AccountValidationError::UnknownRole => ("userType", "unknown_user_type"),
    }
}

pub(crate) fn map_account_validation_error(error: AccountValidationError) -> Error {
    let (field, code) = describe_account_error(&error);
    field_error(field, code, error.to_string())
}

pub(crate) fn map_login_validation_error(error: LoginValidationError) -> Error {
    let (field, code) = match &error {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
        LoginValidationError::UnknownRole => ("userType", "unknown_user_type"),
        LoginValidationError::PasswordMismatch => ("confirmPassword", "password_mismatch"),
        LoginValidationError::Account(inner) => describe_account_error(inner),
    };
    field_error(field, code, error.to_string())
}

/// Parse a user id path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(map_account_validation_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    fn details(error: &Error) -> (Option<&str>, Option<&str>) {
        let details = error.details().expect("details present");
        (
            details.get("field").and_then(Value::as_str),
            details.get("code").and_then(Value::as_str),
        )
    }

    #[rstest]
    #[case(LoginValidationError::EmptyPassword, "password", "empty_password")]
    #[case(LoginValidationError::UnknownRole, "userType", "unknown_user_type")]
    #[case(
        LoginValidationError::PasswordMismatch,
        "confirmPassword",
        "password_mismatch"
    )]
    #[case(
        LoginValidationError::Account(AccountValidationError::InvalidEmail),
        "email",
        "invalid_email"
    )]
    fn login_errors_name_the_field(
        #[case] error: LoginValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let message = error.to_string();
        let mapped = map_login_validation_error(error);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.message(), message);
        assert_eq!(details(&mapped), (Some(field), Some(code)));
    }

    #[rstest]
    fn malformed_user_ids_are_rejected() {
        let error = parse_user_id("not-a-uuid").expect_err("invalid id");
        assert_eq!(details(&error), (Some("id"), Some("invalid_uuid")));
        assert!(parse_user_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    }
}
