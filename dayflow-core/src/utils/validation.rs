//! Input validation helpers
//!
//! Centralized text length constants and validation functions shared by the
//! auth, directory, leave and profile services.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Person names, job titles, departments
pub const MAX_NAME_LEN: usize = 200;

/// Leave reasons, admin comments
pub const MAX_NOTE_LEN: usize = 500;

/// Phone numbers, badge codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum length for a rotated password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Badge prefix for provisioned employees
pub const BADGE_PREFIX: &str = "EMP-";

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides and a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid email format: {}", email),
        )
        .with_detail("field", "email"));
    }
    Ok(())
}

/// Badge codes must be exactly `EMP-` followed by four digits.
pub fn is_valid_badge(badge: &str) -> bool {
    match badge.strip_prefix(BADGE_PREFIX) {
        Some(digits) => digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Validate a provisioned badge code (`EMP-####`).
pub fn validate_badge(badge: &str) -> Result<(), AppError> {
    if !is_valid_badge(badge) {
        return Err(AppError::new(ErrorCode::EmployeeIdInvalid).with_detail("employeeId", badge));
    }
    Ok(())
}

/// Validate that a new password equals its confirmation.
pub fn validate_password_confirmation(
    next: &str,
    confirm: &str,
    mismatch_message: &str,
) -> Result<(), AppError> {
    if next != confirm {
        return Err(AppError::with_message(ErrorCode::PasswordMismatch, mismatch_message));
    }
    Ok(())
}

/// Validate the length rules for a rotated password.
pub fn validate_password_strength(next: &str) -> Result<(), AppError> {
    if next.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    if next.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Sarah", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let err = validate_required_text("abcdef", "name", 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "phone", 5).is_ok());
        assert!(validate_optional_text(&Some("12345".into()), "phone", 5).is_ok());
        assert!(validate_optional_text(&Some("123456".into()), "phone", 5).is_err());
    }

    #[test]
    fn test_badge_format() {
        assert!(is_valid_badge("EMP-1234"));
        assert!(is_valid_badge("EMP-0000"));
        assert!(!is_valid_badge("EMP-12"));
        assert!(!is_valid_badge("EMP-12345"));
        assert!(!is_valid_badge("emp-1234"));
        assert!(!is_valid_badge("EMP-12a4"));
        assert!(!is_valid_badge("XEMP-1234"));

        let err = validate_badge("EMP-12").unwrap_err();
        assert_eq!(
            err.message,
            "Identity Protocol Violation: ID must follow the EMP-#### format."
        );
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("alex@dayflow.com").is_ok());
        assert!(validate_email("alex@dayflow").is_err());
        assert!(validate_email("alexdayflow.com").is_err());
        assert!(validate_email("@dayflow.com").is_err());
        assert_eq!(
            validate_email("").unwrap_err().code,
            ErrorCode::RequiredField
        );
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password_confirmation("secret1", "secret1", "Passwords do not match.").is_ok());
        let err = validate_password_confirmation("secret1", "secret2", "Passwords do not match.")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PasswordMismatch);
        assert_eq!(err.message, "Passwords do not match.");

        assert!(validate_password_strength("secret").is_ok());
        assert_eq!(
            validate_password_strength("abc").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
    }
}
