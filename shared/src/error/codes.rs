//! Unified error codes for Dayflow
//!
//! This module defines all error codes used by the store, the services and the CLI.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Profile errors
//! - 4xxx: Leave errors
//! - 5xxx: Attendance errors
//! - 6xxx: Payroll errors
//! - 7xxx: Dashboard errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they survive JSON
/// output from the CLI unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// No active session
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Account awaits admin approval
    AccountPending = 1003,
    /// Account is disabled
    AccountDisabled = 1004,
    /// Recovery email not registered
    EmailNotFound = 1005,
    /// Verification code invalid
    VerificationCodeInvalid = 1006,
    /// Password and confirmation differ
    PasswordMismatch = 1007,
    /// Password too short
    PasswordTooShort = 1008,
    /// Current password check failed
    CurrentPasswordInvalid = 1009,
    /// Recovery flow step called out of order
    RecoveryStepInvalid = 1010,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Employee role required
    EmployeeRoleRequired = 2003,
    /// Field cannot be edited by this role
    FieldNotEditable = 2004,

    // ==================== 3xxx: Profile ====================
    /// File too large
    FileTooLarge = 3001,
    /// Unsupported file format
    UnsupportedFileFormat = 3002,
    /// Empty file provided
    EmptyFile = 3003,

    // ==================== 4xxx: Leave ====================
    /// Leave request not found
    LeaveNotFound = 4001,
    /// Leave request already approved or rejected
    LeaveAlreadyDecided = 4002,
    /// Leave end date before start date
    LeaveInvalidRange = 4003,
    /// Decision is not Approved/Rejected
    LeaveInvalidDecision = 4004,

    // ==================== 5xxx: Attendance ====================
    /// Attendance record not found
    AttendanceNotFound = 5001,
    /// Open session already exists for today
    AlreadyCheckedIn = 5002,
    /// No open session to close
    NotCheckedIn = 5003,

    // ==================== 6xxx: Payroll ====================
    /// Payroll batch already running
    PayrollBatchInProgress = 6001,

    // ==================== 7xxx: Dashboard ====================
    /// Widget restricted to admins
    WidgetNotAllowed = 7001,
    /// Unknown widget id
    WidgetNotFound = 7002,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee email already exists
    EmployeeEmailExists = 8002,
    /// Cannot delete self
    EmployeeCannotDeleteSelf = 8003,
    /// Badge code does not follow EMP-####
    EmployeeIdInvalid = 8004,
    /// Employee is not pending approval
    EmployeeNotPending = 8005,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Storage corrupted (snapshot undecodable)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the user-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Please complete all mandatory protocols.",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid identifier or passkey. Access denied.",
            ErrorCode::AccountPending => {
                "Identity is pending verification. Contact System Admin for clearance."
            }
            ErrorCode::AccountDisabled => "Identity has been suspended. Contact IT.",
            ErrorCode::EmailNotFound => "Email entity not found.",
            ErrorCode::VerificationCodeInvalid => "Invalid verification code.",
            ErrorCode::PasswordMismatch => "Passwords do not match.",
            ErrorCode::PasswordTooShort => {
                "Protocol requirement: Passkey must be at least 6 characters."
            }
            ErrorCode::CurrentPasswordInvalid => "Current system passkey verification failed.",
            ErrorCode::RecoveryStepInvalid => "Recovery step out of order",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Admin role required",
            ErrorCode::EmployeeRoleRequired => "Employee role required",
            ErrorCode::FieldNotEditable => "Field is not editable for this role",

            // Profile
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::EmptyFile => "Empty file provided",

            // Leave
            ErrorCode::LeaveNotFound => "Leave request not found",
            ErrorCode::LeaveAlreadyDecided => "Leave request has already been decided",
            ErrorCode::LeaveInvalidRange => "Leave end date precedes start date",
            ErrorCode::LeaveInvalidDecision => "Leave can only be approved or rejected",

            // Attendance
            ErrorCode::AttendanceNotFound => "Attendance record not found",
            ErrorCode::AlreadyCheckedIn => "Already checked in today",
            ErrorCode::NotCheckedIn => "No open attendance session",

            // Payroll
            ErrorCode::PayrollBatchInProgress => "Payroll batch already in progress",

            // Dashboard
            ErrorCode::WidgetNotAllowed => "Widget is restricted to administrators",
            ErrorCode::WidgetNotFound => "Widget not found",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Identity already exists in system records.",
            ErrorCode::EmployeeCannotDeleteSelf => "Cannot delete the active session identity",
            ErrorCode::EmployeeIdInvalid => {
                "Identity Protocol Violation: ID must follow the EMP-#### format."
            }
            ErrorCode::EmployeeNotPending => "Employee is not pending approval",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageCorrupted => "Storage corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::AccountPending),
            1004 => Ok(ErrorCode::AccountDisabled),
            1005 => Ok(ErrorCode::EmailNotFound),
            1006 => Ok(ErrorCode::VerificationCodeInvalid),
            1007 => Ok(ErrorCode::PasswordMismatch),
            1008 => Ok(ErrorCode::PasswordTooShort),
            1009 => Ok(ErrorCode::CurrentPasswordInvalid),
            1010 => Ok(ErrorCode::RecoveryStepInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),
            2003 => Ok(ErrorCode::EmployeeRoleRequired),
            2004 => Ok(ErrorCode::FieldNotEditable),

            // Profile
            3001 => Ok(ErrorCode::FileTooLarge),
            3002 => Ok(ErrorCode::UnsupportedFileFormat),
            3003 => Ok(ErrorCode::EmptyFile),

            // Leave
            4001 => Ok(ErrorCode::LeaveNotFound),
            4002 => Ok(ErrorCode::LeaveAlreadyDecided),
            4003 => Ok(ErrorCode::LeaveInvalidRange),
            4004 => Ok(ErrorCode::LeaveInvalidDecision),

            // Attendance
            5001 => Ok(ErrorCode::AttendanceNotFound),
            5002 => Ok(ErrorCode::AlreadyCheckedIn),
            5003 => Ok(ErrorCode::NotCheckedIn),

            // Payroll
            6001 => Ok(ErrorCode::PayrollBatchInProgress),

            // Dashboard
            7001 => Ok(ErrorCode::WidgetNotAllowed),
            7002 => Ok(ErrorCode::WidgetNotFound),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeEmailExists),
            8003 => Ok(ErrorCode::EmployeeCannotDeleteSelf),
            8004 => Ok(ErrorCode::EmployeeIdInvalid),
            8005 => Ok(ErrorCode::EmployeeNotPending),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AccountPending.code(), 1003);
        assert_eq!(ErrorCode::AdminRequired.code(), 2002);
        assert_eq!(ErrorCode::FileTooLarge.code(), 3001);
        assert_eq!(ErrorCode::LeaveAlreadyDecided.code(), 4002);
        assert_eq!(ErrorCode::AlreadyCheckedIn.code(), 5002);
        assert_eq!(ErrorCode::PayrollBatchInProgress.code(), 6001);
        assert_eq!(ErrorCode::WidgetNotAllowed.code(), 7001);
        assert_eq!(ErrorCode::EmployeeIdInvalid.code(), 8004);
        assert_eq!(ErrorCode::StorageError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::InternalError.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::LeaveNotFound));
        assert_eq!(ErrorCode::try_from(8003), Ok(ErrorCode::EmployeeCannotDeleteSelf));
        assert_eq!(ErrorCode::try_from(9403), Ok(ErrorCode::StorageCorrupted));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let codes = [
            ErrorCode::RequiredField,
            ErrorCode::RecoveryStepInvalid,
            ErrorCode::FieldNotEditable,
            ErrorCode::EmptyFile,
            ErrorCode::LeaveInvalidDecision,
            ErrorCode::NotCheckedIn,
            ErrorCode::WidgetNotFound,
            ErrorCode::EmployeeNotPending,
            ErrorCode::ConfigError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "3");

        let json = serde_json::to_string(&ErrorCode::LeaveNotFound).unwrap();
        assert_eq!(json, "4001");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(code, ErrorCode::InvalidCredentials);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::EmployeeNotFound), "8001");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::InvalidCredentials.message(),
            "Invalid identifier or passkey. Access denied."
        );
        assert_eq!(
            ErrorCode::AccountDisabled.message(),
            "Identity has been suspended. Contact IT."
        );
        assert_eq!(
            ErrorCode::EmployeeIdInvalid.message(),
            "Identity Protocol Violation: ID must follow the EMP-#### format."
        );
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
