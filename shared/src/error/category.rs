//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Profile errors
/// - 4xxx: Leave errors
/// - 5xxx: Attendance errors
/// - 6xxx: Payroll errors
/// - 7xxx: Dashboard errors
/// - 8xxx: Employee errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Profile errors (3xxx)
    Profile,
    /// Leave errors (4xxx)
    Leave,
    /// Attendance errors (5xxx)
    Attendance,
    /// Payroll errors (6xxx)
    Payroll,
    /// Dashboard errors (7xxx)
    Dashboard,
    /// Employee errors (8xxx)
    Employee,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Profile,
            4000..5000 => Self::Leave,
            5000..6000 => Self::Attendance,
            6000..7000 => Self::Payroll,
            7000..8000 => Self::Dashboard,
            8000..9000 => Self::Employee,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Profile => "profile",
            Self::Leave => "leave",
            Self::Attendance => "attendance",
            Self::Payroll => "payroll",
            Self::Dashboard => "dashboard",
            Self::Employee => "employee",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Profile);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Leave);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Attendance);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Payroll);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Dashboard);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Employee);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::AccountPending.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::AdminRequired.category(),
            ErrorCategory::Permission
        );
        assert_eq!(ErrorCode::FileTooLarge.category(), ErrorCategory::Profile);
        assert_eq!(ErrorCode::LeaveNotFound.category(), ErrorCategory::Leave);
        assert_eq!(
            ErrorCode::AlreadyCheckedIn.category(),
            ErrorCategory::Attendance
        );
        assert_eq!(
            ErrorCode::PayrollBatchInProgress.category(),
            ErrorCategory::Payroll
        );
        assert_eq!(
            ErrorCode::WidgetNotAllowed.category(),
            ErrorCategory::Dashboard
        );
        assert_eq!(
            ErrorCode::EmployeeNotFound.category(),
            ErrorCategory::Employee
        );
        assert_eq!(ErrorCode::StorageError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Attendance).unwrap();
        assert_eq!(json, "\"attendance\"");

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }
}
