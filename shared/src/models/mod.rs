//! Data models
//!
//! Persisted as JSON snapshots; field names follow the camelCase wire shape.

pub mod attendance;
pub mod dashboard;
pub mod employee;
pub mod leave;
pub mod notification;
pub mod payroll;
pub mod serde_helpers;

// Re-exports
pub use attendance::*;
pub use dashboard::*;
pub use employee::*;
pub use leave::*;
pub use notification::*;
pub use payroll::*;
