//! Shared types for Dayflow
//!
//! Domain models, the unified error system and small utilities used by
//! `dayflow-core` and its CLI.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
