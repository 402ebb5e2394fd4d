//! Notification Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel recipient addressing every administrator
pub const ADMIN_ALL: &str = "ADMIN_ALL";

/// Notification addressee, stored as a plain string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recipient {
    /// A single employee by `id`
    Employee(String),
    /// Every admin
    AdminAll,
}

impl Recipient {
    pub fn employee(id: impl Into<String>) -> Self {
        Self::Employee(id.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Employee(id) => id,
            Self::AdminAll => ADMIN_ALL,
        }
    }
}

impl From<String> for Recipient {
    fn from(value: String) -> Self {
        if value == ADMIN_ALL {
            Self::AdminAll
        } else {
            Self::Employee(value)
        }
    }
}

impl From<Recipient> for String {
    fn from(value: Recipient) -> Self {
        match value {
            Recipient::Employee(id) => id,
            Recipient::AdminAll => ADMIN_ALL.to_string(),
        }
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Security,
    Payroll,
    Leave,
    System,
}

impl NotificationType {
    pub const ALL: [NotificationType; 4] = [
        NotificationType::Security,
        NotificationType::Payroll,
        NotificationType::Leave,
        NotificationType::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Payroll => "payroll",
            Self::Leave => "leave",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub recipient_id: Recipient,
    pub subject: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Only ever moves false -> true
    pub read: bool,
}

impl Notification {
    /// Whether a viewer with this id and admin flag sees the notification
    pub fn is_visible_to(&self, viewer_id: &str, is_admin: bool) -> bool {
        match &self.recipient_id {
            Recipient::Employee(id) => id == viewer_id,
            Recipient::AdminAll => is_admin,
        }
    }
}

/// Notification content before the store assigns id, timestamp and read flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    pub recipient_id: Recipient,
    pub subject: String,
    pub body: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
}

impl NotificationDraft {
    pub fn new(
        recipient_id: Recipient,
        kind: NotificationType,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            subject: subject.into(),
            body: body.into(),
            kind,
        }
    }
}
