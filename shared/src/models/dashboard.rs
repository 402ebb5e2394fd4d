//! Dashboard Configuration Model

use serde::{Deserialize, Serialize};

use super::employee::UserRole;

/// Dashboard widget identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardWidget {
    Streak,
    Leaves,
    Balance,
    Team,
    Hours,
    Summary,
    Activity,
    Provisions,
    Approvals,
    Alerts,
}

impl DashboardWidget {
    /// Every widget in catalog order
    pub const ALL: [DashboardWidget; 10] = [
        DashboardWidget::Streak,
        DashboardWidget::Leaves,
        DashboardWidget::Balance,
        DashboardWidget::Team,
        DashboardWidget::Hours,
        DashboardWidget::Summary,
        DashboardWidget::Activity,
        DashboardWidget::Provisions,
        DashboardWidget::Approvals,
        DashboardWidget::Alerts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Streak => "streak",
            Self::Leaves => "leaves",
            Self::Balance => "balance",
            Self::Team => "team",
            Self::Hours => "hours",
            Self::Summary => "summary",
            Self::Activity => "activity",
            Self::Provisions => "provisions",
            Self::Approvals => "approvals",
            Self::Alerts => "alerts",
        }
    }

    /// Catalog display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Streak => "Engagement Analytics",
            Self::Leaves => "Protocol Queue",
            Self::Balance => "Balance Ledger",
            Self::Team => "System Assets",
            Self::Hours => "Time Cycle Matrix",
            Self::Summary => "Leave Architecture",
            Self::Activity => "Real-time Telemetry",
            Self::Provisions => "Recent User Provisions",
            Self::Approvals => "Pending Approvals",
            Self::Alerts => "System Alerts Summary",
        }
    }

    /// Widgets only offered on the ADMIN dashboard
    pub fn is_admin_only(&self) -> bool {
        matches!(self, Self::Provisions | Self::Approvals | Self::Alerts)
    }

    /// Widgets that can be configured for a role
    pub fn available_for(role: UserRole) -> Vec<DashboardWidget> {
        Self::ALL
            .into_iter()
            .filter(|w| role == UserRole::Admin || !w.is_admin_only())
            .collect()
    }
}

impl std::fmt::Display for DashboardWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DashboardWidget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == needle)
            .ok_or_else(|| format!("unknown widget: {}", s))
    }
}

/// Ordered widget list for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub role: UserRole,
    pub visible_widgets: Vec<DashboardWidget>,
}

impl DashboardConfig {
    pub fn shows(&self, widget: DashboardWidget) -> bool {
        self.visible_widgets.contains(&widget)
    }

    /// Factory defaults: admins see everything, employees the personal set
    pub fn defaults() -> Vec<DashboardConfig> {
        vec![
            DashboardConfig {
                role: UserRole::Admin,
                visible_widgets: DashboardWidget::ALL.to_vec(),
            },
            DashboardConfig {
                role: UserRole::Employee,
                visible_widgets: vec![
                    DashboardWidget::Streak,
                    DashboardWidget::Leaves,
                    DashboardWidget::Balance,
                    DashboardWidget::Hours,
                    DashboardWidget::Summary,
                    DashboardWidget::Activity,
                ],
            },
        ]
    }
}
