//! Roles and dashboard view access

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UserStoreError;

/// Role a user signs in with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

/// Top-level views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardView {
    AuditLog,
    Analytics,
    Schedule,
    Notifications,
    Profile,
}

impl DashboardView {
    /// Every view, in navigation order
    pub const ALL: [DashboardView; 5] = [
        DashboardView::AuditLog,
        DashboardView::Analytics,
        DashboardView::Schedule,
        DashboardView::Notifications,
        DashboardView::Profile,
    ];

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            DashboardView::AuditLog => "Audit Log",
            DashboardView::Analytics => "Analytics",
            DashboardView::Schedule => "Schedule",
            DashboardView::Notifications => "Notifications",
            DashboardView::Profile => "Profile",
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Role {
    /// Every role, most privileged first
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];

    /// Whether this role may open `view`
    pub fn can_access(&self, view: DashboardView) -> bool {
        match view {
            DashboardView::AuditLog => matches!(self, Role::Admin),
            DashboardView::Analytics => matches!(self, Role::Admin | Role::Manager),
            DashboardView::Schedule | DashboardView::Notifications | DashboardView::Profile => {
                true
            }
        }
    }

    /// Views this role may open, in navigation order
    pub fn views(&self) -> Vec<DashboardView> {
        DashboardView::ALL
            .into_iter()
            .filter(|view| self.can_access(*view))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            _ => Err(UserStoreError::UnknownRole(s.to_string())),
        }
    }
}
