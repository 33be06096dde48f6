// File: ./src/routes.rs
// Path-to-view dispatch. Navigation elsewhere always goes through
// `View::resolve` so the mapping stays in one place.
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// The top-level screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Register,
    Dashboard,
    Profile,
}

impl View {
    /// Selects the view for a path string.
    ///
    /// Exact match against a fixed table; anything else (unknown paths,
    /// empty strings, case variants, trailing slashes) falls back to Home.
    /// Total over all inputs — an unmatched path is not an error.
    pub fn resolve(path: &str) -> View {
        match path {
            "/" | "/home" => View::Home,
            "/auth/login" => View::Login,
            "/auth/register" => View::Register,
            "/dashboard" => View::Dashboard,
            "/dashboard/profile" => View::Profile,
            _ => View::Home,
        }
    }

    /// The canonical path for this view.
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/auth/login",
            View::Register => "/auth/register",
            View::Dashboard => "/dashboard",
            View::Profile => "/dashboard/profile",
        }
    }

    /// Views that require a stored session.
    pub fn requires_auth(&self) -> bool {
        matches!(self, View::Dashboard | View::Profile)
    }
}

/// The dashboard's sub-view toggle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    List,
    #[default]
    Kanban,
    Analytics,
    Sessions,
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardView::List => write!(f, "List"),
            DashboardView::Kanban => write!(f, "Kanban"),
            DashboardView::Analytics => write!(f, "Analytics"),
            DashboardView::Sessions => write!(f, "Sessions"),
        }
    }
}
