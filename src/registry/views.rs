//! Data handed to the presentation layer
//!
//! Everything here is derived from a registry; titles and icons are opaque
//! strings passed through unchanged.

use serde::Serialize;

/// Navigation options supplied at registration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub title: Option<String>,
    pub icon: Option<String>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// One menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A module reachable from another module's detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewLink {
    pub module: String,
    pub path: String,
}

/// A many-to-one child listed on its parent's detail page
///
/// Child rows hold the parent row's id under `parent_key`, which is the
/// field to pass to [`RecordService::list_children`](crate::core::service::RecordService::list_children).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildLink {
    pub module: String,
    pub path: String,
    pub parent_key: String,
}

/// A many-to-many peer and the junction module that pairs them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerLink {
    pub module: String,
    pub path: String,
    pub junction: String,
}

/// Relationship-driven views around one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NestedViews {
    /// Parent whose detail page nests this module
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ViewLink>,
    /// Many-to-one children shown on this module's detail page
    pub children: Vec<ChildLink>,
    /// Many-to-many peers managed through a junction
    pub peers: Vec<PeerLink>,
}
