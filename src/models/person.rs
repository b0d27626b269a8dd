//! People and roles.
//!
//! A role carries an explicit [`RoleKind`] capability tag. Membership
//! rules (who counts as a plain developer) read the tag, never the
//! role's display name.

use serde::{Deserialize, Serialize};

/// Identifier of the built-in PM role.
pub const PM_ROLE_ID: &str = "PM";
/// Identifier of the built-in developer role.
pub const DEV_ROLE_ID: &str = "Dev";

/// Capability of a role.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoleKind {
    /// Product manager.
    Pm,
    /// Designer.
    Designer,
    /// Plain developer (eligible for tracks and dev plans).
    #[default]
    Dev,
}

/// A team role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    /// Unique role identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Capability tag.
    pub kind: RoleKind,
}

impl Role {
    /// Creates a role.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: RoleKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// The built-in PM role.
    pub fn pm() -> Self {
        Self::new(PM_ROLE_ID, "PM", RoleKind::Pm)
    }

    /// The built-in developer role.
    pub fn dev() -> Self {
        Self::new(DEV_ROLE_ID, "Dev", RoleKind::Dev)
    }
}

/// A team member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    /// Unique person identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Role reference. `None` = plain developer.
    #[serde(default)]
    pub role_id: Option<String>,
    /// Inactive people are never auto-assigned.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Person {
    /// Creates an active person without a role.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role_id: None,
            active: true,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the role reference.
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    /// Marks the person inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}
