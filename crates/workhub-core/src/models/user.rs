use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Capability tier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Editor,
    #[default]
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    /// Admins and editors may upload and delete files.
    pub fn can_edit(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(ValidationError::new(
                "role",
                format!("unknown role '{}', expected admin, editor or viewer", other),
            )),
        }
    }
}

/// A user of the hub and the workspaces they may open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Access list, ordered and free of duplicates.
    #[serde(default)]
    pub workspaces: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            role,
            workspaces: Vec::new(),
        }
    }

    pub fn with_workspaces<I, S>(mut self, workspaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for workspace in workspaces {
            self.grant(&workspace.into());
        }
        self
    }

    pub fn has_access(&self, workspace_id: &str) -> bool {
        self.workspaces.iter().any(|w| w == workspace_id)
    }

    /// Add a workspace to the access list. Returns false if already granted.
    pub fn grant(&mut self, workspace_id: &str) -> bool {
        if self.has_access(workspace_id) {
            return false;
        }
        self.workspaces.push(workspace_id.to_string());
        true
    }

    /// Remove a workspace from the access list. Returns false if it was absent.
    pub fn revoke(&mut self, workspace_id: &str) -> bool {
        let before = self.workspaces.len();
        self.workspaces.retain(|w| w != workspace_id);
        self.workspaces.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Admin.can_edit());
        assert!(Role::Editor.can_edit());
        assert!(!Role::Viewer.can_edit());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Editor.is_admin());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Editor".parse::<Role>().unwrap(), Role::Editor);
        assert_eq!(" viewer ".parse::<Role>().unwrap(), Role::Viewer);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_grant_and_revoke_keep_list_unique() {
        let mut user = User::new("3", "qa-manager", Role::Editor).with_workspaces(["qa", "docs"]);

        assert!(!user.grant("qa"));
        assert!(user.grant("review"));
        assert_eq!(user.workspaces, vec!["qa", "docs", "review"]);

        assert!(user.revoke("qa"));
        assert!(!user.revoke("qa"));
        assert!(!user.has_access("qa"));
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::new("7", "viewer", Role::Viewer).with_workspaces(["dev"]);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "viewer");
        assert_eq!(json["workspaces"][0], "dev");
    }
}
