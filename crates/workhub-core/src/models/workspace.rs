use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::validation::require_non_blank;
use super::{Role, ValidationError};

/// Icon shown on a workspace card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkspaceIcon {
    Code,
    Bug,
    Eye,
    Settings,
    Database,
    #[default]
    FileText,
    Clipboard,
}

impl WorkspaceIcon {
    pub const ALL: [WorkspaceIcon; 7] = [
        WorkspaceIcon::Code,
        WorkspaceIcon::Bug,
        WorkspaceIcon::Eye,
        WorkspaceIcon::Settings,
        WorkspaceIcon::Database,
        WorkspaceIcon::FileText,
        WorkspaceIcon::Clipboard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorkspaceIcon::Code => "Code",
            WorkspaceIcon::Bug => "Bug",
            WorkspaceIcon::Eye => "Eye",
            WorkspaceIcon::Settings => "Settings",
            WorkspaceIcon::Database => "Database",
            WorkspaceIcon::FileText => "FileText",
            WorkspaceIcon::Clipboard => "Clipboard",
        }
    }

    /// Label shown next to the icon in the picker.
    pub fn label(self) -> &'static str {
        match self {
            WorkspaceIcon::Code => "Development",
            WorkspaceIcon::Bug => "Testing",
            WorkspaceIcon::Eye => "Review",
            WorkspaceIcon::Settings => "Administration",
            WorkspaceIcon::Database => "Data",
            WorkspaceIcon::FileText => "Documentation",
            WorkspaceIcon::Clipboard => "Planning",
        }
    }
}

impl fmt::Display for WorkspaceIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkspaceIcon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        WorkspaceIcon::ALL
            .into_iter()
            .find(|icon| icon.name().to_lowercase() == needle)
            .ok_or_else(|| ValidationError::new("icon", format!("unknown icon '{}'", s.trim())))
    }
}

/// Color palette for workspace cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceColor {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Indigo,
    Orange,
    Teal,
    Pink,
}

impl WorkspaceColor {
    pub const ALL: [WorkspaceColor; 8] = [
        WorkspaceColor::Blue,
        WorkspaceColor::Green,
        WorkspaceColor::Purple,
        WorkspaceColor::Red,
        WorkspaceColor::Indigo,
        WorkspaceColor::Orange,
        WorkspaceColor::Teal,
        WorkspaceColor::Pink,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorkspaceColor::Blue => "blue",
            WorkspaceColor::Green => "green",
            WorkspaceColor::Purple => "purple",
            WorkspaceColor::Red => "red",
            WorkspaceColor::Indigo => "indigo",
            WorkspaceColor::Orange => "orange",
            WorkspaceColor::Teal => "teal",
            WorkspaceColor::Pink => "pink",
        }
    }

    pub fn token(self) -> String {
        format!("bg-{}-500", self.name())
    }

    pub fn light_token(self) -> String {
        format!("bg-{name}-50 border-{name}-200", name = self.name())
    }
}

impl fmt::Display for WorkspaceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkspaceColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        WorkspaceColor::ALL
            .into_iter()
            .find(|color| color.name() == needle || color.token() == needle)
            .ok_or_else(|| ValidationError::new("color", format!("unknown color '{}'", s.trim())))
    }
}

/// Display metadata of a workspace, keyed by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: WorkspaceIcon,
    pub color: String,
    pub light_color: String,
}

impl WorkspaceConfig {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: WorkspaceIcon,
        color: WorkspaceColor,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon,
            color: color.token(),
            light_color: color.light_token(),
        }
    }

    /// Case-insensitive substring match against id, title or description.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.id.contains(&term)
            || self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Lowercase the id and collapse whitespace runs into `-`.
pub fn normalize_workspace_id(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Input of the "add workspace" action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWorkspace {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: WorkspaceIcon,
    #[serde(default)]
    pub color: WorkspaceColor,
    #[serde(default)]
    pub granted_user_ids: Vec<String>,
}

impl NewWorkspace {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        require_non_blank(&mut errors, "id", &self.id);
        require_non_blank(&mut errors, "title", &self.title);
        require_non_blank(&mut errors, "description", &self.description);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn into_config(self) -> WorkspaceConfig {
        WorkspaceConfig::new(
            normalize_workspace_id(&self.id),
            self.title.trim(),
            self.description.trim(),
            self.icon,
            self.color,
        )
    }
}

/// Partial update of the "edit workspace" action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// When present, becomes the exact set of users holding the workspace.
    #[serde(default)]
    pub granted_user_ids: Option<Vec<String>>,
    /// User id -> new role.
    #[serde(default)]
    pub role_changes: BTreeMap<String, Role>,
}

impl WorkspaceUpdate {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require_non_blank(&mut errors, "title", title);
        }
        if let Some(description) = &self.description {
            require_non_blank(&mut errors, "description", description);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.granted_user_ids.is_none()
            && self.role_changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_workspace_id() {
        assert_eq!(normalize_workspace_id("Frontend Dev"), "frontend-dev");
        assert_eq!(normalize_workspace_id("  QA   Team \t2 "), "qa-team-2");
        assert_eq!(normalize_workspace_id("docs"), "docs");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let qa = WorkspaceConfig::new(
            "qa",
            "Quality Assurance",
            "Test cases, bug reports, and quality documentation",
            WorkspaceIcon::Bug,
            WorkspaceColor::Green,
        );
        assert!(qa.matches_search("qua"));
        assert!(qa.matches_search("QA"));
        assert!(qa.matches_search("BUG REPORTS"));
        assert!(qa.matches_search(""));
        assert!(!qa.matches_search("timeline"));
    }

    #[test]
    fn test_color_tokens() {
        assert_eq!(WorkspaceColor::Teal.token(), "bg-teal-500");
        assert_eq!(WorkspaceColor::Teal.light_token(), "bg-teal-50 border-teal-200");
        assert_eq!("bg-pink-500".parse::<WorkspaceColor>().unwrap(), WorkspaceColor::Pink);
        assert_eq!("filetext".parse::<WorkspaceIcon>().unwrap(), WorkspaceIcon::FileText);
    }

    #[test]
    fn test_new_workspace_requires_fields() {
        let errors = NewWorkspace {
            id: "frontend".to_string(),
            title: " ".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "description"]);
    }

    #[test]
    fn test_new_workspace_defaults() {
        let config = NewWorkspace {
            id: "Frontend Dev".to_string(),
            title: "Frontend Development".to_string(),
            description: "UI work".to_string(),
            ..Default::default()
        }
        .into_config();

        assert_eq!(config.id, "frontend-dev");
        assert_eq!(config.icon, WorkspaceIcon::FileText);
        assert_eq!(config.color, "bg-blue-500");
        assert_eq!(config.light_color, "bg-blue-50 border-blue-200");
    }
}
