use serde::{Deserialize, Serialize};

/// Profile fields editable from the settings screen. These serialize in the
/// exact casing the settings endpoints exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub role_title: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub task_assignments: bool,
    pub deadline_reminders: bool,
    pub team_activity: bool,
    pub weekly_digest_email: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            task_assignments: true,
            deadline_reminders: true,
            team_activity: false,
            weekly_digest_email: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    pub two_factor_auth: bool,
    pub login_alerts: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_auth: false,
            login_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceSettings {
    pub compact_sidebar: bool,
    pub reduce_motion: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationSettings {
    pub github_connected: bool,
    pub slack_connected: bool,
    pub jira_connected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceSettings {
    pub workspace_name: String,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            workspace_name: "My Workspace".to_string(),
        }
    }
}

/// All settings sections as returned by the settings endpoint. Sections the
/// server omits keep their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub notifications: NotificationPreferences,
    pub security: SecuritySettings,
    pub appearance: AppearanceSettings,
    pub integrations: IntegrationSettings,
    pub workspace: WorkspaceSettings,
}
