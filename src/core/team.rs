use serde::{Deserialize, Serialize};

use super::user::{UserId, initials_of};

/// Presence dot shown next to a member's avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Presence {
    Online,
    Away,
    #[default]
    #[serde(other)]
    Offline,
}

impl Presence {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Presence::Online => "ONLINE",
            Presence::Away => "AWAY",
            Presence::Offline => "OFFLINE",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Presence> {
        match s {
            "ONLINE" => Some(Presence::Online),
            "AWAY" => Some(Presence::Away),
            "OFFLINE" => Some(Presence::Offline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: UserId,
    pub name: String,
    pub role: Option<String>,
    pub presence: Presence,
    pub task_count: u32,
    pub project_count: u32,
    /// Percentage of assigned tasks completed, 0..=100.
    pub completion_rate: u8,
    pub initials: Option<String>,
    pub avatar_url: Option<String>,
}

impl TeamMember {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: None,
            presence: Presence::Offline,
            task_count: 0,
            project_count: 0,
            completion_rate: 0,
            initials: None,
            avatar_url: None,
        }
    }

    /// Server-provided initials win; otherwise derive them from the name.
    pub fn display_initials(&self) -> String {
        match self.initials.as_deref() {
            Some(initials) if !initials.trim().is_empty() => initials.to_string(),
            _ => initials_of(&self.name),
        }
    }
}
