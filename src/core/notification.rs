use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type NotificationId = i64;

/// Categories the bell menu distinguishes. Kinds this build does not know
/// fold to General instead of failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    ProjectInviteSent,
    ProjectInviteAccepted,
    ProjectInviteRejected,
    TaskAssigned,
    TaskUpdated,
    #[default]
    #[serde(other)]
    General,
}

impl NotificationKind {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            NotificationKind::ProjectInviteSent => "PROJECT_INVITE_SENT",
            NotificationKind::ProjectInviteAccepted => "PROJECT_INVITE_ACCEPTED",
            NotificationKind::ProjectInviteRejected => "PROJECT_INVITE_REJECTED",
            NotificationKind::TaskAssigned => "TASK_ASSIGNED",
            NotificationKind::TaskUpdated => "TASK_UPDATED",
            NotificationKind::General => "GENERAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub actor_name: Option<String>,
}

impl Notification {
    pub fn new(id: NotificationId, message: impl Into<String>) -> Self {
        Self {
            id,
            kind: NotificationKind::General,
            title: None,
            message: message.into(),
            read: false,
            created_at: None,
            actor_name: None,
        }
    }
}

/// Unread badge count for the bell icon.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
