use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::project::ProjectId;
use super::user::UserId;

pub type InvitationId = i64;

/// Lifecycle of a project invitation. Only the invited user moves it to
/// Accepted/Rejected; the inviter's cancel path moves it to Removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    #[serde(alias = "CANCELLED")]
    Removed,
}

impl InvitationStatus {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "PENDING",
            InvitationStatus::Accepted => "ACCEPTED",
            InvitationStatus::Rejected => "REJECTED",
            InvitationStatus::Removed => "REMOVED",
        }
    }

    pub fn from_keyword(s: &str) -> Option<InvitationStatus> {
        match s {
            "PENDING" => Some(InvitationStatus::Pending),
            "ACCEPTED" => Some(InvitationStatus::Accepted),
            "REJECTED" => Some(InvitationStatus::Rejected),
            "REMOVED" | "CANCELLED" => Some(InvitationStatus::Removed),
            _ => None,
        }
    }
}

/// Answer the invited user sends back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespondAction {
    Accept,
    Reject,
}

impl RespondAction {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            RespondAction::Accept => "ACCEPT",
            RespondAction::Reject => "REJECT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub inviter_id: Option<UserId>,
    pub inviter_name: Option<String>,
    pub invited_user_id: Option<UserId>,
    pub invited_user_name: Option<String>,
    pub invited_user_email: Option<String>,
    pub role: Option<String>,
    pub status: InvitationStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Invitation {
    pub fn new(id: InvitationId, project_id: ProjectId, project_name: impl Into<String>) -> Self {
        Self {
            id,
            project_id,
            project_name: project_name.into(),
            inviter_id: None,
            inviter_name: None,
            invited_user_id: None,
            invited_user_name: None,
            invited_user_email: None,
            role: None,
            status: InvitationStatus::Pending,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}

/// Query parameters for the received/sent invitation lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvitationFilters {
    pub status: Option<InvitationStatus>,
    pub project_id: Option<ProjectId>,
}

impl InvitationFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_keyword().to_string()));
        }
        if let Some(id) = self.project_id {
            params.push(("projectId", id.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_keywords_round_trip() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Rejected,
            InvitationStatus::Removed,
        ] {
            assert_eq!(
                InvitationStatus::from_keyword(status.as_keyword()),
                Some(status)
            );
        }
    }

    #[test]
    fn cancelled_is_an_alias_for_removed() {
        assert_eq!(
            InvitationStatus::from_keyword("CANCELLED"),
            Some(InvitationStatus::Removed)
        );
    }

    #[test]
    fn filters_serialize_only_set_fields() {
        assert!(InvitationFilters::default().to_query().is_empty());

        let filters = InvitationFilters {
            status: Some(InvitationStatus::Pending),
            project_id: Some(3),
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("status", "PENDING".to_string()),
                ("projectId", "3".to_string()),
            ]
        );
    }
}
