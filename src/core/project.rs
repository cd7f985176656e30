use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::invitation::InvitationStatus;
use super::user::UserId;

pub type ProjectId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Active,
    InReview,
    Planning,
    Paused,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::InReview => "IN_REVIEW",
            ProjectStatus::Planning => "PLANNING",
            ProjectStatus::Paused => "PAUSED",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Archived => "ARCHIVED",
        }
    }

    pub fn from_keyword(s: &str) -> Option<ProjectStatus> {
        match s {
            "ACTIVE" => Some(ProjectStatus::Active),
            "IN_REVIEW" => Some(ProjectStatus::InReview),
            "PLANNING" => Some(ProjectStatus::Planning),
            "PAUSED" => Some(ProjectStatus::Paused),
            "COMPLETED" => Some(ProjectStatus::Completed),
            "ARCHIVED" => Some(ProjectStatus::Archived),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::InReview => "In Review",
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Archived => "Archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub progress: Option<u8>,
    pub due_date: Option<NaiveDate>,
    /// Avatar initials for the member strip.
    pub team: Vec<String>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            status: ProjectStatus::Active,
            progress: None,
            due_date: None,
            team: Vec::new(),
        }
    }
}

/// A person attached to a project, as served by the members endpoint.
/// `id` is the membership row; `user_id` is the actual account when the
/// backend distinguishes the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub id: i64,
    pub user_id: Option<UserId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<InvitationStatus>,
}

impl ProjectMember {
    /// Missing status means the membership predates the invitation flow.
    pub fn is_accepted(&self) -> bool {
        match self.status {
            None => true,
            Some(status) => status == InvitationStatus::Accepted,
        }
    }

    pub fn account_id(&self) -> UserId {
        self.user_id.unwrap_or(self.id)
    }
}

/// One entry in the assignee dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssigneeOption {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl AssigneeOption {
    pub fn from_member(member: &ProjectMember) -> Self {
        let id = member.account_id();
        let name = member
            .name
            .clone()
            .or_else(|| member.email.clone())
            .unwrap_or_else(|| format!("User {}", id));
        Self {
            id,
            name,
            email: member.email.clone(),
            role: member.role.clone(),
        }
    }
}

/// Accepted members double as assignee options when the dedicated
/// assignees endpoint is unavailable.
pub fn accepted_assignees(members: &[ProjectMember]) -> Vec<AssigneeOption> {
    members
        .iter()
        .filter(|m| m.is_accepted())
        .map(AssigneeOption::from_member)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_member(id: i64) -> ProjectMember {
        ProjectMember {
            id,
            user_id: None,
            name: None,
            email: None,
            role: None,
            status: None,
        }
    }

    #[test]
    fn status_keywords_round_trip() {
        for status in [
            ProjectStatus::Active,
            ProjectStatus::InReview,
            ProjectStatus::Planning,
            ProjectStatus::Paused,
            ProjectStatus::Completed,
            ProjectStatus::Archived,
        ] {
            assert_eq!(
                ProjectStatus::from_keyword(status.as_keyword()),
                Some(status)
            );
        }
        assert_eq!(ProjectStatus::from_keyword("CLOSED"), None);
    }

    #[test]
    fn member_without_status_counts_as_accepted() {
        let mut member = make_member(4);
        assert!(member.is_accepted());

        member.status = Some(InvitationStatus::Pending);
        assert!(!member.is_accepted());

        member.status = Some(InvitationStatus::Accepted);
        assert!(member.is_accepted());
    }

    #[test]
    fn assignee_option_prefers_account_id_and_name() {
        let mut member = make_member(10);
        member.user_id = Some(77);
        member.name = Some("Dana Fox".to_string());
        member.email = Some("dana@example.com".to_string());

        let option = AssigneeOption::from_member(&member);
        assert_eq!(option.id, 77);
        assert_eq!(option.name, "Dana Fox");
    }

    #[test]
    fn assignee_option_falls_back_to_email_then_placeholder() {
        let mut member = make_member(10);
        member.email = Some("kai@example.com".to_string());
        assert_eq!(AssigneeOption::from_member(&member).name, "kai@example.com");

        let bare = make_member(12);
        assert_eq!(AssigneeOption::from_member(&bare).name, "User 12");
    }

    #[test]
    fn accepted_assignees_filter_pending_members() {
        let mut pending = make_member(1);
        pending.status = Some(InvitationStatus::Pending);
        let mut accepted = make_member(2);
        accepted.status = Some(InvitationStatus::Accepted);
        let legacy = make_member(3);

        let options = accepted_assignees(&[pending, accepted, legacy]);
        let ids: Vec<i64> = options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
