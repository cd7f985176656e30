use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::project::ProjectId;
use super::user::UserId;

pub type TaskId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Board column order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Backlog,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    pub fn as_keyword(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "BACKLOG",
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    pub fn from_keyword(s: &str) -> Option<TaskStatus> {
        match s {
            "BACKLOG" => Some(TaskStatus::Backlog),
            "TODO" => Some(TaskStatus::Todo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "DONE" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    High,
    /// Some backend responses abbreviate this to `MED`.
    #[serde(alias = "MED")]
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            TaskPriority::High => "HIGH",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::Low => "LOW",
        }
    }

    pub fn from_keyword(s: &str) -> Option<TaskPriority> {
        match s {
            "HIGH" => Some(TaskPriority::High),
            "MEDIUM" | "MED" => Some(TaskPriority::Medium),
            "LOW" => Some(TaskPriority::Low),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::High => "High",
            TaskPriority::Medium => "Medium",
            TaskPriority::Low => "Low",
        }
    }
}

/// A single work item as served by the task endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub progress: Option<u8>,
    pub project_id: Option<ProjectId>,
    pub project_name: Option<String>,
    pub assignee_id: Option<UserId>,
    pub assignee_name: Option<String>,
    pub assignee_initials: Option<String>,
    pub creator_id: Option<UserId>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            progress: None,
            project_id: None,
            project_name: None,
            assignee_id: None,
            assignee_name: None,
            assignee_initials: None,
            creator_id: None,
        }
    }

    /// Past its due date and not finished.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && self.status != TaskStatus::Done,
            None => false,
        }
    }

    pub fn set_progress(&mut self, value: i64) {
        self.progress = Some(clamp_progress(value));
    }
}

/// Completion percentages stay within 0..=100 no matter what the caller or server sent.
pub fn clamp_progress(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Server-side scopes for the task list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskScope {
    #[default]
    All,
    Mine,
    Team,
    Overdue,
}

impl TaskScope {
    pub fn as_query(&self) -> &'static str {
        match self {
            TaskScope::All => "all",
            TaskScope::Mine => "mine",
            TaskScope::Team => "team",
            TaskScope::Overdue => "overdue",
        }
    }
}

/// Query parameters for the task list endpoint. Filtering happens server side;
/// the client only regroups what comes back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilters {
    pub scope: TaskScope,
    pub project_id: Option<ProjectId>,
    pub priority: Option<TaskPriority>,
    pub search: Option<String>,
}

impl TaskFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("scope", self.scope.as_query().to_string())];
        if let Some(id) = self.project_id {
            params.push(("projectId", id.to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.as_keyword().to_string()));
        }
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_keywords_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_keyword(status.as_keyword()), Some(status));
        }
        assert_eq!(TaskStatus::from_keyword("SHIPPED"), None);
    }

    #[test]
    fn priority_accepts_abbreviated_medium() {
        assert_eq!(TaskPriority::from_keyword("MED"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::Medium.as_keyword(), "MEDIUM");
    }

    #[test]
    fn progress_clamps_both_ends() {
        assert_eq!(clamp_progress(-20), 0);
        assert_eq!(clamp_progress(0), 0);
        assert_eq!(clamp_progress(55), 55);
        assert_eq!(clamp_progress(100), 100);
        assert_eq!(clamp_progress(150), 100);
    }

    #[test]
    fn set_progress_clamps() {
        let mut task = Task::new(1, "Write report");
        task.set_progress(180);
        assert_eq!(task.progress, Some(100));
        task.set_progress(-5);
        assert_eq!(task.progress, Some(0));
    }

    #[test]
    fn overdue_requires_past_due_and_unfinished() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut task = Task::new(1, "Ship release");
        assert!(!task.is_overdue(today)); // no due date

        task.due_date = NaiveDate::from_ymd_opt(2025, 6, 10);
        assert!(task.is_overdue(today));

        task.status = TaskStatus::Done;
        assert!(!task.is_overdue(today));

        task.status = TaskStatus::InProgress;
        task.due_date = NaiveDate::from_ymd_opt(2025, 6, 15);
        assert!(!task.is_overdue(today)); // due today is not overdue
    }

    #[test]
    fn filters_serialize_only_set_fields() {
        let filters = TaskFilters::default();
        assert_eq!(filters.to_query(), vec![("scope", "all".to_string())]);

        let filters = TaskFilters {
            scope: TaskScope::Mine,
            project_id: Some(9),
            priority: Some(TaskPriority::High),
            search: Some("auth".to_string()),
        };
        let query = filters.to_query();
        assert_eq!(query[0], ("scope", "mine".to_string()));
        assert!(query.contains(&("projectId", "9".to_string())));
        assert!(query.contains(&("priority", "HIGH".to_string())));
        assert!(query.contains(&("search", "auth".to_string())));
    }
}
