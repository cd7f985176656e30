use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::permissions::{can_reassign, can_update_status_or_progress};
use crate::api::auth::{LoginPayload, RegisterPayload};
use crate::api::calendar::CreateEventPayload;
use crate::api::projects::CreateProjectPayload;
use crate::api::tasks::{CreateTaskPayload, UpdateTaskPayload};
use crate::core::event::EventColor;
use crate::core::project::{ProjectId, ProjectStatus};
use crate::core::task::{Task, TaskPriority, TaskStatus, clamp_progress};
use crate::core::user::{SessionUser, UserId};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

fn summarize(errors: &BTreeMap<&'static str, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Field-keyed validation failures raised before any request is made,
/// shaped like the server's `errors` map so forms render both the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.errors))]
pub struct DraftError {
    errors: BTreeMap<&'static str, String>,
}

impl DraftError {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    fn into_result<T>(self, value: T) -> Result<T, DraftError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Buffer behind the create-task modal.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<UserId>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::Medium,
            due_date: None,
            project_id: None,
            assignee_id: None,
        }
    }
}

impl TaskDraft {
    /// Changing the project invalidates the assignee choice, which belonged
    /// to the previous project's member list.
    pub fn set_project(&mut self, project_id: Option<ProjectId>) {
        if self.project_id != project_id {
            self.project_id = project_id;
            self.assignee_id = None;
        }
    }

    pub fn validate(&self) -> Result<CreateTaskPayload, DraftError> {
        let mut errors = DraftError::default();
        let title = trimmed(&self.title);
        if title.is_none() {
            errors.push("title", "Task title is required.");
        }
        if self.project_id.is_none() {
            errors.push("projectId", "Select a project first.");
        }
        errors.into_result(CreateTaskPayload {
            title: title.unwrap_or_default(),
            description: trimmed(&self.description),
            priority: self.priority,
            due_date: self.due_date,
            assignee_id: self.assignee_id,
            project_id: self.project_id,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Buffer behind the update-task modal. Only holds the fields that form
/// edits; `payload` keeps just the ones the signed-in user may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditDraft {
    pub status: Option<TaskStatus>,
    pub progress: Option<i64>,
    pub assigned_to_id: Option<UserId>,
}

impl TaskEditDraft {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.progress.is_none() && self.assigned_to_id.is_none()
    }

    /// The permitted change set, or a local error when nothing the user may
    /// change was filled in. No request should be made on the error path.
    pub fn payload(
        &self,
        user: Option<&SessionUser>,
        task: &Task,
    ) -> Result<UpdateTaskPayload, DraftError> {
        let mut errors = DraftError::default();
        if user.is_none() {
            errors.push("form", "Sign in to update tasks.");
            return errors.into_result(UpdateTaskPayload::default());
        }

        let mut payload = UpdateTaskPayload::default();
        if can_update_status_or_progress(user, task) {
            payload.status = self.status;
            payload.progress = self.progress.map(clamp_progress);
        }
        if can_reassign(user, task) {
            payload.assignee_id = self.assigned_to_id;
        }

        if payload.is_empty() {
            errors.push("form", "Nothing you are allowed to change was edited.");
        }
        errors.into_result(payload)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Buffer behind the create-project modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub due_date: Option<NaiveDate>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            status: ProjectStatus::Active,
            due_date: None,
        }
    }
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<CreateProjectPayload, DraftError> {
        let mut errors = DraftError::default();
        let name = trimmed(&self.name);
        if name.is_none() {
            errors.push("name", "Project name is required.");
        }
        errors.into_result(CreateProjectPayload {
            name: name.unwrap_or_default(),
            description: trimmed(&self.description),
            status: Some(self.status),
            due_date: self.due_date,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Buffer behind the new-event modal. The date starts on today.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: EventColor,
    pub description: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: chrono::Local::now().date_naive(),
            start_time: None,
            end_time: None,
            color: EventColor::Teal,
            description: String::new(),
        }
    }
}

impl EventDraft {
    pub fn validate(&self) -> Result<CreateEventPayload, DraftError> {
        let mut errors = DraftError::default();
        let title = trimmed(&self.title);
        if title.is_none() {
            errors.push("title", "Event title is required.");
        }
        errors.into_result(CreateEventPayload {
            title: title.unwrap_or_default(),
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            color: Some(self.color),
            description: trimmed(&self.description),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    pub fn validate(&self) -> Result<LoginPayload, DraftError> {
        let mut errors = DraftError::default();
        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required.");
        } else if !EMAIL_RE.is_match(email) {
            errors.push("email", "Enter a valid email address.");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required.");
        }
        errors.into_result(LoginPayload {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegisterDraft {
    pub fn validate(&self) -> Result<RegisterPayload, DraftError> {
        let mut errors = DraftError::default();
        let first_name = trimmed(&self.first_name);
        if first_name.is_none() {
            errors.push("first_name", "First name is required.");
        }
        let last_name = trimmed(&self.last_name);
        if last_name.is_none() {
            errors.push("last_name", "Last name is required.");
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required.");
        } else if !EMAIL_RE.is_match(email) {
            errors.push("email", "Enter a valid email address.");
        }
        if self.password.len() < 8 {
            errors.push("password", "Password must be at least 8 characters.");
        }
        errors.into_result(RegisterPayload {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
