use chrono::NaiveDate;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::core::project::{AssigneeOption, ProjectId, ProjectMember, accepted_assignees};
use crate::core::task::{Task, TaskFilters, TaskId, TaskPriority, TaskStatus};
use crate::core::user::UserId;
use crate::wire::decode::{RawAssignee, RawDeleted, RawMember, RawTask};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl UpdateTaskPayload {
    /// Nothing to send; the caller should skip the request.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.assignee_id.is_none()
            && self.project_id.is_none()
            && self.progress.is_none()
    }
}

#[derive(Serialize)]
struct StatusPayload {
    status: TaskStatus,
}

#[derive(Clone)]
pub struct TasksApi {
    client: ApiClient,
}

impl TasksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET /tasks with the scope/project/priority/search query.
    pub async fn list(&self, filters: &TaskFilters) -> Result<Vec<Task>, ApiError> {
        let raw: Vec<RawTask> = self.client.get("/tasks", &filters.to_query()).await?;
        Ok(raw.into_iter().map(Task::from).collect())
    }

    pub async fn create(&self, payload: &CreateTaskPayload) -> Result<Task, ApiError> {
        let raw: RawTask = self.client.post("/tasks", payload).await?;
        Ok(raw.into())
    }

    pub async fn update(&self, id: TaskId, payload: &UpdateTaskPayload) -> Result<Task, ApiError> {
        let raw: RawTask = self
            .client
            .patch(&format!("/tasks/{}", id), payload)
            .await?;
        Ok(raw.into())
    }

    /// Status-only updates go through their dedicated route.
    pub async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<Task, ApiError> {
        let raw: RawTask = self
            .client
            .patch(
                &format!("/tasks/{}/update-status", id),
                &StatusPayload { status },
            )
            .await?;
        Ok(raw.into())
    }

    pub async fn remove(&self, id: TaskId) -> Result<TaskId, ApiError> {
        let ack: RawDeleted = self.client.delete(&format!("/tasks/{}", id)).await?;
        Ok(ack.id)
    }

    /// GET /projects/:id/assignees. Deployments without that route serve the
    /// same people via the members list, filtered to accepted ones.
    pub async fn project_assignees(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<AssigneeOption>, ApiError> {
        let path = format!("/projects/{}/assignees", project_id);
        match self.client.get::<Vec<RawAssignee>>(&path, &[]).await {
            Ok(raw) => Ok(raw.into_iter().map(AssigneeOption::from).collect()),
            Err(primary) => {
                log::debug!(
                    "Assignees route failed for project {} ({}); trying members",
                    project_id,
                    primary
                );
                let path = format!("/projects/{}/members", project_id);
                let raw: Vec<RawMember> = self
                    .client
                    .get(&path, &[("status", "ACCEPTED".to_string())])
                    .await?;
                let members: Vec<ProjectMember> =
                    raw.into_iter().map(ProjectMember::from).collect();
                Ok(accepted_assignees(&members))
            }
        }
    }
}
