use chrono::NaiveDate;
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::core::invitation::{Invitation, InvitationStatus};
use crate::core::project::{AssigneeOption, Project, ProjectId, ProjectMember, ProjectStatus};
use crate::core::user::UserId;
use crate::wire::decode::{RawAssignee, RawDeleted, RawInvitation, RawMember, RawProject};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteProjectMemberPayload {
    pub invited_user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Clone)]
pub struct ProjectsApi {
    client: ApiClient,
}

impl ProjectsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, status: Option<ProjectStatus>) -> Result<Vec<Project>, ApiError> {
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.as_keyword().to_string()));
        }
        let raw: Vec<RawProject> = self.client.get("/projects", &query).await?;
        Ok(raw.into_iter().map(Project::from).collect())
    }

    pub async fn create(&self, payload: &CreateProjectPayload) -> Result<Project, ApiError> {
        let raw: RawProject = self.client.post("/projects", payload).await?;
        Ok(raw.into())
    }

    pub async fn update(
        &self,
        id: ProjectId,
        payload: &UpdateProjectPayload,
    ) -> Result<Project, ApiError> {
        let raw: RawProject = self
            .client
            .patch(&format!("/projects/{}", id), payload)
            .await?;
        Ok(raw.into())
    }

    pub async fn remove(&self, id: ProjectId) -> Result<ProjectId, ApiError> {
        let ack: RawDeleted = self.client.delete(&format!("/projects/{}", id)).await?;
        Ok(ack.id)
    }

    /// GET /users/search for the invite picker.
    pub async fn search_users(&self, query: &str) -> Result<Vec<AssigneeOption>, ApiError> {
        let raw: Vec<RawAssignee> = self
            .client
            .get("/users/search", &[("query", query.to_string())])
            .await?;
        Ok(raw.into_iter().map(AssigneeOption::from).collect())
    }

    pub async fn invite(
        &self,
        project_id: ProjectId,
        payload: &InviteProjectMemberPayload,
    ) -> Result<Invitation, ApiError> {
        let raw: RawInvitation = self
            .client
            .post(&format!("/projects/{}/invitations", project_id), payload)
            .await?;
        Ok(raw.into())
    }

    pub async fn members(
        &self,
        project_id: ProjectId,
        status: Option<InvitationStatus>,
    ) -> Result<Vec<ProjectMember>, ApiError> {
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.as_keyword().to_string()));
        }
        let raw: Vec<RawMember> = self
            .client
            .get(&format!("/projects/{}/members", project_id), &query)
            .await?;
        Ok(raw.into_iter().map(ProjectMember::from).collect())
    }
}
