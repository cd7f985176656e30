use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::core::team::{Presence, TeamMember};
use crate::core::user::UserId;
use crate::wire::decode::{RawDeleted, RawTeamMember};

#[derive(Debug, Clone, Serialize)]
pub struct InviteMemberPayload {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateMemberPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Presence>,
}

#[derive(Clone)]
pub struct TeamApi {
    client: ApiClient,
}

impl TeamApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<TeamMember>, ApiError> {
        let mut query = Vec::new();
        if let Some(search) = search {
            if !search.trim().is_empty() {
                query.push(("search", search.trim().to_string()));
            }
        }
        let raw: Vec<RawTeamMember> = self.client.get("/team", &query).await?;
        Ok(raw.into_iter().map(TeamMember::from).collect())
    }

    pub async fn invite(&self, payload: &InviteMemberPayload) -> Result<TeamMember, ApiError> {
        let raw: RawTeamMember = self.client.post("/team/invite", payload).await?;
        Ok(raw.into())
    }

    pub async fn update(
        &self,
        id: UserId,
        payload: &UpdateMemberPayload,
    ) -> Result<TeamMember, ApiError> {
        let raw: RawTeamMember = self.client.patch(&format!("/team/{}", id), payload).await?;
        Ok(raw.into())
    }

    pub async fn remove(&self, id: UserId) -> Result<UserId, ApiError> {
        let ack: RawDeleted = self.client.delete(&format!("/team/{}", id)).await?;
        Ok(ack.id)
    }
}
