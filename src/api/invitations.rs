use serde::Serialize;
use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::core::invitation::{Invitation, InvitationFilters, InvitationId, RespondAction};
use crate::wire::decode::{RawDeleted, RawInvitation};

#[derive(Debug, Clone, Serialize)]
struct RespondPayload {
    action: &'static str,
}

/// What a cancel left behind: some servers mark the invitation, others
/// delete the row and return only its id.
#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Updated(Invitation),
    Deleted(InvitationId),
}

#[derive(Clone)]
pub struct InvitationsApi {
    client: ApiClient,
}

impl InvitationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn received(&self, filters: &InvitationFilters) -> Result<Vec<Invitation>, ApiError> {
        let query = filters.to_query();
        let raw: Vec<RawInvitation> = self.client.get("/invitations/received", &query).await?;
        Ok(raw.into_iter().map(Invitation::from).collect())
    }

    pub async fn sent(&self, filters: &InvitationFilters) -> Result<Vec<Invitation>, ApiError> {
        let query = filters.to_query();
        let raw: Vec<RawInvitation> = self.client.get("/invitations/sent", &query).await?;
        Ok(raw.into_iter().map(Invitation::from).collect())
    }

    /// Both directions in one round, the way the invitations screen fills
    /// its Received and Sent tabs together.
    pub async fn inbox(
        &self,
        filters: &InvitationFilters,
    ) -> Result<(Vec<Invitation>, Vec<Invitation>), ApiError> {
        futures::try_join!(self.received(filters), self.sent(filters))
    }

    pub async fn respond(
        &self,
        id: InvitationId,
        action: RespondAction,
    ) -> Result<Invitation, ApiError> {
        let payload = RespondPayload {
            action: action.as_keyword(),
        };
        let raw: RawInvitation = self
            .client
            .patch(&format!("/invitations/{}/respond", id), &payload)
            .await?;
        Ok(raw.into())
    }

    pub async fn accept(&self, id: InvitationId) -> Result<Invitation, ApiError> {
        match self
            .client
            .patch_empty::<RawInvitation>(&format!("/invitations/{}/accept", id))
            .await
        {
            Ok(raw) => Ok(raw.into()),
            Err(ApiError::Rejected {
                status: 404 | 405, ..
            }) => {
                log::debug!("Accept route missing for invitation {}, using respond", id);
                self.respond(id, RespondAction::Accept).await
            }
            Err(e) => Err(e),
        }
    }

    pub async fn reject(&self, id: InvitationId) -> Result<Invitation, ApiError> {
        match self
            .client
            .patch_empty::<RawInvitation>(&format!("/invitations/{}/reject", id))
            .await
        {
            Ok(raw) => Ok(raw.into()),
            Err(ApiError::Rejected {
                status: 404 | 405, ..
            }) => {
                log::debug!("Reject route missing for invitation {}, using respond", id);
                self.respond(id, RespondAction::Reject).await
            }
            Err(e) => Err(e),
        }
    }

    pub async fn cancel(&self, id: InvitationId) -> Result<CancelOutcome, ApiError> {
        match self
            .client
            .patch_empty::<Value>(&format!("/invitations/{}/cancel", id))
            .await
        {
            Ok(data) => Self::cancel_outcome(data),
            Err(ApiError::Rejected {
                status: 404 | 405, ..
            }) => {
                log::debug!("Cancel route missing for invitation {}, deleting", id);
                let ack: RawDeleted = self.client.delete(&format!("/invitations/{}", id)).await?;
                Ok(CancelOutcome::Deleted(ack.id))
            }
            Err(e) => Err(e),
        }
    }

    fn cancel_outcome(data: Value) -> Result<CancelOutcome, ApiError> {
        if let Ok(raw) = serde_json::from_value::<RawInvitation>(data.clone()) {
            return Ok(CancelOutcome::Updated(raw.into()));
        }
        match serde_json::from_value::<RawDeleted>(data) {
            Ok(ack) => Ok(CancelOutcome::Deleted(ack.id)),
            Err(e) => Err(ApiError::network(format!(
                "unexpected cancel response shape: {}",
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::core::invitation::InvitationStatus;
    use crate::session::SessionStore;
    use mockito::Matcher;

    fn make_api(base_url: &str) -> InvitationsApi {
        let config = ClientConfig::with_base_url(base_url);
        let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
        InvitationsApi::new(client)
    }

    fn invitation_body(status: &str) -> String {
        format!(
            r#"{{"data": {{"id": 12, "projectId": 3, "projectName": "Atlas",
                 "invitedUserId": 8, "status": "{}"}}}}"#,
            status
        )
    }

    #[tokio::test]
    async fn respond_sends_uppercase_action() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/invitations/12/respond")
            .match_body(Matcher::Json(serde_json::json!({"action": "ACCEPT"})))
            .with_status(200)
            .with_body(invitation_body("ACCEPTED"))
            .create_async()
            .await;

        let api = make_api(&server.url());
        let updated = api.respond(12, RespondAction::Accept).await.unwrap();
        assert_eq!(updated.status, InvitationStatus::Accepted);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn accept_falls_back_to_respond_when_route_is_missing() {
        let mut server = mockito::Server::new_async().await;
        let missing = server
            .mock("PATCH", "/invitations/12/accept")
            .with_status(404)
            .with_body(r#"{"message": "Not found"}"#)
            .create_async()
            .await;
        let respond = server
            .mock("PATCH", "/invitations/12/respond")
            .match_body(Matcher::Json(serde_json::json!({"action": "ACCEPT"})))
            .with_status(200)
            .with_body(invitation_body("ACCEPTED"))
            .create_async()
            .await;

        let api = make_api(&server.url());
        let updated = api.accept(12).await.unwrap();

        assert_eq!(updated.status, InvitationStatus::Accepted);
        missing.assert_async().await;
        respond.assert_async().await;
    }

    #[tokio::test]
    async fn accept_does_not_fall_back_on_other_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/invitations/12/accept")
            .with_status(409)
            .with_body(r#"{"message": "Already handled"}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        let error = api.accept(12).await.unwrap_err();
        assert_eq!(
            error,
            ApiError::Rejected {
                status: 409,
                message: "Already handled".into()
            }
        );
    }

    #[tokio::test]
    async fn cancel_handles_updated_invitation() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/invitations/12/cancel")
            .with_status(200)
            .with_body(invitation_body("REMOVED"))
            .create_async()
            .await;

        let api = make_api(&server.url());
        match api.cancel(12).await.unwrap() {
            CancelOutcome::Updated(invitation) => {
                assert_eq!(invitation.status, InvitationStatus::Removed);
            }
            other => panic!("expected updated invitation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn cancel_falls_back_to_delete() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/invitations/12/cancel")
            .with_status(405)
            .with_body(r#"{"message": "Method not allowed"}"#)
            .create_async()
            .await;
        let deleted = server
            .mock("DELETE", "/invitations/12")
            .with_status(200)
            .with_body(r#"{"data": {"id": 12}}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        assert_eq!(api.cancel(12).await.unwrap(), CancelOutcome::Deleted(12));
        deleted.assert_async().await;
    }

    #[tokio::test]
    async fn inbox_loads_both_directions() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/invitations/received")
            .with_status(200)
            .with_body(
                r#"{"data": [{"id": 12, "projectId": 3, "invitedUserId": 8,
                     "status": "PENDING"}]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/invitations/sent")
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        let (received, sent) = api.inbox(&InvitationFilters::default()).await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(sent.is_empty());
    }

    #[tokio::test]
    async fn received_passes_status_filter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/invitations/received")
            .match_query(Matcher::UrlEncoded("status".into(), "PENDING".into()))
            .with_status(200)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        let filters = InvitationFilters {
            status: Some(InvitationStatus::Pending),
            project_id: None,
        };
        assert!(api.received(&filters).await.unwrap().is_empty());
        mock.assert_async().await;
    }
}
