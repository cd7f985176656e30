use super::{ApiClient, ApiError};
use crate::core::notification::{Notification, NotificationId};
use crate::wire::decode::{RawCount, RawNotification};

#[derive(Clone)]
pub struct NotificationsApi {
    client: ApiClient,
}

impl NotificationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        unread_only: bool,
        limit: Option<u32>,
    ) -> Result<Vec<Notification>, ApiError> {
        let mut query = Vec::new();
        if unread_only {
            query.push(("unreadOnly", "true".to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        let raw: Vec<RawNotification> = self.client.get("/notifications", &query).await?;
        Ok(raw.into_iter().map(Notification::from).collect())
    }

    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        let counted: RawCount = self.client.get("/notifications/unread-count", &[]).await?;
        Ok(counted.count)
    }

    pub async fn mark_read(&self, id: NotificationId) -> Result<Notification, ApiError> {
        let raw: RawNotification = self
            .client
            .patch_empty(&format!("/notifications/{}/read", id))
            .await?;
        Ok(raw.into())
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.patch_empty("/notifications/read-all").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::core::notification::NotificationKind;
    use crate::session::SessionStore;
    use mockito::Matcher;

    fn make_api(base_url: &str) -> NotificationsApi {
        let config = ClientConfig::with_base_url(base_url);
        let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
        NotificationsApi::new(client)
    }

    #[tokio::test]
    async fn list_sends_unread_filter_and_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/notifications")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("unreadOnly".into(), "true".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"data": [
                    {"id": 1, "type": "PROJECT_INVITE_SENT",
                     "title": "Invitation", "message": "Dana invited you",
                     "read": false}
                ]}"#,
            )
            .create_async()
            .await;

        let api = make_api(&server.url());
        let notifications = api.list(true, Some(5)).await.unwrap();

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::ProjectInviteSent);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unread_count_unwraps_count_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/notifications/unread-count")
            .with_status(200)
            .with_body(r#"{"data": {"count": 4}}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        assert_eq!(api.unread_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn mark_read_hits_the_read_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/notifications/7/read")
            .with_status(200)
            .with_body(
                r#"{"data": {"id": 7, "type": "TASK_ASSIGNED", "title": "Assigned",
                             "message": "You picked up a task", "read": true}}"#,
            )
            .create_async()
            .await;

        let api = make_api(&server.url());
        let updated = api.mark_read(7).await.unwrap();
        assert!(updated.read);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn mark_all_read_succeeds_on_success_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/notifications/read-all")
            .with_status(200)
            .with_body(r#"{"data": {"success": true}}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        assert!(api.mark_all_read().await.is_ok());
    }
}
