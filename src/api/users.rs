use super::{ApiClient, ApiError};
use crate::core::settings::{
    AppearanceSettings, IntegrationSettings, NotificationPreferences, SecuritySettings,
    UserProfile, UserSettings, WorkspaceSettings,
};
use crate::wire::decode;

#[derive(Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Current account as the settings screen shows it.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let body = self.client.get_raw("/users/me").await?;
        Ok(decode::profile_details(&body))
    }

    pub async fn update_profile(&self, payload: &UserProfile) -> Result<UserProfile, ApiError> {
        let body = self.client.patch_raw("/users/me", payload).await?;
        Ok(decode::profile_details(&body))
    }

    pub async fn settings(&self) -> Result<UserSettings, ApiError> {
        self.client.get("/users/me/settings", &[]).await
    }

    pub async fn update_notifications(
        &self,
        payload: &NotificationPreferences,
    ) -> Result<NotificationPreferences, ApiError> {
        self.client
            .patch("/users/me/settings/notifications", payload)
            .await
    }

    pub async fn update_security(
        &self,
        payload: &SecuritySettings,
    ) -> Result<SecuritySettings, ApiError> {
        self.client
            .patch("/users/me/settings/security", payload)
            .await
    }

    pub async fn update_appearance(
        &self,
        payload: &AppearanceSettings,
    ) -> Result<AppearanceSettings, ApiError> {
        self.client
            .patch("/users/me/settings/appearance", payload)
            .await
    }

    pub async fn update_integrations(
        &self,
        payload: &IntegrationSettings,
    ) -> Result<IntegrationSettings, ApiError> {
        self.client
            .patch("/users/me/settings/integrations", payload)
            .await
    }

    pub async fn update_workspace(
        &self,
        payload: &WorkspaceSettings,
    ) -> Result<WorkspaceSettings, ApiError> {
        self.client
            .patch("/users/me/settings/workspace", payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;
    use mockito::Matcher;

    fn make_api(base_url: &str) -> UsersApi {
        let config = ClientConfig::with_base_url(base_url);
        let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
        UsersApi::new(client)
    }

    #[tokio::test]
    async fn me_tolerates_legacy_field_names() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/me")
            .with_status(200)
            .with_body(
                r#"{"data": {"id": 2, "full_name": "Ada Woods",
                             "email": "ada@example.com", "role": "Engineer"}}"#,
            )
            .create_async()
            .await;

        let api = make_api(&server.url());
        let profile = api.me().await.unwrap();
        assert_eq!(profile.full_name, "Ada Woods");
        assert_eq!(profile.role_title, "Engineer");
    }

    #[tokio::test]
    async fn settings_fill_missing_sections_with_defaults() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/me/settings")
            .with_status(200)
            .with_body(r#"{"data": {"security": {"twoFactorAuth": true}}}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        let settings = api.settings().await.unwrap();
        assert!(settings.security.two_factor_auth);
        assert!(settings.notifications.task_assignments);
        assert_eq!(settings.workspace.workspace_name, "My Workspace");
    }

    #[tokio::test]
    async fn update_workspace_patches_its_section() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/users/me/settings/workspace")
            .match_body(Matcher::Json(
                serde_json::json!({"workspaceName": "Atlas HQ"}),
            ))
            .with_status(200)
            .with_body(r#"{"data": {"workspaceName": "Atlas HQ"}}"#)
            .create_async()
            .await;

        let api = make_api(&server.url());
        let updated = api
            .update_workspace(&WorkspaceSettings {
                workspace_name: "Atlas HQ".into(),
            })
            .await
            .unwrap();

        assert_eq!(updated.workspace_name, "Atlas HQ");
        mock.assert_async().await;
    }
}
