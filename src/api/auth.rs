use serde::Serialize;
use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::core::user::SessionUser;
use crate::wire::decode;

#[derive(Debug, Clone, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Registration fields, spelled the way the register endpoint expects them.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// What a credential exchange produced. The token may be missing when the
/// backend omits it; the session is only updated when one arrived.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST /auth/login. On success the token (and the account, when the
    /// response includes one) is stored into the session.
    pub async fn login(&self, payload: &LoginPayload) -> Result<LoginOutcome, ApiError> {
        let body = self.client.post_raw("/auth/login", payload).await?;
        Ok(self.adopt(&body))
    }

    /// POST /auth/register, with the same session side effect as login.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<LoginOutcome, ApiError> {
        let body = self.client.post_raw("/auth/register", payload).await?;
        Ok(self.adopt(&body))
    }

    fn adopt(&self, body: &Value) -> LoginOutcome {
        let (token, user) = decode::login_session(body);
        match token {
            Some(ref token) => {
                self.client
                    .session()
                    .set_session(Some(token.clone()), user.clone());
            }
            None => log::warn!("Auth response carried no token; session left untouched"),
        }
        LoginOutcome { token, user }
    }

    /// DELETE /auth/logout. Clearing local state is SessionStore::logout's
    /// job so it happens even when this call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.delete_raw("/auth/logout").await.map(|_| ())
    }

    /// GET /auth/me, with the older /user/me path kept as a fallback. The
    /// whole body is returned because deployments disagree on the nesting.
    pub async fn profile(&self) -> Result<Value, ApiError> {
        match self.client.get_raw("/auth/me").await {
            Err(ApiError::Rejected {
                status: 404 | 405, ..
            }) => self.client.get_raw("/user/me").await,
            other => other,
        }
    }
}
