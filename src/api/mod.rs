pub mod auth;
pub mod calendar;
pub mod error;
pub mod invitations;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod team;
pub mod users;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::session::SessionStore;
use crate::wire::envelope::Envelope;

pub use error::ApiError;

/// Shared HTTP plumbing for every gateway: bearer attach, `{message, data}`
/// unwrap, and error normalization. Any 401 expires the session it holds.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send, read, classify. Success bodies come back as raw JSON; an empty
    /// success body reads as null.
    async fn execute(&self, builder: RequestBuilder, context: &str) -> Result<Value, ApiError> {
        let response = builder.send().await.map_err(|e| {
            log::warn!("{} failed before a response arrived: {}", context, e);
            ApiError::network(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response: {}", e)))?;

        if status == StatusCode::UNAUTHORIZED {
            self.session.expire();
        }

        if !status.is_success() {
            let error = ApiError::from_response(status, &text);
            log::debug!("{} rejected with {}: {}", context, status, error);
            return Err(error);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            log::warn!("{} returned an unreadable body: {}", context, e);
            ApiError::network(format!("unreadable response body: {}", e))
        })
    }

    fn unwrap_data<T>(value: Value, context: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value::<Envelope<T>>(value)
            .map(|envelope| envelope.data)
            .map_err(|e| {
                log::warn!("{} envelope did not decode: {}", context, e);
                ApiError::network(format!("unexpected response shape: {}", e))
            })
    }

    pub(crate) async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut builder = self.request(Method::GET, path);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let body = self.execute(builder, path).await?;
        Self::unwrap_data(body, path)
    }

    /// Whole response body, envelope included.
    pub(crate) async fn get_raw(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(self.request(Method::GET, path), path).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let body = self.execute(builder, path).await?;
        Self::unwrap_data(body, path)
    }

    /// POST returning the whole body; the auth endpoints nest their token
    /// outside the usual data shape.
    pub(crate) async fn post_raw<B>(&self, path: &str, payload: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(payload);
        self.execute(builder, path).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PATCH, path).json(payload);
        let body = self.execute(builder, path).await?;
        Self::unwrap_data(body, path)
    }

    /// PATCH without a payload, for action routes like mark-read.
    pub(crate) async fn patch_empty<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(self.request(Method::PATCH, path), path).await?;
        Self::unwrap_data(body, path)
    }

    /// PATCH returning the whole body for tolerant decoding.
    pub(crate) async fn patch_raw<B>(&self, path: &str, payload: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PATCH, path).json(payload);
        self.execute(builder, path).await
    }

    pub(crate) async fn delete<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self
            .execute(self.request(Method::DELETE, path), path)
            .await?;
        Self::unwrap_data(body, path)
    }

    /// DELETE where the body does not matter, only success or failure.
    pub(crate) async fn delete_raw(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(self.request(Method::DELETE, path), path).await
    }
}
