//! HTTP request executor.
//!
//! [`ApiClient`] owns the connection pool, base URL and authentication mode,
//! and turns every response into `ServiceResult<Option<T>>` through
//! [`ApiEnvelope`]. Resource modules hold a [`Resource`] (a base path on a
//! client) instead of inheriting request plumbing.

use std::sync::Arc;

use pagecraft_core::{ServiceError, ServiceResult};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::EditorConfig;
use crate::envelope::ApiEnvelope;

/// How requests authenticate.
#[derive(Debug, Clone, Default)]
pub enum AuthMode {
    /// No credentials.
    #[default]
    Anonymous,
    /// `Authorization: Bearer <token>`.
    Bearer(SecretString),
}

/// Generic JSON request executor.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthMode,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("auth", &self.inner.auth)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base_url`.
    #[must_use]
    pub fn new(base_url: Url, auth: AuthMode) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url,
                auth,
            }),
        }
    }

    /// Create a client from editor configuration.
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        let auth = config
            .api_token
            .clone()
            .map_or(AuthMode::Anonymous, AuthMode::Bearer);
        Self::new(config.api_url.clone(), auth)
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// A resource rooted at `path` (relative to the base URL).
    #[must_use]
    pub fn resource(&self, path: impl Into<String>) -> Resource {
        Resource {
            client: self.clone(),
            path: path.into().trim_matches('/').to_string(),
        }
    }

    /// Send a request and decode the envelope.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Transport` for connection failures, bad bodies and 5xx
    /// - `ServiceError::NotFound` for 404
    /// - `ServiceError::Validation` for other 4xx
    #[instrument(skip(self, body), fields(base = %self.inner.base_url))]
    pub async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ServiceResult<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self
            .inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ServiceError::Transport(format!("invalid request path {path}: {e}")))?;

        let mut request = self.inner.http.request(method, url);
        if let AuthMode::Bearer(token) = &self.inner.auth {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        debug!(status = %status, bytes = text.len(), "Response received");

        let envelope = if text.trim().is_empty() {
            None
        } else {
            match serde_json::from_str::<ApiEnvelope<T>>(&text) {
                Ok(envelope) => Some(envelope),
                Err(e) if status.is_success() => {
                    tracing::error!(
                        error = %e,
                        body = %text.chars().take(500).collect::<String>(),
                        "Failed to decode response"
                    );
                    return Err(ServiceError::Transport(format!("malformed response: {e}")));
                }
                Err(_) => None,
            }
        };

        if status.is_success() {
            return envelope.map_or(Ok(None), |envelope| {
                envelope.into_data().map_err(ServiceError::Validation)
            });
        }

        let message = envelope
            .and_then(|envelope| envelope.into_data().err())
            .unwrap_or_else(|| {
                format!(
                    "HTTP {status}: {}",
                    text.chars().take(200).collect::<String>()
                )
            });
        Err(status_error(status, message))
    }
}

fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

fn status_error(status: StatusCode, message: String) -> ServiceError {
    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(message),
        s if s.is_client_error() => ServiceError::Validation(message),
        _ => ServiceError::Transport(message),
    }
}

/// A base path on an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct Resource {
    client: ApiClient,
    path: String,
}

impl Resource {
    fn url(&self, sub_path: &str) -> String {
        let sub_path = sub_path.trim_matches('/');
        if sub_path.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{sub_path}", self.path)
        }
    }

    /// `GET <base>/<sub_path>`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get<T: DeserializeOwned>(&self, sub_path: &str) -> ServiceResult<Option<T>> {
        self.client
            .execute::<(), T>(Method::GET, &self.url(sub_path), None)
            .await
    }

    /// `PUT <base>/<sub_path>` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn put<B, T>(&self, sub_path: &str, body: &B) -> ServiceResult<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.client
            .execute(Method::PUT, &self.url(sub_path), Some(body))
            .await
    }

    /// `POST <base>/<sub_path>` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn post<T: DeserializeOwned>(&self, sub_path: &str) -> ServiceResult<Option<T>> {
        self.client
            .execute::<(), T>(Method::POST, &self.url(sub_path), None)
            .await
    }

    /// `DELETE <base>/<sub_path>`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete(&self, sub_path: &str) -> ServiceResult<()> {
        self.client
            .execute::<(), serde_json::Value>(Method::DELETE, &self.url(sub_path), None)
            .await
            .map(|_| ())
    }
}
