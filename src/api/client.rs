//! Thin HTTP client for the platform REST API.
//!
//! Wraps a `reqwest::Client` with the API root, JSON bodies and optional
//! bearer authentication. Responses are returned whole, status included, so
//! callers decide what counts as success.

use crate::{
    config::ApiConfig,
    errors::{Error, Result},
    models::{Created, EntityId},
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Credentials attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// No `Authorization` header
    Anonymous,
    /// `Authorization: Bearer <token>`
    Bearer(String),
}

impl Auth {
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

/// Status and raw body of an API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Converts a non-2xx response into [`Error::Status`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    /// Extracts the `id` of a freshly created entity.
    pub fn created_id(&self) -> Result<EntityId> {
        let value: Value = self.json()?;
        if value.get("id").is_none_or(Value::is_null) {
            return Err(Error::MissingField {
                field: "id",
                body: self.body.clone(),
            });
        }
        let created: Created = serde_json::from_value(value)?;
        Ok(created.id)
    }
}

/// Client bound to one API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_url: String,
}

impl ApiClient {
    /// Builds a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
            login_url: config.login_url(),
        })
    }

    /// Absolute URL for a path under the API root (`path` starts with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request to a path under the API root.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        auth: &Auth,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        self.send_to(method, &url, auth, body).await
    }

    async fn send_to(
        &self,
        method: Method,
        url: &str,
        auth: &Auth,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        debug!(%method, %url, authenticated = !auth.is_anonymous(), "Sending request");

        let mut request = self.http.request(method, url);
        if let Auth::Bearer(token) = auth {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "Received response");

        Ok(ApiResponse { status, body })
    }

    pub async fn get(&self, path: &str, auth: &Auth) -> Result<ApiResponse> {
        self.send(Method::GET, path, auth, None).await
    }

    pub async fn post(&self, path: &str, auth: &Auth, body: &Value) -> Result<ApiResponse> {
        self.send(Method::POST, path, auth, Some(body)).await
    }

    /// POSTs a creation payload and returns the new entity's id.
    ///
    /// # Errors
    /// Transport failure, a non-2xx status, or a body without `id`.
    pub async fn create(&self, path: &str, auth: &Auth, body: &Value) -> Result<EntityId> {
        self.post(path, auth, body)
            .await?
            .error_for_status()?
            .created_id()
    }

    /// Logs in and returns the bearer token from `access_token`.
    ///
    /// # Errors
    /// Transport failure, a non-2xx status, or a body without `access_token`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .send_to(Method::POST, &self.login_url, &Auth::Anonymous, Some(&body))
            .await?
            .error_for_status()?;

        let value: Value = response.json()?;
        value
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(Error::MissingField {
                field: "access_token",
                body: response.body,
            })
    }
}
