//! HTTP client for the secrets REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ApiError, NewSecret, Secret, SecretsApi, validate_name};

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Client for the backend's `/secrets` endpoints.
#[derive(Debug, Clone)]
pub struct SecretsClient {
    http: Client,
    base_url: String,
}

impl SecretsClient {
    /// Create a new client for the given base URL (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/secrets", self.base_url)
    }

    fn secret_url(&self, name: &str) -> Result<String, ApiError> {
        validate_name(name)?;
        Ok(format!("{}/secrets/{}", self.base_url, encode_name(name)))
    }

    /// Turn a non-success response into an error, keeping the server's message.
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.map_err(|e| ApiError::Status {
            status: status.as_u16(),
            message: format!("failed to read response: {}", e),
        })?;

        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => body.error,
            Err(_) => text,
        };

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SecretsApi for SecretsClient {
    async fn list_secrets(&self) -> Result<Vec<Secret>, ApiError> {
        let response = self.http.get(self.collection_url()).send().await?;
        let response = Self::ensure_success(response).await?;

        // The backend encodes an empty collection as `null`.
        let secrets: Option<Vec<Secret>> = response.json().await?;
        let secrets = secrets.unwrap_or_default();
        debug!(count = secrets.len(), "listed secrets");
        Ok(secrets)
    }

    async fn get_secret(&self, name: &str) -> Result<Secret, ApiError> {
        let url = self.secret_url(name)?;
        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                name: name.to_string(),
            });
        }

        let response = Self::ensure_success(response).await?;
        let secret: Secret = response.json().await?;
        debug!(name = %secret.name, "fetched secret");
        Ok(secret)
    }

    async fn create_secret(&self, secret: &NewSecret) -> Result<(), ApiError> {
        validate_name(&secret.name)?;

        let response = self
            .http
            .post(self.collection_url())
            .json(secret)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        debug!(name = %secret.name, "created secret");
        Ok(())
    }

    async fn update_secret(&self, name: &str, value: &str) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct UpdateRequest<'a> {
            value: &'a str,
        }

        let url = self.secret_url(name)?;
        let response = self
            .http
            .put(&url)
            .json(&UpdateRequest { value })
            .send()
            .await?;
        Self::ensure_success(response).await?;

        debug!(name = %name, "updated secret");
        Ok(())
    }
}

/// Encode a secret name for use in a URL path.
///
/// Each `/`-separated part is percent-encoded on its own and the separators
/// stay literal, so `team/db key` becomes `team/db%20key`.
pub fn encode_name(name: &str) -> String {
    name.split('/')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Error body returned by the backend on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}
