use crate::config::registry::RegistrySettings;
use crate::domain::model::{RequestOptions, TransportResponse};
use crate::domain::ports::Transport;
use crate::utils::error::{ProfileQueryError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use url::Url;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Bearer token bound to a registry API host. Issues authenticated GET requests.
#[derive(Clone)]
pub struct AccessToken {
    client: Client,
    base_url: Url,
    secret: String,
}

impl AccessToken {
    pub fn new(api_base_url: &str, secret: impl Into<String>) -> Result<Self> {
        Self::with_client(Client::new(), api_base_url, secret)
    }

    /// Uses a caller-built client, e.g. one with timeouts configured.
    pub fn with_client(client: Client, api_base_url: &str, secret: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(api_base_url)?,
            secret: secret.into(),
        })
    }

    /// Runs the OAuth client-credentials grant against `settings.token_url`.
    pub async fn client_credentials(settings: &RegistrySettings) -> Result<Self> {
        Self::client_credentials_with(Client::new(), settings).await
    }

    pub async fn client_credentials_with(client: Client, settings: &RegistrySettings) -> Result<Self> {
        tracing::debug!(
            "Requesting client-credentials token from {} (scope {})",
            settings.token_url,
            settings.scope
        );

        let response = client
            .post(&settings.token_url)
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", settings.client_id.as_str()),
                ("client_secret", settings.client_secret.as_str()),
                ("grant_type", "client_credentials"),
                ("scope", settings.scope.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let token: TokenResponse = response.json().await?;
        let secret = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProfileQueryError::Authentication {
                message: format!("token endpoint {} returned no access_token", settings.token_url),
            })?;

        tracing::info!(
            "Acquired registry access token (scope {})",
            token.scope.as_deref().unwrap_or(&settings.scope)
        );

        Self::with_client(client, &settings.api_base_url, secret)
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ProfileQueryError::InvalidConfigValueError {
                field: "path".to_string(),
                value: path.to_string(),
                reason: format!("Cannot be joined to {}: {}", self.base_url, e),
            })
    }
}

fn parse_base_url(api_base_url: &str) -> Result<Url> {
    let normalized = if api_base_url.ends_with('/') {
        api_base_url.to_string()
    } else {
        format!("{}/", api_base_url)
    };

    Url::parse(&normalized).map_err(|e| ProfileQueryError::InvalidConfigValueError {
        field: "api_base_url".to_string(),
        value: api_base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("base_url", &self.base_url.as_str())
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Transport for AccessToken {
    async fn get(&self, path: &str, options: &RequestOptions) -> Result<TransportResponse> {
        let url = self.url_for(path)?;
        tracing::debug!("Making API request to: {}", url);

        let mut request = self
            .client
            .get(url)
            .bearer_auth(&self.secret)
            .query(&options.params);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        Ok(TransportResponse { body })
    }
}
