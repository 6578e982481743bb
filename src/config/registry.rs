use crate::utils::error::{ProfileQueryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_API_BASE_URL: &str = "https://pub.orcid.org";
pub const DEFAULT_TOKEN_URL: &str = "https://orcid.org/oauth/token";
pub const READ_PUBLIC_SCOPE: &str = "/read-public";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_scope() -> String {
    READ_PUBLIC_SCOPE.to_string()
}

/// Where the registry lives and how to obtain a client-credentials token for it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl RegistrySettings {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_url: default_token_url(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: default_scope(),
        }
    }

    /// Reads `ORCID_CLIENT_ID` and `ORCID_CLIENT_SECRET` (required) plus the
    /// optional `ORCID_API_BASE_URL` and `ORCID_TOKEN_URL` overrides.
    pub fn from_env() -> Result<Self> {
        let client_id = required_env("ORCID_CLIENT_ID")?;
        let client_secret = required_env("ORCID_CLIENT_SECRET")?;

        let mut settings = Self::new(client_id, client_secret);
        if let Ok(url) = std::env::var("ORCID_API_BASE_URL") {
            settings.api_base_url = url;
        }
        if let Ok(url) = std::env::var("ORCID_TOKEN_URL") {
            settings.token_url = url;
        }
        Ok(settings)
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ProfileQueryError::ConfigError {
        message: format!("environment variable {} is not set", name),
    })
}

impl fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("api_base_url", &self.api_base_url)
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

impl Validate for RegistrySettings {
    fn validate(&self) -> Result<()> {
        validate_url("registry.api_base_url", &self.api_base_url)?;
        validate_url("registry.token_url", &self.token_url)?;
        validate_non_empty_string("registry.client_id", &self.client_id)?;
        validate_non_empty_string("registry.client_secret", &self.client_secret)?;
        validate_non_empty_string("registry.scope", &self.scope)?;
        Ok(())
    }
}
