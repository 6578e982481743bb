use crate::config::registry::RegistrySettings;
use crate::config::service_config::ServiceConfig;
use crate::domain::model::Headers;
use crate::utils::error::{ProfileQueryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_relative_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub registry: RegistrySettings,
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub path: Option<String>,
    pub headers: Option<Headers>,
}

impl TomlConfig {
    /// Loads a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProfileQueryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses config text, substituting `${VAR}` from the environment first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProfileQueryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written so validation can report them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProfileQueryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn search_path(&self) -> Option<&str> {
        self.search.as_ref().and_then(|s| s.path.as_deref())
    }

    /// Service configuration with the registry, path and headers from this file.
    pub fn into_service_config<I: ?Sized, R>(self) -> ServiceConfig<I, R> {
        let search = self.search.unwrap_or_default();
        ServiceConfig {
            path: search.path,
            headers: search.headers,
            registry: Some(self.registry),
            ..ServiceConfig::default()
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.registry.validate()?;

        for (field, value) in [
            ("registry.client_id", &self.registry.client_id),
            ("registry.client_secret", &self.registry.client_secret),
        ] {
            if value.contains("${") {
                return Err(ProfileQueryError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: value.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }

        if let Some(path) = self.search_path() {
            validate_relative_path("search.path", path)?;
        }

        if let Some(headers) = self.search.as_ref().and_then(|s| s.headers.as_ref()) {
            for name in headers.keys() {
                validate_non_empty_string("search.headers", name)?;
            }
        }

        Ok(())
    }
}
