use crate::adapters::http::AccessToken;
use crate::config::registry::{RegistrySettings, DEFAULT_API_BASE_URL};
use crate::config::service_config::ServiceConfig;
use crate::config::toml_config::TomlConfig;
use crate::domain::model::QueryParameters;
use crate::utils::error::Result;
use crate::utils::validation::{validate_relative_path, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Debug, Clone, Parser)]
#[command(name = "orcid-query")]
#[command(about = "Search the ORCID registry for matching researcher profiles")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with [registry] and [search] sections")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Use this bearer token instead of the client-credentials grant")]
    pub access_token: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long, help = "Search path relative to the API base URL")]
    pub path: Option<String>,

    #[arg(long = "param", value_parser = parse_key_value, help = "Query parameter, e.g. q=family-name:Lovelace")]
    pub params: Vec<(String, String)>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn query_parameters(&self) -> QueryParameters {
        self.params.iter().cloned().collect()
    }

    /// Combines the config file (if any) with command-line overrides.
    pub fn service_config(&self) -> Result<ServiceConfig<QueryParameters>> {
        let mut config = match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file.into_service_config()
            }
            None => ServiceConfig::default(),
        };

        if let Some(path) = &self.path {
            config.path = Some(path.clone());
        }

        if let Some(secret) = &self.access_token {
            let base_url = self
                .api_base_url
                .as_deref()
                .or(config.registry.as_ref().map(|r| r.api_base_url.as_str()))
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string();
            config = config.with_token(AccessToken::new(&base_url, secret.clone())?);
        } else if let Some(base_url) = &self.api_base_url {
            let mut registry = match config.registry.take() {
                Some(registry) => registry,
                None => RegistrySettings::from_env()?,
            };
            registry.api_base_url = base_url.clone();
            config.registry = Some(registry);
        }

        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api_base_url {
            validate_url("api_base_url", url)?;
        }
        if let Some(path) = &self.path {
            validate_relative_path("path", path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let cli = CliConfig::parse_from([
            "orcid-query",
            "--param",
            "q=family-name:Lovelace AND given-names:Ada",
            "--param",
            "rows=5",
        ]);

        let params = cli.query_parameters();
        assert_eq!(params["q"], "family-name:Lovelace AND given-names:Ada");
        assert_eq!(params["rows"], "5");
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_rejects_param_without_equals() {
        assert!(CliConfig::try_parse_from(["orcid-query", "--param", "rows"]).is_err());
        assert!(CliConfig::try_parse_from(["orcid-query", "--param", "=5"]).is_err());
    }

    #[test]
    fn test_access_token_override() {
        let cli = CliConfig::parse_from([
            "orcid-query",
            "--access-token",
            "abc",
            "--api-base-url",
            "https://sandbox.orcid.org",
            "--path",
            "v1.2/search/orcid-bio/",
        ]);

        let config = cli.service_config().unwrap();
        assert!(config.token.is_some());
        assert!(config.registry.is_none());
        assert_eq!(config.path.as_deref(), Some("v1.2/search/orcid-bio/"));
    }

    #[test]
    fn test_validation_rejects_absolute_path() {
        let cli = CliConfig::parse_from(["orcid-query", "--path", "/v1.1/search/"]);
        assert!(cli.validate().is_err());
    }
}
