use crate::adapters::http::AccessToken;
use crate::config::registry::RegistrySettings;
use crate::config::service_config::ServiceConfig;
use crate::core::parser::ResponseParser;
use crate::domain::model::{
    Headers, ProfileRecord, QueryParameters, RequestOptions, SearchOutcome, TransportResponse,
};
use crate::domain::ports::{
    PassThroughParameters, QueryParameterBuilder, ResponseBuilder, SearchListener, SearchResponse,
    Transport,
};
use crate::utils::error::{ProfileQueryError, Result};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_SEARCH_PATH: &str = "v1.1/search/orcid-bio/";

pub fn default_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("accept".to_string(), "application/orcid+json".to_string());
    headers.insert("Content-Type".to_string(), "application/orcid+xml".to_string());
    headers
}

/// Finds registry profiles matching a query. One call issues one request.
pub struct ProfileQueryService<I: ?Sized, R = ProfileRecord> {
    query_builder: Arc<dyn QueryParameterBuilder<I>>,
    response_builder: Arc<dyn ResponseBuilder<R>>,
    token: Arc<dyn Transport>,
    path: String,
    headers: Headers,
}

impl<I, R> ProfileQueryService<I, R>
where
    I: Serialize + ?Sized + 'static,
    R: From<ProfileRecord> + 'static,
{
    /// Resolves every unset collaborator to its default. Without a token this
    /// acquires one through the client-credentials grant.
    pub async fn new(mut config: ServiceConfig<I, R>) -> Result<Self> {
        let token = resolve_token(config.token.take(), config.registry.take()).await?;
        Ok(Self::with_transport(token, config))
    }

    /// Like `new`, with the transport supplied up front.
    pub fn with_transport(token: Arc<dyn Transport>, config: ServiceConfig<I, R>) -> Self {
        let query_builder: Arc<dyn QueryParameterBuilder<I>> = match config.query_parameter_builder {
            Some(builder) => builder,
            None => Arc::new(PassThroughParameters),
        };
        let response_builder: Arc<dyn ResponseBuilder<R>> = match config.response_builder {
            Some(builder) => builder,
            None => Arc::new(SearchResponse),
        };

        Self::from_parts(
            token,
            query_builder,
            response_builder,
            config.path,
            config.headers,
        )
    }
}

async fn resolve_token(
    token: Option<Arc<dyn Transport>>,
    registry: Option<RegistrySettings>,
) -> Result<Arc<dyn Transport>> {
    match token {
        Some(token) => Ok(token),
        None => {
            let settings = match registry {
                Some(settings) => settings,
                None => RegistrySettings::from_env()?,
            };
            let token: Arc<dyn Transport> =
                Arc::new(AccessToken::client_credentials(&settings).await?);
            Ok(token)
        }
    }
}

impl<I: ?Sized, R> ProfileQueryService<I, R> {
    /// Builds a service from resolved collaborators. Path and headers fall
    /// back to `DEFAULT_SEARCH_PATH` and `default_headers()`.
    pub fn from_parts(
        token: Arc<dyn Transport>,
        query_builder: Arc<dyn QueryParameterBuilder<I>>,
        response_builder: Arc<dyn ResponseBuilder<R>>,
        path: Option<String>,
        headers: Option<Headers>,
    ) -> Self {
        Self {
            query_builder,
            response_builder,
            token,
            path: path.unwrap_or_else(|| DEFAULT_SEARCH_PATH.to_string()),
            headers: headers.unwrap_or_else(default_headers),
        }
    }

    /// Builds a service for inputs and records the defaults cannot handle.
    /// `query_parameter_builder` and `response_builder` must both be set;
    /// the token is resolved as in `new`.
    pub async fn with_collaborators(mut config: ServiceConfig<I, R>) -> Result<Self> {
        let query_builder =
            config
                .query_parameter_builder
                .take()
                .ok_or_else(|| ProfileQueryError::ConfigError {
                    message: "query_parameter_builder must be set".to_string(),
                })?;
        let response_builder =
            config
                .response_builder
                .take()
                .ok_or_else(|| ProfileQueryError::ConfigError {
                    message: "response_builder must be set".to_string(),
                })?;
        let token = resolve_token(config.token, config.registry).await?;

        Ok(Self::from_parts(
            token,
            query_builder,
            response_builder,
            config.path,
            config.headers,
        ))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Runs the query and notifies `listener` exactly once: `found` with the
    /// records, or `not_found`. The records are returned either way. Errors
    /// surface before any notification.
    pub async fn call<L>(&self, input: &I, listener: &mut L) -> Result<Vec<R>>
    where
        L: SearchListener<R> + ?Sized,
    {
        let records = self.fetch(input).await?;
        if records.is_empty() {
            listener.not_found();
        } else {
            listener.found(&records);
        }
        Ok(records)
    }

    pub async fn search(&self, input: &I) -> Result<SearchOutcome<R>> {
        let records = self.fetch(input).await?;
        Ok(SearchOutcome::from_records(records))
    }

    async fn fetch(&self, input: &I) -> Result<Vec<R>> {
        let params = self.query_builder.build(input)?;
        let response = self.deliver(params).await?;

        let records = ResponseParser::new(self.response_builder.as_ref()).parse(&response.body)?;
        tracing::info!("Registry search matched {} profiles", records.len());
        Ok(records)
    }

    async fn deliver(&self, params: QueryParameters) -> Result<TransportResponse> {
        tracing::debug!("Querying registry path {} with {} parameters", self.path, params.len());
        let options = RequestOptions {
            headers: self.headers.clone(),
            params,
        };
        self.token.get(&self.path, &options).await
    }
}
