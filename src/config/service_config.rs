use crate::config::registry::RegistrySettings;
use crate::domain::model::{Headers, ProfileRecord};
use crate::domain::ports::{QueryParameterBuilder, ResponseBuilder, Transport};
use std::sync::Arc;

/// Collaborators of a `ProfileQueryService`. Every field is optional and is
/// resolved once when the service is constructed:
///
/// - `query_parameter_builder`: `PassThroughParameters`
/// - `response_builder`: `R::from(ProfileRecord)`
/// - `path`: `"v1.1/search/orcid-bio/"`
/// - `headers`: `accept: application/orcid+json`, `Content-Type: application/orcid+xml`
/// - `token`: a client-credentials token acquired with `registry`
/// - `registry`: `RegistrySettings::from_env()`, only consulted when `token` is unset
pub struct ServiceConfig<I: ?Sized, R = ProfileRecord> {
    pub query_parameter_builder: Option<Arc<dyn QueryParameterBuilder<I>>>,
    pub response_builder: Option<Arc<dyn ResponseBuilder<R>>>,
    pub path: Option<String>,
    pub headers: Option<Headers>,
    pub token: Option<Arc<dyn Transport>>,
    pub registry: Option<RegistrySettings>,
}

impl<I: ?Sized, R> Default for ServiceConfig<I, R> {
    fn default() -> Self {
        Self {
            query_parameter_builder: None,
            response_builder: None,
            path: None,
            headers: None,
            token: None,
            registry: None,
        }
    }
}

impl<I: ?Sized, R> ServiceConfig<I, R> {
    pub fn with_query_parameter_builder(
        mut self,
        builder: impl QueryParameterBuilder<I> + 'static,
    ) -> Self {
        self.query_parameter_builder = Some(Arc::new(builder));
        self
    }

    pub fn with_response_builder(mut self, builder: impl ResponseBuilder<R> + 'static) -> Self {
        self.response_builder = Some(Arc::new(builder));
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_token(mut self, token: impl Transport + 'static) -> Self {
        self.token = Some(Arc::new(token));
        self
    }

    pub fn with_registry(mut self, registry: RegistrySettings) -> Self {
        self.registry = Some(registry);
        self
    }
}
