use crate::domain::model::{ProfileRecord, QueryParameters, RequestOptions, TransportResponse};
use crate::utils::error::{ProfileQueryError, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Maps caller input to the query parameters sent to the registry.
pub trait QueryParameterBuilder<I: ?Sized>: Send + Sync {
    fn build(&self, input: &I) -> Result<QueryParameters>;
}

impl<I, F> QueryParameterBuilder<I> for F
where
    I: ?Sized,
    F: Fn(&I) -> Result<QueryParameters> + Send + Sync,
{
    fn build(&self, input: &I) -> Result<QueryParameters> {
        self(input)
    }
}

/// Forwards every top-level scalar field of a serializable input as a query parameter.
///
/// Strings are sent as-is, numbers and booleans are stringified and nulls are
/// skipped. Nested arrays or objects have no flat representation and are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughParameters;

impl<I> QueryParameterBuilder<I> for PassThroughParameters
where
    I: Serialize + ?Sized,
{
    fn build(&self, input: &I) -> Result<QueryParameters> {
        let value = serde_json::to_value(input).map_err(|e| ProfileQueryError::InvalidQuery {
            message: format!("input could not be serialized: {}", e),
        })?;

        let fields = match value {
            serde_json::Value::Object(fields) => fields,
            serde_json::Value::Null => return Ok(QueryParameters::new()),
            other => {
                return Err(ProfileQueryError::InvalidQuery {
                    message: format!("expected a key/value input, got {}", other),
                })
            }
        };

        let mut parameters = QueryParameters::new();
        for (key, value) in fields {
            let rendered = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(ProfileQueryError::InvalidQuery {
                        message: format!("field '{}' is not a scalar value", key),
                    })
                }
            };
            parameters.insert(key, rendered);
        }
        Ok(parameters)
    }
}

/// HTTP GET capability used to reach the registry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, options: &RequestOptions) -> Result<TransportResponse>;
}

/// Builds the caller's record type from a parsed profile.
pub trait ResponseBuilder<R>: Send + Sync {
    fn build(&self, record: ProfileRecord) -> R;
}

impl<R, F> ResponseBuilder<R> for F
where
    F: Fn(ProfileRecord) -> R + Send + Sync,
{
    fn build(&self, record: ProfileRecord) -> R {
        self(record)
    }
}

/// Default factory: `R::from(record)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResponse;

impl<R> ResponseBuilder<R> for SearchResponse
where
    R: From<ProfileRecord>,
{
    fn build(&self, record: ProfileRecord) -> R {
        R::from(record)
    }
}

/// Completion events of a search. Exactly one fires per successful call.
pub trait SearchListener<R> {
    fn found(&mut self, _records: &[R]) {}

    fn not_found(&mut self) {}
}

impl<R> SearchListener<R> for () {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct NameQuery {
        q: String,
        rows: u32,
        start: Option<u32>,
    }

    #[test]
    fn test_pass_through_forwards_scalars() {
        let query = NameQuery {
            q: "family-name:Lovelace".to_string(),
            rows: 10,
            start: None,
        };

        let params = PassThroughParameters.build(&query).unwrap();
        assert_eq!(params.get("q").map(String::as_str), Some("family-name:Lovelace"));
        assert_eq!(params.get("rows").map(String::as_str), Some("10"));
        assert!(!params.contains_key("start"));
    }

    #[test]
    fn test_pass_through_accepts_maps_and_unit() {
        let mut input = HashMap::new();
        input.insert("given-names", "Ada");
        let params = PassThroughParameters.build(&input).unwrap();
        assert_eq!(params.len(), 1);

        let empty = PassThroughParameters.build(&()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_pass_through_rejects_nested_values() {
        let input = serde_json::json!({ "q": ["a", "b"] });
        let err = PassThroughParameters.build(&input).unwrap_err();
        assert!(matches!(err, ProfileQueryError::InvalidQuery { .. }));

        let err = PassThroughParameters.build("just a string").unwrap_err();
        assert!(matches!(err, ProfileQueryError::InvalidQuery { .. }));
    }

    #[test]
    fn test_closure_builder() {
        let builder = |name: &str| -> Result<QueryParameters> {
            let mut params = QueryParameters::new();
            params.insert("q".to_string(), format!("family-name:{}", name));
            Ok(params)
        };
        let params = QueryParameterBuilder::<str>::build(&builder, "Hopper").unwrap();
        assert_eq!(params["q"], "family-name:Hopper");
    }
}
