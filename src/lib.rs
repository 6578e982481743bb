pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::AccessToken;
pub use config::{RegistrySettings, ServiceConfig, TomlConfig};
pub use core::parser::{parse_profiles, ResponseParser};
pub use core::service::{default_headers, ProfileQueryService, DEFAULT_SEARCH_PATH};
pub use domain::model::{
    Headers, ProfileRecord, QueryParameters, RequestOptions, SearchOutcome, TransportResponse,
};
pub use domain::ports::{
    PassThroughParameters, QueryParameterBuilder, ResponseBuilder, SearchListener, SearchResponse,
    Transport,
};
pub use utils::error::{ProfileQueryError, Result};
