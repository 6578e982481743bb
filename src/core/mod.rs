pub mod parser;
pub mod service;

pub use crate::domain::model::{ProfileRecord, QueryParameters, SearchOutcome};
pub use crate::domain::ports::{QueryParameterBuilder, ResponseBuilder, SearchListener, Transport};
pub use crate::utils::error::Result;
