use crate::domain::model::ProfileRecord;
use crate::domain::ports::{ResponseBuilder, SearchResponse};
use crate::utils::error::{ProfileQueryError, Result};
use serde::Deserialize;

// Registry search document. Plain fields are required paths, `Option`
// fields are optional paths that fall back to a default.

#[derive(Debug, Deserialize)]
struct SearchDocument {
    #[serde(rename = "orcid-search-results")]
    search_results: SearchResults,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(rename = "orcid-search-result")]
    entries: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(rename = "orcid-profile")]
    profile: OrcidProfile,
}

#[derive(Debug, Deserialize)]
struct OrcidProfile {
    #[serde(rename = "orcid-identifier")]
    identifier: OrcidIdentifier,
    #[serde(rename = "orcid-bio")]
    bio: OrcidBio,
}

#[derive(Debug, Deserialize)]
struct OrcidIdentifier {
    path: String,
}

#[derive(Debug, Deserialize)]
struct OrcidBio {
    #[serde(rename = "personal-details")]
    personal_details: PersonalDetails,
    #[serde(rename = "contact-details", default)]
    contact_details: Option<ContactDetails>,
    #[serde(default)]
    biography: Option<OptionalValue>,
}

#[derive(Debug, Deserialize)]
struct PersonalDetails {
    #[serde(rename = "given-names")]
    given_names: RequiredValue,
    #[serde(rename = "family-name")]
    family_name: RequiredValue,
}

#[derive(Debug, Deserialize)]
struct ContactDetails {
    #[serde(default)]
    email: Option<Vec<RequiredValue>>,
}

#[derive(Debug, Deserialize)]
struct RequiredValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct OptionalValue {
    #[serde(default)]
    value: Option<String>,
}

impl OrcidProfile {
    fn into_record(self) -> Result<ProfileRecord> {
        let id = self.identifier.path;
        if id.is_empty() {
            return Err(ProfileQueryError::UnexpectedSchema {
                message: "orcid-identifier.path is empty".to_string(),
            });
        }

        let emails: Vec<String> = self
            .bio
            .contact_details
            .and_then(|details| details.email)
            .unwrap_or_default()
            .into_iter()
            .map(|email| email.value)
            .collect();

        let label = ProfileRecord::format_label(
            &self.bio.personal_details.given_names.value,
            &self.bio.personal_details.family_name.value,
            &emails,
            &id,
        );

        let biography = self
            .bio
            .biography
            .and_then(|biography| biography.value)
            .unwrap_or_default();

        Ok(ProfileRecord {
            id,
            label,
            biography,
        })
    }
}

/// Turns a registry search response body into records built by `R`'s factory.
pub struct ResponseParser<'a, R> {
    response_builder: &'a dyn ResponseBuilder<R>,
}

impl<'a, R> ResponseParser<'a, R> {
    pub fn new(response_builder: &'a dyn ResponseBuilder<R>) -> Self {
        Self { response_builder }
    }

    pub fn parse(&self, document: &str) -> Result<Vec<R>> {
        let json: serde_json::Value =
            serde_json::from_str(document).map_err(ProfileQueryError::MalformedResponse)?;

        let document: SearchDocument =
            serde_json::from_value(json).map_err(|e| ProfileQueryError::UnexpectedSchema {
                message: e.to_string(),
            })?;

        let entries = document.search_results.entries;
        tracing::debug!("Registry returned {} search entries", entries.len());

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let record = entry.profile.into_record().map_err(|e| match e {
                ProfileQueryError::UnexpectedSchema { message } => {
                    ProfileQueryError::UnexpectedSchema {
                        message: format!("search entry {}: {}", index, message),
                    }
                }
                other => other,
            })?;
            records.push(self.response_builder.build(record));
        }

        Ok(records)
    }
}

/// Parses with the default factory.
pub fn parse_profiles(document: &str) -> Result<Vec<ProfileRecord>> {
    ResponseParser::new(&SearchResponse).parse(document)
}
