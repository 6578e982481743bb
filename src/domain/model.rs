use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type QueryParameters = BTreeMap<String, String>;
pub type Headers = BTreeMap<String, String>;

/// A normalized registry profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub label: String,
    pub biography: String,
}

impl ProfileRecord {
    /// `"{given} {family}"`, then `" (e1, e2)"` when there are emails, then `" [ORCID: {id}]"`.
    pub fn format_label(given_names: &str, family_name: &str, emails: &[String], id: &str) -> String {
        let mut label = format!("{} {}", given_names, family_name);
        if !emails.is_empty() {
            label.push_str(" (");
            label.push_str(&emails.join(", "));
            label.push(')');
        }
        label.push_str(&format!(" [ORCID: {}]", id));
        label
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Headers,
    pub params: QueryParameters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub body: String,
}

impl TransportResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Result of one search.
///
/// `Found` always holds at least one record; build values with
/// [`SearchOutcome::from_records`] so an empty list becomes `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<R> {
    Found(Vec<R>),
    NotFound,
}

impl<R> SearchOutcome<R> {
    pub fn from_records(records: Vec<R>) -> Self {
        if records.is_empty() {
            SearchOutcome::NotFound
        } else {
            SearchOutcome::Found(records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_without_emails() {
        let label = ProfileRecord::format_label("Grace", "Hopper", &[], "0000-0002");
        assert_eq!(label, "Grace Hopper [ORCID: 0000-0002]");
    }

    #[test]
    fn test_label_keeps_email_order_and_duplicates() {
        let emails = vec![
            "b@example.org".to_string(),
            "a@example.org".to_string(),
            "b@example.org".to_string(),
        ];
        let label = ProfileRecord::format_label("Grace", "Hopper", &emails, "0000-0002");
        assert_eq!(
            label,
            "Grace Hopper (b@example.org, a@example.org, b@example.org) [ORCID: 0000-0002]"
        );
    }

    #[test]
    fn test_outcome_from_records() {
        let empty: SearchOutcome<u8> = SearchOutcome::from_records(vec![]);
        assert_eq!(empty, SearchOutcome::NotFound);

        let found = SearchOutcome::from_records(vec![1u8, 2]);
        assert_eq!(found, SearchOutcome::Found(vec![1, 2]));
    }
}
