use anyhow::Result;
use httpmock::prelude::*;
use orcid_profile_query::{
    AccessToken, ProfileQueryError, ProfileQueryService, ProfileRecord, QueryParameters,
    SearchListener, SearchOutcome, ServiceConfig, DEFAULT_SEARCH_PATH,
};
use std::sync::Arc;

#[derive(Default)]
struct Notifications {
    found: Vec<Vec<ProfileRecord>>,
    not_found: usize,
}

impl SearchListener<ProfileRecord> for Notifications {
    fn found(&mut self, records: &[ProfileRecord]) {
        self.found.push(records.to_vec());
    }

    fn not_found(&mut self) {
        self.not_found += 1;
    }
}

fn lovelace_query() -> QueryParameters {
    let mut query = QueryParameters::new();
    query.insert("q".to_string(), "family-name:Lovelace".to_string());
    query
}

fn service_for(server: &MockServer) -> Result<ProfileQueryService<QueryParameters>> {
    let token = AccessToken::new(&server.base_url(), "test-token")?;
    Ok(ProfileQueryService::with_transport(
        Arc::new(token),
        ServiceConfig::default(),
    ))
}

#[tokio::test]
async fn test_search_against_registry() -> Result<()> {
    let server = MockServer::start_async().await;

    let search_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/{}", DEFAULT_SEARCH_PATH))
                .query_param("q", "family-name:Lovelace")
                .header("authorization", "Bearer test-token")
                .header("accept", "application/orcid+json")
                .header("content-type", "application/orcid+xml");
            then.status(200)
                .header("Content-Type", "application/orcid+json")
                .json_body(serde_json::json!({
                    "orcid-search-results": {
                        "orcid-search-result": [
                            {
                                "orcid-profile": {
                                    "orcid-identifier": { "path": "0000-0001" },
                                    "orcid-bio": {
                                        "personal-details": {
                                            "given-names": { "value": "Ada" },
                                            "family-name": { "value": "Lovelace" }
                                        },
                                        "contact-details": {
                                            "email": [
                                                { "value": "ada@x.org" },
                                                { "value": "countess@x.org" }
                                            ]
                                        },
                                        "biography": { "value": "Wrote the first program." }
                                    }
                                }
                            },
                            {
                                "orcid-profile": {
                                    "orcid-identifier": { "path": "0000-0009" },
                                    "orcid-bio": {
                                        "personal-details": {
                                            "given-names": { "value": "Byron" },
                                            "family-name": { "value": "Lovelace" }
                                        }
                                    }
                                }
                            }
                        ]
                    }
                }));
        })
        .await;

    let service = service_for(&server)?;
    let mut notifications = Notifications::default();
    let records = service.call(&lovelace_query(), &mut notifications).await?;

    search_mock.assert_async().await;
    assert_eq!(
        records,
        vec![
            ProfileRecord {
                id: "0000-0001".to_string(),
                label: "Ada Lovelace (ada@x.org, countess@x.org) [ORCID: 0000-0001]".to_string(),
                biography: "Wrote the first program.".to_string(),
            },
            ProfileRecord {
                id: "0000-0009".to_string(),
                label: "Byron Lovelace [ORCID: 0000-0009]".to_string(),
                biography: String::new(),
            },
        ]
    );
    assert_eq!(notifications.found, vec![records]);
    assert_eq!(notifications.not_found, 0);

    Ok(())
}

#[tokio::test]
async fn test_no_matches_reports_not_found() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/{}", DEFAULT_SEARCH_PATH));
            then.status(200).body(r#"{"orcid-search-results":{"orcid-search-result":[]}}"#);
        })
        .await;

    let service = service_for(&server)?;
    let mut notifications = Notifications::default();
    let records = service.call(&lovelace_query(), &mut notifications).await?;

    assert!(records.is_empty());
    assert!(notifications.found.is_empty());
    assert_eq!(notifications.not_found, 1);

    let outcome = service.search(&lovelace_query()).await?;
    assert_eq!(outcome, SearchOutcome::NotFound);

    Ok(())
}

#[tokio::test]
async fn test_http_error_status_propagates() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/{}", DEFAULT_SEARCH_PATH));
            then.status(401).body(r#"{"error":"invalid_token"}"#);
        })
        .await;

    let service = service_for(&server)?;
    let mut notifications = Notifications::default();
    let err = service
        .call(&lovelace_query(), &mut notifications)
        .await
        .unwrap_err();

    match err {
        ProfileQueryError::Transport(e) => {
            assert_eq!(e.status().map(|s| s.as_u16()), Some(401));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(notifications.found.is_empty());
    assert_eq!(notifications.not_found, 0);

    Ok(())
}

#[tokio::test]
async fn test_xml_body_is_malformed_response() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/{}", DEFAULT_SEARCH_PATH));
            then.status(200)
                .header("Content-Type", "application/orcid+xml")
                .body("<orcid-message><orcid-search-results/></orcid-message>");
        })
        .await;

    let service = service_for(&server)?;
    let err = service.search(&lovelace_query()).await.unwrap_err();

    assert!(matches!(err, ProfileQueryError::MalformedResponse(_)));

    Ok(())
}
