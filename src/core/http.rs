use std::time::Duration;

use reqwest::{
    header::{
        ACCEPT,
        USER_AGENT,
    },
    Client,
    StatusCode,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::StatsError;

pub fn http_client() -> Result<Client, StatsError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| StatsError::Custom(format!("HTTP client build failed: {e}")))
}

/// Joins a base url and a path without doubling or dropping the slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Single-shot GET: values in `params` are url-encoded individually and keep their order.
/// Anything other than a 200 with a non-empty JSON body is an error.
pub async fn fetch_json(
    client: &Client,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<serde_json::Value, StatsError> {
    debug!(endpoint, params = params.len(), "GET");

    let mut request = client
        .get(endpoint)
        .header(USER_AGENT, "spacestats/0.2 (+reqwest)")
        .header(ACCEPT, "application/json");
    if !params.is_empty() {
        request = request.query(params);
    }

    let resp = request.send().await?;
    let status = resp.status();
    let url = resp.url().to_string();

    if status != StatusCode::OK {
        return Err(StatsError::HttpStatus { status: status.as_u16(), url });
    }

    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Err(StatsError::EmptyBody(url));
    }

    let value = serde_json::from_str(&body)?;
    debug!(%url, bytes = body.len(), "GET complete");
    Ok(value)
}

pub async fn fetch_typed<T: DeserializeOwned>(
    client: &Client,
    endpoint: &str,
    params: &[(&str, &str)],
) -> Result<T, StatsError> {
    let value = fetch_json(client, endpoint, params).await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://host:8080/", "/api/x/"), "http://host:8080/api/x/");
        assert_eq!(join_url("http://host", "api"), "http://host/api");
    }

    #[tokio::test]
    async fn fetch_json_parses_ok_body_and_encodes_params() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/add_term/")
                    .query_param("apiKey", "42:abc")
                    .query_param("term", "a b&c");
                then.status(200).json_body(json!({ "status": true }));
            })
            .await;

        let client = http_client().unwrap();
        let value = fetch_json(
            &client,
            &server.url("/api/add_term/"),
            &[("apiKey", "42:abc"), ("term", "a b&c")],
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(value, json!({ "status": true }));
    }

    #[tokio::test]
    async fn fetch_json_rejects_non_200() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/get_tasks/7");
                then.status(500).body("{}");
            })
            .await;

        let client = http_client().unwrap();
        let err = fetch_json(&client, &server.url("/api/get_tasks/7"), &[]).await.unwrap_err();
        assert!(matches!(err, StatsError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn fetch_json_rejects_empty_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/get_activity/7");
                then.status(200).body("");
            })
            .await;

        let client = http_client().unwrap();
        let err = fetch_json(&client, &server.url("/api/get_activity/7"), &[]).await.unwrap_err();
        assert!(matches!(err, StatsError::EmptyBody(_)));
    }

    #[tokio::test]
    async fn fetch_json_rejects_malformed_json() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken");
                then.status(200).body("{not json");
            })
            .await;

        let client = http_client().unwrap();
        let err = fetch_json(&client, &server.url("/broken"), &[]).await.unwrap_err();
        assert!(matches!(err, StatsError::Json(_)));
    }
}
