//! Shared HTTP plumbing for panel providers.
//!
//! Every outbound call is bounded by a timeout and never retried; the panel
//! fallback ladder handles failure instead.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{FetchError, ReqwestErrorExt};

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const USER_AGENT: &str = concat!("LifeDash/", env!("CARGO_PKG_VERSION"));

/// Build a client with a bounded timeout and the LifeDash user agent.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(ReqwestErrorExt::into_fetch_error)
}

/// GET `url` and decode the JSON body.
///
/// Non-2xx statuses become `FetchError::Status` with the (truncated) body,
/// and bodies that are not valid JSON for `T` become `FetchError::Malformed`.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let body = get_text(client, url).await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::debug!("JSON decode failed for {}: {}", url, e);
        FetchError::Malformed(e.to_string())
    })
}

/// GET `url` and return the body text for 2xx responses.
pub async fn get_text(client: &Client, url: &str) -> Result<String, FetchError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(ReqwestErrorExt::into_fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        tracing::debug!("GET {} returned {}", url, status);
        return Err(FetchError::status(status.as_u16(), truncate(&text, 200)));
    }

    response
        .text()
        .await
        .map_err(ReqwestErrorExt::into_fetch_error)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Ping {
        ok: bool,
    }

    fn client() -> Client {
        build_client(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&mock_server)
            .await;

        let url = format!("{}/ping", mock_server.uri());
        let ping: Ping = get_json(&client(), &url).await.unwrap();
        assert!(ping.ok);
    }

    #[tokio::test]
    async fn test_get_json_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/ping", mock_server.uri());
        let result: Result<Ping, _> = get_json(&client(), &url).await;

        match result {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/ping", mock_server.uri());
        let result: Result<Ping, _> = get_json(&client(), &url).await;
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_classified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = build_client(Duration::from_millis(50)).unwrap();
        let url = format!("{}/slow", mock_server.uri());
        let result: Result<Ping, _> = get_json(&client, &url).await;
        assert!(matches!(result, Err(FetchError::Timeout)));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé…");
        assert_eq!(truncate("short", 10), "short");
    }
}
