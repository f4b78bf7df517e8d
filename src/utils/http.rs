use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{MonitorError, Result};

pub fn default_user_agent() -> String {
    format!("vuln-monitor/{}", env!("CARGO_PKG_VERSION"))
}

pub fn create_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .user_agent(user_agent)
        .timeout(timeout)
        .pool_max_idle_per_host(2)
        .build()
        .map_err(|e| MonitorError::Config(format!("failed to build HTTP client: {e}")))
}

/// Single GET, no retries; anything but a 2xx status is a fetch failure.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let fetch_error = |reason: String| MonitorError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        return Err(fetch_error(format!("unexpected status code: {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| fetch_error(format!("failed to read response body: {e}")))?;

    debug!(url, bytes = body.len(), "Fetched page");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        create_client("vuln-monitor-test", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lists/oss-security/2024/05/01/"))
            .and(header("user-agent", "vuln-monitor-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/lists/oss-security/2024/05/01/", server.uri());
        let body = assert_ok!(fetch_page(&client(), &url).await);
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetch_page(&client(), &server.uri()).await.unwrap_err();
        match err {
            MonitorError::Fetch { reason, .. } => assert!(reason.contains("404")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let err = fetch_page(&client(), "http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, MonitorError::Fetch { .. }));
    }
}
