use crate::error::Result;
use crate::extract::extract_links;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Something that can turn a URL into the hrefs found on it.
///
/// Implementations must not fail: whatever goes wrong while fetching is
/// reported as a page without links.
#[async_trait]
pub trait LinkSource: Send + Sync {
    async fn fetch_links(&self, url: &str) -> Vec<String>;
}

/// Fetches pages over HTTP and extracts their anchors.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sitemapper/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .pool_max_idle_per_host(50) // Connection pooling
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its hrefs, or the first error on the way.
    ///
    /// The status code is deliberately not checked: an error page still has
    /// links worth following.
    pub async fn try_fetch_links(&self, url: &str) -> Result<Vec<String>> {
        let response = self.client.get(url).send().await?;
        let body = response.bytes().await?;
        let html = String::from_utf8(body.to_vec())?;

        Ok(extract_links(&html))
    }
}

#[async_trait]
impl LinkSource for HttpFetcher {
    async fn fetch_links(&self, url: &str) -> Vec<String> {
        debug!("Fetching {}", url);
        match self.try_fetch_links(url).await {
            Ok(links) => {
                debug!("{} links on {}", links.len(), url);
                links
            }
            Err(e) => {
                debug!("Fetch failed for {}: {}", url, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn test_fetch_links_from_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(
                        r#"<html><body><a href="/page1">1</a><a href="http://b.test">b</a></body></html>"#
                            .as_bytes(),
                    ),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let links = fetcher.fetch_links(&mock_server.uri()).await;

        assert_eq!(links, vec!["/page1", "http://b.test"]);
    }

    #[tokio::test]
    async fn test_error_status_still_parsed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_bytes(b"<a href=\"/home\">home</a>".as_slice()),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let links = fetcher
            .fetch_links(&format!("{}/missing", mock_server.uri()))
            .await;

        assert_eq!(links, vec!["/home"]);
    }

    #[tokio::test]
    async fn test_timeout_yields_no_links() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"<a href=\"/never\">never</a>".as_slice())
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_timeout(Duration::from_millis(200)).unwrap();
        let url = format!("{}/slow", mock_server.uri());

        assert!(matches!(
            fetcher.try_fetch_links(&url).await,
            Err(ScanError::HttpError(_))
        ));
        assert!(fetcher.fetch_links(&url).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_yields_no_links() {
        let mock_server = MockServer::start().await;

        let mut body = b"<a href=\"/page\">".to_vec();
        body.extend_from_slice(&[0xff, 0xfe, 0xfd]);

        Mock::given(method("GET"))
            .and(path("/binary"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = format!("{}/binary", mock_server.uri());

        assert!(matches!(
            fetcher.try_fetch_links(&url).await,
            Err(ScanError::DecodeError(_))
        ));
        assert!(fetcher.fetch_links(&url).await.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_yields_no_links() {
        let fetcher = HttpFetcher::new().unwrap();
        // Port 9 (discard) is not expected to be listening on the test host
        let links = fetcher.fetch_links("http://127.0.0.1:9/").await;
        assert!(links.is_empty());
    }
}
