//! Logo retrieval from the logo-by-domain service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Source of company logos, keyed by domain.
///
/// `None` means the service has no logo for the domain. Network failures
/// and non-success statuses are treated the same way, so the caller skips
/// the one domain instead of aborting its batch.
#[async_trait]
pub trait LogoSource: Send + Sync {
    /// Fetch the raw logo image for a domain key.
    async fn fetch(&self, domain: &str) -> Option<Vec<u8>>;
}

/// HTTP client for a logo-by-domain service. The logo for `example.com`
/// lives at `{base_url}/example.com`.
pub struct LogoClient {
    client: Client,
    base_url: Url,
}

impl LogoClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid logo service URL {}: {}", base_url, e))?;
        // Url::join drops the last path segment unless the base ends with
        // a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl LogoSource for LogoClient {
    async fn fetch(&self, domain: &str) -> Option<Vec<u8>> {
        let endpoint = match self.base_url.join(domain) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build logo URL for domain {}: {}", domain, e);
                return None;
            }
        };

        tracing::info!("Fetching logo for domain: {}", domain);
        let response = match self.client.get(endpoint).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch logo for domain {}: {}", domain, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Failed to fetch logo for domain {}: HTTP {}",
                domain,
                response.status()
            );
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                tracing::warn!("Failed to read logo body for domain {}: {}", domain, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Start a one-off logo server on an ephemeral port, answering every
    /// request with `handler`. Returns the base URL.
    fn start_server<F>(handler: F) -> String
    where
        F: Fn(&str) -> tiny_http::Response<Cursor<Vec<u8>>> + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let base = format!("http://{}", server.server_addr());
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let response = handler(request.url());
                let _ = request.respond(response);
            }
        });
        base
    }

    #[tokio::test]
    async fn test_fetch_returns_logo_bytes() {
        let payload = b"png goes here".to_vec();
        let served = payload.clone();
        let base = start_server(move |url| {
            if url == "/www.acme.com" {
                tiny_http::Response::from_data(served.clone())
            } else {
                tiny_http::Response::from_data(b"wrong path".to_vec()).with_status_code(404)
            }
        });

        let client = LogoClient::new(&base, TIMEOUT, "logopress-test").unwrap();
        let bytes = client.fetch("www.acme.com").await;
        assert_eq!(bytes, Some(payload));
    }

    #[tokio::test]
    async fn test_fetch_missing_logo_is_none() {
        let base = start_server(|_| {
            tiny_http::Response::from_data(b"no such logo".to_vec()).with_status_code(404)
        });

        let client = LogoClient::new(&base, TIMEOUT, "logopress-test").unwrap();
        assert_eq!(client.fetch("www.unknown.example").await, None);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_service_is_none() {
        let client = LogoClient::new("http://127.0.0.1:1", TIMEOUT, "logopress-test").unwrap();
        assert_eq!(client.fetch("www.acme.com").await, None);
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_preserved() {
        let base = start_server(|url| {
            if url == "/logos/www.acme.com" {
                tiny_http::Response::from_data(b"logo".to_vec())
            } else {
                tiny_http::Response::from_data(Vec::new()).with_status_code(404)
            }
        });

        let client =
            LogoClient::new(&format!("{}/logos", base), TIMEOUT, "logopress-test").unwrap();
        assert!(client.fetch("www.acme.com").await.is_some());
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        assert!(LogoClient::new("not a url", TIMEOUT, "logopress-test").is_err());
    }
}
