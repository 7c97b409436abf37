// reqwest-backed PageFetcher

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::errors::ScrapeError;
use super::models::NetworkConfig;
use super::traits::PageFetcher;

/// Full desktop browser identity, for pages that serve bots a stub
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Build a client honouring the proxy and timeout in `network`
    pub fn new(network: &NetworkConfig, user_agent: &str) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(network.timeout_secs()))
            .connect_timeout(Duration::from_secs(15));

        if let Some(proxy_url) = network.proxy.as_deref() {
            match reqwest::Proxy::all(proxy_url) {
                Ok(proxy) => {
                    debug!(proxy = proxy_url, "using proxy for HTTP requests");
                    builder = builder.proxy(proxy);
                }
                Err(e) => {
                    warn!("invalid proxy URL {}: {}, connecting directly", proxy_url, e);
                }
            }
        }

        let client = builder
            .build()
            .map_err(|e| ScrapeError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<String, ScrapeError> {
        let status = response.status();
        let url = response.url().to_string();
        if !status.is_success() {
            debug!(status = status.as_u16(), url = %url, "non-success HTTP status");
            return Err(ScrapeError::Http {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn get_text(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, ScrapeError> {
        debug!(url, "GET");
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        Self::read(request.send().await?).await
    }

    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, ScrapeError> {
        debug!(url, "POST");
        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        Self::read(request.body(body.to_string()).send().await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_and_without_proxy() {
        assert!(HttpPageFetcher::new(&NetworkConfig::default(), BROWSER_USER_AGENT).is_ok());
        let network = NetworkConfig {
            proxy: Some("socks5h://127.0.0.1:1080".to_string()),
            timeout: Some(5),
        };
        assert!(HttpPageFetcher::new(&network, "Mozilla/5.0").is_ok());
    }
}
