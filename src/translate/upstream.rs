use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::error::GatewayError;

/// Raw reply of the translation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamPage {
    pub status: u16,
    pub body: String,
}

/// Anything that can GET a URL and hand back status and body text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<UpstreamPage, GatewayError>;
}

/// Build the mobile-page URL for one query.
///
/// `sl` and `tl` go in verbatim; `q` is percent-encoded with everything
/// outside the unreserved set escaped, so `&`, `=`, `+` and spaces survive.
pub fn build_upstream_url(base_url: &str, sl: &str, tl: &str, q: &str) -> String {
    format!(
        "{}?hl=en&sl={}&tl={}&q={}",
        base_url,
        sl,
        tl,
        urlencoding::encode(q)
    )
}

#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<UpstreamPage, GatewayError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(e.to_string()))?;

        debug!("Upstream replied {} with {} bytes", status, body.len());
        Ok(UpstreamPage { status, body })
    }
}
