pub mod extract;
pub mod interface;
pub mod upstream;

use tracing::{debug, warn};

use crate::error::GatewayError;
use extract::extract_translation;
use interface::{TranslationRequest, TranslationResult};
use upstream::{build_upstream_url, PageFetcher};

/// Fetch the translation page for `request` and scrape the result out of it.
pub async fn translate(
    fetcher: &dyn PageFetcher,
    base_url: &str,
    request: &TranslationRequest,
) -> Result<TranslationResult, GatewayError> {
    debug!(
        "Compatibility params: client={} dj={} dt={} ie={}",
        request.client, request.dj, request.dt, request.ie
    );

    let url = build_upstream_url(base_url, &request.sl, &request.tl, &request.q);
    debug!("Fetching {}", url);

    let page = fetcher.fetch(&url).await.map_err(|e| {
        warn!("Upstream request failed: {}", e);
        e
    })?;

    if page.status != 200 {
        warn!("Upstream returned status {}", page.status);
        return Err(GatewayError::UpstreamStatus(page.status));
    }

    let trans = extract_translation(&page.body).map_err(|e| {
        warn!("Could not scrape translation: {}", e);
        GatewayError::from(e)
    })?;

    debug!("Translated {:?} -> {:?}", request.q, trans);
    Ok(TranslationResult::new(trans, request))
}
