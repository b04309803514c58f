use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::GatewayError;
use crate::state::AppState;
use crate::translate::{self, interface::TranslationRequest, interface::TranslationResult};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/translate_a/single", get(translate_single))
        .route("/health", get(health_check))
}

/// Full application: routes, CORS and request tracing, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    create_routes()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn translate_single(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TranslationResult>, GatewayError> {
    let request = TranslationRequest::from_params(&params)?;
    let result = translate::translate(
        state.fetcher.as_ref(),
        &state.config.upstream.base_url,
        &request,
    )
    .await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::translate::upstream::{PageFetcher, UpstreamPage};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    const BONJOUR_PAGE: &str = r#"<html><body><div class="header">Google</div><div class="result-container">Bonjour</div></body></html>"#;

    /// Replies with a canned page and remembers every URL it was asked for.
    struct StubFetcher {
        reply: Result<UpstreamPage, String>,
        urls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn page(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(UpstreamPage {
                    status,
                    body: body.to_string(),
                }),
                urls: Mutex::new(Vec::new()),
            })
        }

        fn unreachable() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("connection refused".to_string()),
                urls: Mutex::new(Vec::new()),
            })
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<UpstreamPage, GatewayError> {
            self.urls.lock().unwrap().push(url.to_string());
            self.reply
                .clone()
                .map_err(GatewayError::UpstreamUnavailable)
        }
    }

    fn app(fetcher: Arc<StubFetcher>) -> Router {
        let mut config = Config::default();
        config.upstream.base_url = "http://upstream.test/m".to_string();
        build_app(AppState::with_fetcher(config, fetcher))
    }

    async fn get_raw(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_translate_success() {
        let fetcher = StubFetcher::page(200, BONJOUR_PAGE);
        let (status, content_type, body) =
            get_raw(app(fetcher.clone()), "/translate_a/single?q=hello&sl=en&tl=fr").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            body,
            r#"{"sentences":[{"trans":"Bonjour","orig":"hello","backend":10}],"src":"en","spell":{}}"#
        );
        assert_eq!(
            fetcher.urls(),
            vec!["http://upstream.test/m?hl=en&sl=en&tl=fr&q=hello".to_string()]
        );
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let fetcher = StubFetcher::page(503, "Service Unavailable");
        let (status, _, body) =
            get_raw(app(fetcher), "/translate_a/single?q=hello&sl=en&tl=fr").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Unable to fetch translation"}"#);
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_still_an_error() {
        let fetcher = StubFetcher::page(204, BONJOUR_PAGE);
        let (status, _, body) = get_raw(app(fetcher), "/translate_a/single?q=hello").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Unable to fetch translation"}"#);
    }

    #[tokio::test]
    async fn test_defaults_when_languages_omitted() {
        let fetcher = StubFetcher::page(200, BONJOUR_PAGE);
        let (status, _, body) = get_raw(app(fetcher.clone()), "/translate_a/single?q=hello").await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["src"], "en");
        assert_eq!(
            fetcher.urls(),
            vec!["http://upstream.test/m?hl=en&sl=en&tl=zh-CN&q=hello".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let fetcher = StubFetcher::page(200, BONJOUR_PAGE);
        let (status, _, body) =
            get_raw(app(fetcher.clone()), "/translate_a/single?sl=en&tl=fr").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Missing required parameter: q"}"#);
        assert!(fetcher.urls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_marker_is_reported() {
        let fetcher = StubFetcher::page(200, "<html><body>captcha</body></html>");
        let (status, _, body) = get_raw(app(fetcher), "/translate_a/single?q=hello").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Unable to parse translation"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let (status, _, body) =
            get_raw(app(StubFetcher::unreachable()), "/translate_a/single?q=hello").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, r#"{"error":"Unable to reach translation service"}"#);
    }

    #[tokio::test]
    async fn test_reserved_characters_are_reencoded() {
        let fetcher = StubFetcher::page(200, BONJOUR_PAGE);
        let (status, _, body) = get_raw(
            app(fetcher.clone()),
            "/translate_a/single?q=fish%20%26%20chips%3D&tl=fr",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sentences"][0]["orig"], "fish & chips=");
        assert_eq!(
            fetcher.urls(),
            vec!["http://upstream.test/m?hl=en&sl=en&tl=fr&q=fish%20%26%20chips%3D".to_string()]
        );
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let fetcher = StubFetcher::page(200, BONJOUR_PAGE);
        let router = app(fetcher.clone());
        let uri = "/translate_a/single?client=gtx&dj=1&dt=t&ie=UTF-8&q=hello&sl=en&tl=fr";

        let first = get_raw(router.clone(), uri).await;
        let second = get_raw(router, uri).await;

        assert_eq!(first, second);
        assert_eq!(fetcher.urls().len(), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) =
            get_raw(app(StubFetcher::page(200, "")), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }
}
