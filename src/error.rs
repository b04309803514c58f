use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Opening/closing marker pair could not be located in the upstream page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("opening marker {0:?} not found")]
    OpenMarkerNotFound(String),
    #[error("closing marker {0:?} not found after opening marker")]
    CloseMarkerNotFound(String),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing required parameter: q")]
    MissingQuery,

    #[error("translation service unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("translation service returned status {0}")]
    UpstreamStatus(u16),

    #[error("failed to extract translation: {0}")]
    Extraction(#[from] ExtractionError),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingQuery => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamStatus(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the caller. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::MissingQuery => self.to_string(),
            GatewayError::UpstreamUnavailable(_) => {
                "Unable to reach translation service".to_string()
            }
            GatewayError::UpstreamStatus(_) => "Unable to fetch translation".to_string(),
            GatewayError::Extraction(_) => "Unable to parse translation".to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.public_message() });

        (status, Json(body)).into_response()
    }
}
