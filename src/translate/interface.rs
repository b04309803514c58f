//! Request and response shapes of the `translate_a/single` API

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Backend id the real API reports for its primary translation engine.
pub const BACKEND_ID: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    // client, dj, dt and ie are accepted for compatibility and not forwarded.
    pub client: String,
    pub dj: String,
    pub dt: String,
    pub ie: String,
    pub q: String,
    pub sl: String,
    pub tl: String,
}

impl TranslationRequest {
    /// Build a request from raw query parameters, filling in defaults.
    ///
    /// `q` is the only required parameter; an empty `q` counts as missing.
    /// Language codes are taken verbatim.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, GatewayError> {
        let get = |key: &str, default: &str| {
            params
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        let q = params
            .get("q")
            .filter(|q| !q.is_empty())
            .cloned()
            .ok_or(GatewayError::MissingQuery)?;

        Ok(Self {
            client: get("client", "gtx"),
            dj: get("dj", "1"),
            dt: get("dt", "t"),
            ie: get("ie", "UTF-8"),
            q,
            sl: get("sl", "en"),
            tl: get("tl", "zh-CN"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub trans: String,
    pub orig: String,
    pub backend: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub sentences: Vec<Sentence>,
    pub src: String,
    pub spell: serde_json::Map<String, serde_json::Value>,
}

impl TranslationResult {
    pub fn new(trans: String, request: &TranslationRequest) -> Self {
        Self {
            sentences: vec![Sentence {
                trans,
                orig: request.q.clone(),
                backend: BACKEND_ID,
            }],
            src: request.sl.clone(),
            spell: serde_json::Map::new(),
        }
    }
}
