#![forbid(unsafe_code)]

//! The enhancement collaborator boundary.
//!
//! An enhancer is an external, optional service that may rewrite node text
//! or structure before layout. The pipeline treats every enhancer failure —
//! transport, bad status, malformed body — as recoverable: it falls back to
//! the pre-enhancement node list and keeps going. Position fields never
//! cross this boundary; only ids, text, and levels do.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use skema_core::{SchemaNode, SchemaStyle};

/// Model selection forwarded to the enhancement service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".into(),
            model: "claude-3-sonnet".into(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// Request wire shape: the flat node list plus style and model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub nodes: Vec<SchemaNode>,
    pub schema_type: SchemaStyle,
    pub config: ModelConfig,
}

/// Response wire shape. A missing `enhancedNodes` field means the service
/// declined; callers keep the original nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub enhanced_nodes: Option<Vec<SchemaNode>>,
}

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("enhancement transport failed: {0}")]
    Transport(String),
    #[error("enhancement service returned status {0}")]
    Status(u16),
    #[error("malformed enhancement response: {0}")]
    Malformed(String),
}

/// The collaborator seam the pipeline calls through.
pub trait Enhancer {
    fn enhance(&self, request: &EnhanceRequest) -> Result<Vec<SchemaNode>, EnhanceError>;
}

/// Parse a raw response body, treating a declined enhancement as "keep the
/// originals".
pub fn parse_response(
    body: &str,
    originals: &[SchemaNode],
) -> Result<Vec<SchemaNode>, EnhanceError> {
    let response: EnhanceResponse =
        serde_json::from_str(body).map_err(|err| EnhanceError::Malformed(err.to_string()))?;
    Ok(response.enhanced_nodes.unwrap_or_else(|| originals.to_vec()))
}

/// Blocking HTTP enhancer with a hard request timeout.
#[cfg(feature = "http")]
pub struct HttpEnhancer {
    endpoint: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpEnhancer {
    pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

    pub fn new(endpoint: impl Into<String>) -> Result<Self, EnhanceError> {
        Self::with_timeout(endpoint, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, EnhanceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| EnhanceError::Transport(err.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[cfg(feature = "http")]
impl Enhancer for HttpEnhancer {
    fn enhance(&self, request: &EnhanceRequest) -> Result<Vec<SchemaNode>, EnhanceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|err| EnhanceError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnhanceError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|err| EnhanceError::Transport(err.to_string()))?;
        parse_response(&body, &request.nodes)
    }
}
