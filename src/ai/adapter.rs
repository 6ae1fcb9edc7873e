use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// What the caller asked the upstream API to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Fiction,
    Image,
}

impl Default for GenerationMode {
    fn default() -> Self {
        Self::Fiction
    }
}

impl GenerationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "fiction",
            Self::Image => "image",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "fiction" => Ok(Self::Fiction),
            "image" => Ok(Self::Image),
            other => Err(AppError::BadRequest(format!(
                "Invalid generation type: \"{}\". Valid types are \"fiction\" and \"image\".",
                other
            ))),
        }
    }
}

/// Provenance reported alongside a successful generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Uniform outcome of one upstream call, in the shape the API returns to
/// clients: `{success, content|imageUrl, metadata}` or `{success, error}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerationMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn text(content: String, metadata: GenerationMetadata) -> Self {
        Self {
            success: true,
            content: Some(content),
            image_url: None,
            metadata: Some(metadata),
            error: None,
        }
    }

    pub fn image(url: String, metadata: GenerationMetadata) -> Self {
        Self {
            success: true,
            content: None,
            image_url: Some(url),
            metadata: Some(metadata),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            image_url: None,
            metadata: None,
            error: Some(error.into()),
        }
    }
}

/// Boundary to the external generative API. `generate` never surfaces a
/// transport error; failures come back as a `failure` result.
#[async_trait]
pub trait GenerationAdapter: Send + Sync {
    async fn generate(&self, prompt: &str, mode: GenerationMode) -> GenerationResult;
}
