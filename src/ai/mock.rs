use async_trait::async_trait;

use super::adapter::{GenerationAdapter, GenerationMetadata, GenerationMode, GenerationResult};

const PLACEHOLDER_STORY: &str = "[Placeholder story] No generation credential is configured, so this stand-in text is returned instead of a generated story. The submitted parameters were accepted, validated, and formatted into a prompt; set OPENAI_API_KEY to receive real output.";

const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/1024x1024?text=placeholder+image";

/// Deterministic stand-in adapter used when no credential is configured and
/// `mock_on_missing_credential` is enabled. Always succeeds, with clearly
/// labeled placeholder output.
pub struct MockAdapter;

#[async_trait]
impl GenerationAdapter for MockAdapter {
    async fn generate(&self, prompt: &str, mode: GenerationMode) -> GenerationResult {
        let metadata = GenerationMetadata {
            model: "storyforge-mock".to_string(),
            tokens: None,
            prompt: Some(prompt.to_string()),
        };
        match mode {
            GenerationMode::Fiction => {
                GenerationResult::text(PLACEHOLDER_STORY.to_string(), metadata)
            }
            GenerationMode::Image => {
                GenerationResult::image(PLACEHOLDER_IMAGE_URL.to_string(), metadata)
            }
        }
    }
}
