use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::adapter::{GenerationAdapter, GenerationMetadata, GenerationMode, GenerationResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const FICTION_SYSTEM_PROMPT: &str = "You are a speculative fiction generator that creates compelling, imaginative stories based on the parameters provided by the user.";

pub struct OpenAiAdapter {
    client: Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl OpenAiAdapter {
    pub fn new(
        api_key: String,
        text_model: String,
        image_model: String,
        base_url: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            text_model,
            image_model,
        }
    }

    fn chat_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn image_endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }

    async fn complete(&self, prompt: &str) -> Result<GenerationResult, AppError> {
        let body = ChatRequest {
            model: &self.text_model,
            messages: vec![
                ChatRequestMessage {
                    role: "system",
                    content: FICTION_SYSTEM_PROMPT,
                },
                ChatRequestMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(self.chat_endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "could not read body".into());
            return Err(AppError::Upstream(format!(
                "OpenAI API error ({}): {}",
                status, text
            )));
        }

        let resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse response: {}", e)))?;

        let content = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::Upstream("OpenAI response contained no message content".to_string())
            })?;

        let metadata = GenerationMetadata {
            model: resp.model.unwrap_or_else(|| self.text_model.clone()),
            tokens: resp.usage.map(|u| u.total_tokens),
            prompt: None,
        };
        Ok(GenerationResult::text(content, metadata))
    }

    async fn create_image(&self, prompt: &str) -> Result<GenerationResult, AppError> {
        let body = ImageRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size: "1024x1024",
            quality: "standard",
            response_format: "url",
        };

        let response = self
            .client
            .post(self.image_endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "could not read body".into());
            return Err(AppError::Upstream(format!(
                "OpenAI API error ({}): {}",
                status, text
            )));
        }

        let resp: ImageResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse response: {}", e)))?;

        let url = resp
            .data
            .into_iter()
            .next()
            .and_then(|datum| datum.url)
            .ok_or_else(|| {
                AppError::Upstream("OpenAI response contained no image URL".to_string())
            })?;

        let metadata = GenerationMetadata {
            model: self.image_model.clone(),
            tokens: None,
            prompt: Some(prompt.to_string()),
        };
        Ok(GenerationResult::image(url, metadata))
    }
}

// --- Request / Response types for the OpenAI API ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatRequestMessage<'a>>,
}

#[derive(Serialize)]
struct ChatRequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'static str,
    quality: &'static str,
    response_format: &'static str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: Option<String>,
}

#[async_trait]
impl GenerationAdapter for OpenAiAdapter {
    async fn generate(&self, prompt: &str, mode: GenerationMode) -> GenerationResult {
        let outcome = match mode {
            GenerationMode::Fiction => self.complete(prompt).await,
            GenerationMode::Image => self.create_image(prompt).await,
        };
        match outcome {
            Ok(result) => result,
            Err(error) => {
                tracing::error!(mode = mode.as_str(), error = %error, "OpenAI call failed");
                GenerationResult::failure(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_build_from_the_configured_base_url() {
        let adapter = OpenAiAdapter::new(
            "sk-test".to_string(),
            "gpt-3.5-turbo".to_string(),
            "dall-e-3".to_string(),
            None,
        );
        assert_eq!(
            adapter.chat_endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );

        let adapter = OpenAiAdapter::new(
            "sk-test".to_string(),
            "gpt-3.5-turbo".to_string(),
            "dall-e-3".to_string(),
            Some("http://localhost:8080/v1".to_string()),
        );
        assert_eq!(
            adapter.image_endpoint(),
            "http://localhost:8080/v1/images/generations"
        );
    }
}
