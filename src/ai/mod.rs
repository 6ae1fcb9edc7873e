pub mod adapter;
pub mod mock;
pub mod openai;

pub use adapter::{GenerationAdapter, GenerationMetadata, GenerationMode, GenerationResult};

use crate::config::AppConfig;
use crate::error::AppError;

use mock::MockAdapter;
use openai::OpenAiAdapter;

/// Build the generation adapter for the current configuration. Without a
/// credential the choice between failing fast and serving placeholders is
/// the explicit `mock_on_missing_credential` flag, never an inferred one.
pub fn create_adapter(config: &AppConfig) -> Result<Box<dyn GenerationAdapter>, AppError> {
    match config.openai_api_key.as_deref() {
        Some(key) if !key.is_empty() => Ok(Box::new(OpenAiAdapter::new(
            key.to_string(),
            config.text_model.clone(),
            config.image_model.clone(),
            config.openai_base_url.clone(),
        ))),
        _ if config.mock_on_missing_credential => {
            tracing::warn!("OPENAI_API_KEY not set; serving placeholder generations");
            Ok(Box::new(MockAdapter))
        }
        _ => Err(AppError::Config(
            "OPENAI_API_KEY is not set (enable mock_on_missing_credential to serve placeholders)"
                .to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_without_the_flag_is_a_config_error() {
        let config = AppConfig::default();
        assert!(matches!(create_adapter(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn missing_credential_with_the_flag_serves_the_mock() {
        let config = AppConfig {
            mock_on_missing_credential: true,
            ..AppConfig::default()
        };
        assert!(create_adapter(&config).is_ok());
    }

    #[test]
    fn configured_credential_selects_the_real_adapter() {
        let config = AppConfig {
            openai_api_key: Some("sk-test".to_string()),
            ..AppConfig::default()
        };
        assert!(create_adapter(&config).is_ok());
    }
}
