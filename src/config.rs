use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub openai_base_url: Option<String>,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default)]
    pub mock_on_missing_credential: bool,
}

fn default_port() -> u16 {
    3001
}

fn default_text_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_path: None,
            openai_api_key: None,
            openai_base_url: None,
            text_model: default_text_model(),
            image_model: default_image_model(),
            mock_on_missing_credential: false,
        }
    }
}

impl AppConfig {
    /// Get the path to the config file in the platform config dir
    pub fn config_path() -> Result<PathBuf, AppError> {
        let dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Cannot find config directory".into()))?;
        Ok(dir.join("storyforge").join("config.json"))
    }

    /// Load config from disk (or defaults if not found), then apply
    /// environment overrides.
    pub fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents).map_err(|e| AppError::Config(e.to_string()))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!(%port, "ignoring unparseable PORT"),
            }
        }
        if let Ok(path) = std::env::var("STORYFORGE_DATABASE_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.openai_api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            self.openai_base_url = Some(url);
        }
        if let Ok(model) = std::env::var("STORYFORGE_TEXT_MODEL") {
            self.text_model = model;
        }
        if let Ok(model) = std::env::var("STORYFORGE_IMAGE_MODEL") {
            self.image_model = model;
        }
        if let Ok(flag) = std::env::var("STORYFORGE_MOCK_ON_MISSING_CREDENTIAL") {
            self.mock_on_missing_credential = matches!(flag.as_str(), "1" | "true" | "yes");
        }
    }

    pub fn database_file(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("data").join("database.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_contract() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.text_model, "gpt-3.5-turbo");
        assert_eq!(config.image_model, "dall-e-3");
        assert!(!config.mock_on_missing_credential);
        assert_eq!(config.database_file(), PathBuf::from("data").join("database.json"));
    }

    #[test]
    fn partial_config_files_fill_in_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "port": 8080, "mock_on_missing_credential": true }"#)
                .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.mock_on_missing_credential);
        assert_eq!(config.text_model, "gpt-3.5-turbo");
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn explicit_database_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/tmp/other.json")),
            ..AppConfig::default()
        };
        assert_eq!(config.database_file(), PathBuf::from("/tmp/other.json"));
    }
}
