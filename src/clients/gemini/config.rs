use crate::config::KeyFromEnv;

use super::models::GeminiModels;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini client. The API key is resolved from the
/// environment by `Default` but always lives in the config value, so tests
/// and callers can substitute their own.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl KeyFromEnv for GeminiConfig {
    const KEY_NAME: &'static str = "GEMINI_API_KEY";
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: Self::find_key().unwrap_or_default(),
            model: GeminiModels::FLASH_PREVIEW.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            max_output_tokens: 4096,
            temperature: 0.3,
        }
    }
}

impl GeminiConfig {
    #[must_use]
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at another host, e.g. a local stub during tests.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}
