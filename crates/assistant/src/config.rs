//! Chat backend configuration.

/// Default API base (OpenAI).
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default chat model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: String,
    /// Base URL without a trailing slash, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub model: String,
}

impl ChatConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `LLM_API_KEY` is not set; the chat endpoint then
    /// answers with an error.
    ///
    /// | Variable       | Required | Default                      |
    /// |----------------|----------|------------------------------|
    /// | `LLM_API_KEY`  | yes      | none                         |
    /// | `LLM_API_BASE` | no       | `https://api.openai.com/v1`  |
    /// | `LLM_MODEL`    | no       | `gpt-4o-mini`                |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty())?;
        Some(Self {
            api_key,
            api_base: std::env::var("LLM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}
