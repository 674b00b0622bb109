use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language for translation (name or ISO code)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation backend config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Speech-to-text backend config
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for the translation backend
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    // @field: Model name
    #[serde(default = "default_translation_model")]
    pub model: String,

    // @field: Max segments per batch request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Top k tokens to consider
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    // @field: Top probability mass (nucleus sampling)
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    // @field: Max tokens to generate per request
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    // @field: Timeout seconds per request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        TranslationConfig {
            api_key: String::new(),
            endpoint: default_translation_endpoint(),
            model: default_translation_model(),
            batch_size: default_batch_size(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration for the speech-to-text backend
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_transcription_endpoint")]
    pub endpoint: String,

    // @field: Model name
    #[serde(default = "default_transcription_model")]
    pub model: String,

    // @field: Spoken language hint, empty for auto-detect
    #[serde(default = "String::new")]
    pub language: String,

    // @field: Timeout seconds per request
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        TranscriptionConfig {
            api_key: String::new(),
            endpoint: default_transcription_endpoint(),
            model: default_transcription_model(),
            language: String::new(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

fn default_target_language() -> String {
    "vietnamese".to_string()
}

fn default_translation_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_translation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_batch_size() -> usize {
    20
}

fn default_temperature() -> f32 {
    0.1
}

fn default_top_k() -> u32 {
    1
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_transcription_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_transcription_timeout_secs() -> u64 {
    3600
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            transcription: TranscriptionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_endpoint(&self.translation.endpoint)
            .map_err(|e| anyhow!("Invalid translation endpoint: {}", e))?;
        validate_endpoint(&self.transcription.endpoint)
            .map_err(|e| anyhow!("Invalid transcription endpoint: {}", e))?;

        if self.translation.batch_size == 0 {
            return Err(anyhow!("Translation batch size must be greater than zero"));
        }

        if self.translation.model.trim().is_empty() {
            return Err(anyhow!("Translation model must not be empty"));
        }

        Ok(())
    }
}

/// Check that an endpoint string parses as an HTTP(S) URL
fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url = Url::parse(endpoint).map_err(|e| anyhow!("{}: {}", endpoint, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("Endpoint must use http or https: {}", endpoint));
    }

    if url.host_str().is_none() {
        return Err(anyhow!("Invalid host in endpoint: {}", endpoint));
    }

    Ok(())
}
