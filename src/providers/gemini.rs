use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Gemini client for interacting with the Google Gemini API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Model identifier
    model: String,
    /// Generation parameters applied to every request
    generation_config: GenerationConfig,
}

/// Gemini content generation request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// The conversation contents
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// A single content block in a Gemini request or response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// The parts making up the content
    pub parts: Vec<GeminiPart>,
}

/// A single part of a content block
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text payload
    pub text: String,
}

/// Generation parameters for a Gemini request
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Top k tokens to consider
    #[serde(rename = "topK", skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Top probability mass to consider (nucleus sampling)
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: Some(0.1),
            top_k: Some(1),
            top_p: Some(0.95),
            max_output_tokens: Some(8192),
        }
    }
}

/// Gemini response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// Individual candidate in a Gemini response
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// The content of the candidate
    pub content: Option<GeminiContent>,
}

impl GeminiRequest {
    /// Create a new request from a prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
            generation_config: None,
        }
    }

    /// Set the generation parameters
    pub fn generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

impl Gemini {
    /// Create a new Gemini client from the translation configuration
    pub fn new(config: &TranslationConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            generation_config: GenerationConfig {
                temperature: Some(config.temperature),
                top_k: Some(config.top_k),
                top_p: Some(config.top_p),
                max_output_tokens: Some(config.max_output_tokens),
            },
        }
    }

    /// Complete a content generation request
    pub async fn complete_request(
        &self,
        request: GeminiRequest,
    ) -> Result<GeminiResponse, ProviderError> {
        let api_url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        );

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Gemini API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Invalid Gemini API response: {}", e)))
    }

    /// Extract generated text from a Gemini response
    ///
    /// Returns None when the candidates/content/parts path is absent.
    pub fn extract_text_from_response(response: &GeminiResponse) -> Option<String> {
        let candidate = response.candidates.first()?;
        let content = candidate.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }

        Some(
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<String>(),
        )
    }
}

#[async_trait]
impl Provider for Gemini {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request =
            GeminiRequest::new(prompt).generation_config(self.generation_config.clone());
        let response = self.complete_request(request).await?;

        Gemini::extract_text_from_response(&response)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                ProviderError::MissingField("candidates[0].content.parts[0].text".to_string())
            })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new("Hello");
        self.complete_request(request).await?;
        Ok(())
    }
}
