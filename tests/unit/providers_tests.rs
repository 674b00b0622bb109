/*!
 * Tests for provider request/response handling
 */

use serde_json::json;

use subgen::errors::ProviderError;
use subgen::providers::gemini::{Gemini, GeminiRequest, GeminiResponse, GenerationConfig};

/// Test request serialization matches the Gemini wire format
#[test]
fn test_gemini_request_serialization_withGenerationConfig_shouldUseCamelCase() {
    let request = GeminiRequest::new("Translate this").generation_config(GenerationConfig {
        temperature: Some(0.1),
        top_k: Some(1),
        top_p: Some(0.95),
        max_output_tokens: Some(8192),
    });

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["contents"][0]["parts"][0]["text"], "Translate this");
    assert_eq!(value["generationConfig"]["topK"], 1);
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 8192);

    // f32 parameters go through an f64 widening, compare approximately
    let temperature = value["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.1).abs() < 1e-6);
    let top_p = value["generationConfig"]["topP"].as_f64().unwrap();
    assert!((top_p - 0.95).abs() < 1e-6);
}

/// Test generation config is omitted when unset
#[test]
fn test_gemini_request_serialization_withoutGenerationConfig_shouldOmitField() {
    let request = GeminiRequest::new("Hello");
    let value = serde_json::to_value(&request).unwrap();

    assert!(value.get("generationConfig").is_none());
}

/// Test text extraction from a well-formed response
#[test]
fn test_extract_text_withWellFormedResponse_shouldReturnText() {
    let response: GeminiResponse = serde_json::from_value(json!({
        "candidates": [
            { "content": { "parts": [ { "text": "Xin chào" } ] } }
        ]
    }))
    .unwrap();

    assert_eq!(
        Gemini::extract_text_from_response(&response).as_deref(),
        Some("Xin chào")
    );
}

/// Test multi-part responses concatenate their text
#[test]
fn test_extract_text_withMultipleParts_shouldConcatenate() {
    let response: GeminiResponse = serde_json::from_value(json!({
        "candidates": [
            { "content": { "parts": [ { "text": "Xin " }, { "text": "chào" } ] } }
        ]
    }))
    .unwrap();

    assert_eq!(
        Gemini::extract_text_from_response(&response).as_deref(),
        Some("Xin chào")
    );
}

/// Test the expected-field-absent cases yield no text
#[test]
fn test_extract_text_withMissingPath_shouldReturnNone() {
    let no_candidates: GeminiResponse = serde_json::from_value(json!({})).unwrap();
    assert!(Gemini::extract_text_from_response(&no_candidates).is_none());

    let no_content: GeminiResponse =
        serde_json::from_value(json!({ "candidates": [ {} ] })).unwrap();
    assert!(Gemini::extract_text_from_response(&no_content).is_none());

    let no_parts: GeminiResponse =
        serde_json::from_value(json!({ "candidates": [ { "content": { "parts": [] } } ] }))
            .unwrap();
    assert!(Gemini::extract_text_from_response(&no_parts).is_none());
}

/// Test provider error display formats
#[test]
fn test_provider_error_display_shouldNameTheFailure() {
    let api = ProviderError::ApiError {
        status_code: 429,
        message: "quota exceeded".to_string(),
    };
    assert_eq!(api.to_string(), "API responded with error: 429 - quota exceeded");

    let missing = ProviderError::MissingField("candidates".to_string());
    assert_eq!(missing.to_string(), "Response is missing expected field: candidates");

    let parse = ProviderError::ParseError("bad json".to_string());
    assert!(parse.to_string().contains("bad json"));
}
