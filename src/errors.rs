/*!
 * Error types for the subgen application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a text-generation API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when the expected generated-text field is absent from the response
    #[error("Response is missing expected field: {0}")]
    MissingField(String),
}

/// Errors that can occur during translation
///
/// Transport and count-mismatch failures are absorbed by the batch
/// translator's bisection fallback and never appear here; only input
/// validation and final integrity failures reach the caller.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Target language is not in the supported set
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),

    /// The input segment sequence was empty
    #[error("No segments to translate")]
    NoSegments,

    /// Final reconstructed sequence length differs from the input length
    #[error("Translation failed: segment count mismatch (expected {expected}, got {actual})")]
    CountMismatch {
        /// Number of input segments
        expected: usize,
        /// Number of reconstructed segments
        actual: usize,
    },

    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from audio extraction or speech-to-text
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
