/*!
 * Provider implementations for text-generation backends.
 *
 * This module contains client implementations for prompt-based LLM
 * providers used by the translation engine:
 * - Gemini: Google Gemini API integration
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all text-generation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing the translation engine to work against any backend,
/// including mocks in tests. Implementations are stateless per call and
/// safely reusable across requests without locking.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a prompt using this provider
    ///
    /// # Arguments
    /// * `prompt` - The full instruction prompt
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The generated text or a typed error.
    ///   A successful empty string is distinguishable from every failure.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod gemini;
