/*!
 * Translation job orchestration.
 *
 * This module contains the TranslationEngine, which drives a whole
 * translation job end to end: validate the target language, filter out
 * placeholder segments, translate batches strictly in order, reassemble
 * the full-length sequence and report progress along the way.
 */

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::errors::TranslationError;
use crate::language_utils::TargetLanguage;
use crate::providers::Provider;
use crate::subtitle_processor::Segment;

use super::batch::{MAX_BATCH_SIZE, split_into_batches, translate_batch};
use super::filter::SegmentPartition;

/// Notification emitted by a running translation job.
///
/// A job emits zero or more `Progress` events followed by exactly one
/// terminal event, either `Completed` or `Failed`, never both.
#[derive(Debug)]
pub enum TranslationEvent {
    /// Progress update, both values in a 0-100 normalized range
    Progress {
        /// Completed share of the job
        current: u32,
        /// Always 100
        total: u32,
    },

    /// Terminal: the full translated sequence, same length and order as the input
    Completed(Vec<Segment>),

    /// Terminal: human-readable failure message
    Failed(String),
}

/// Batch translation engine.
///
/// Holds the provider, the batch-size ceiling and a cancellation token.
/// Cancellation is advisory: it is checked at batch-attempt boundaries
/// only, so an in-flight request is never interrupted, and remaining
/// batches fall through with their text unchanged.
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    /// Text-generation backend
    provider: Arc<dyn Provider>,

    /// Maximum number of texts per batch request
    batch_size: usize,

    /// Cooperative cancellation flag, shared with callers
    cancellation: CancellationToken,
}

impl TranslationEngine {
    /// Create a new engine with the default batch size
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self::with_batch_size(provider, MAX_BATCH_SIZE)
    }

    /// Create a new engine with a custom batch-size ceiling
    pub fn with_batch_size(provider: Arc<dyn Provider>, batch_size: usize) -> Self {
        TranslationEngine {
            provider,
            batch_size: batch_size.clamp(1, MAX_BATCH_SIZE),
            cancellation: CancellationToken::new(),
        }
    }

    /// Handle for cancelling this engine's jobs.
    ///
    /// The token is owned by the engine and cloned out to callers; calling
    /// `cancel()` on it makes running jobs complete quickly with their
    /// remaining text unchanged.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Translate a segment sequence into the target language.
    ///
    /// The output always has exactly the same length and timing as the
    /// input; only text differs, and placeholder segments pass through
    /// verbatim. `progress` is invoked with `(percent, 100)` pairs, first
    /// with 0, last with 100.
    pub async fn translate_segments(
        &self,
        segments: &[Segment],
        target_language: &str,
        progress: impl Fn(u32, u32) + Send,
    ) -> Result<Vec<Segment>, TranslationError> {
        let language = TargetLanguage::parse(target_language)
            .map_err(|_| TranslationError::UnsupportedLanguage(target_language.to_string()))?;

        if segments.is_empty() {
            return Err(TranslationError::NoSegments);
        }

        progress(0, 100);

        let partition = SegmentPartition::split(segments);
        if partition.is_empty() {
            debug!("No translatable segments, returning input unchanged");
            progress(100, 100);
            return Ok(segments.to_vec());
        }

        let batches = split_into_batches(partition.texts(), self.batch_size);
        let total_batches = batches.len();
        info!(
            "Translating {} segments to {} in {} batches",
            partition.texts().len(),
            language,
            total_batches
        );

        let mut translated_texts = Vec::with_capacity(partition.texts().len());
        for (batch_index, batch) in batches.iter().enumerate() {
            progress((batch_index * 100 / total_batches) as u32, 100);

            let translated =
                translate_batch(self.provider.as_ref(), batch, language, &self.cancellation).await;
            translated_texts.extend(translated);
        }

        // The batcher and batch translator guarantee this length already;
        // pad or truncate rather than propagate a mismatch forward.
        let expected = partition.texts().len();
        if translated_texts.len() < expected {
            warn!(
                "Translated text count {} short of {}, padding with original text",
                translated_texts.len(),
                expected
            );
            for index in translated_texts.len()..expected {
                translated_texts.push(partition.texts()[index].clone());
            }
        } else if translated_texts.len() > expected {
            warn!(
                "Translated text count {} exceeds {}, truncating",
                translated_texts.len(),
                expected
            );
            translated_texts.truncate(expected);
        }

        let output = partition.reassemble(segments, &translated_texts);

        if output.len() != segments.len() {
            return Err(TranslationError::CountMismatch {
                expected: segments.len(),
                actual: output.len(),
            });
        }

        progress(100, 100);
        Ok(output)
    }

    /// Run a translation job on a dedicated task.
    ///
    /// Returns a receiver of job notifications: zero or more
    /// `Progress` events, then exactly one of `Completed` or `Failed`.
    pub fn spawn_job(
        &self,
        segments: Vec<Segment>,
        target_language: impl Into<String>,
    ) -> mpsc::UnboundedReceiver<TranslationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = self.clone();
        let target_language = target_language.into();

        tokio::spawn(async move {
            let progress_tx = tx.clone();
            let result = engine
                .translate_segments(&segments, &target_language, move |current, total| {
                    let _ = progress_tx.send(TranslationEvent::Progress { current, total });
                })
                .await;

            let terminal = match result {
                Ok(translated) => TranslationEvent::Completed(translated),
                Err(e) => TranslationEvent::Failed(e.to_string()),
            };
            let _ = tx.send(terminal);
        });

        rx
    }
}
