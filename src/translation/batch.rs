/*!
 * Batch translation processing.
 *
 * This module contains the batching and retry core of the translation
 * engine: texts are joined with a sentinel delimiter and sent as one
 * prompt; when the response does not split back into the same number of
 * parts, the batch is bisected and each half retried independently, down
 * to single-text batches that fall back to the original text.
 */

use futures::future::BoxFuture;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::language_utils::TargetLanguage;
use crate::providers::Provider;

/// Delimiter joining batch texts in a prompt.
///
/// Chosen to be extremely unlikely to occur in natural-language captions.
pub const DELIMITER: &str = "|||SEP|||";

/// Maximum number of texts per batch request.
///
/// Keeps a single request under the remote API's practical token limits
/// while minimizing request count.
pub const MAX_BATCH_SIZE: usize = 20;

/// Split texts into contiguous batches of at most `batch_size` entries.
///
/// Deterministic and order-preserving; the last batch may be smaller.
pub fn split_into_batches(texts: &[String], batch_size: usize) -> Vec<Vec<String>> {
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);

    texts
        .chunks(batch_size)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Build the instruction prompt for one batch
pub fn build_prompt(texts: &[String], language: TargetLanguage) -> String {
    format!(
        "Translate the following subtitles from their original language to {}. \
         Each subtitle segment is separated by {}. \
         Maintain the same number of segments in your response, separated by the same delimiter. \
         Only translate the content, don't add any explanations.\n\nSubtitles:\n{}",
        language.display_name(),
        DELIMITER,
        texts.join(DELIMITER)
    )
}

/// Translate one batch of texts, retrying by recursive bisection.
///
/// The result always has exactly `texts.len()` entries, even under total
/// API failure: a single text that persistently fails is passed through
/// unchanged rather than endlessly retried. Cancellation is cooperative
/// and checked before each attempt; a cancelled call returns the original
/// texts without touching the network.
pub fn translate_batch<'a>(
    provider: &'a dyn Provider,
    texts: &'a [String],
    language: TargetLanguage,
    cancellation: &'a CancellationToken,
) -> BoxFuture<'a, Vec<String>> {
    Box::pin(async move {
        if cancellation.is_cancelled() {
            return texts.to_vec();
        }

        // A multi-text batch whose members already contain the delimiter can
        // not round-trip through the joined prompt; send such texts alone.
        let collision = texts.len() > 1 && texts.iter().any(|text| text.contains(DELIMITER));

        if !collision {
            let prompt = build_prompt(texts, language);
            match provider.complete(&prompt).await {
                Ok(response) => {
                    let parts: Vec<String> = response
                        .split(DELIMITER)
                        .map(|part| part.trim().to_string())
                        .collect();

                    if parts.len() == texts.len() {
                        return parts;
                    }

                    debug!(
                        "Segment count mismatch for batch of {}: got {} parts",
                        texts.len(),
                        parts.len()
                    );
                }
                Err(e) => {
                    warn!("Translation request for batch of {} failed: {}", texts.len(), e);
                }
            }
        }

        if texts.len() <= 1 {
            // Base case: pass the untranslatable unit through unchanged
            return texts.to_vec();
        }

        let mid = texts.len() / 2;
        let mut left = translate_batch(provider, &texts[..mid], language, cancellation).await;
        let right = translate_batch(provider, &texts[mid..], language, cancellation).await;
        left.extend(right);
        left
    })
}
