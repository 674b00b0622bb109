/*!
 * Batch translation engine.
 *
 * This module turns an ordered sequence of caption segments into a
 * same-length sequence of translated segments by calling a prompt-based
 * text-generation API:
 * - `core`: Job orchestration, progress events and cancellation
 * - `batch`: Batching and recursive bisection retry
 * - `filter`: Placeholder filtering and order-preserving reassembly
 */

// Re-export main types for easier usage
pub use self::core::{TranslationEngine, TranslationEvent};
pub use self::filter::SegmentPartition;

// Submodules
pub mod batch;
pub mod core;
pub mod filter;
