/*!
 * # subgen - AI-powered subtitle generation and translation
 *
 * A Rust library for generating video subtitles with speech-to-text and
 * translating them with a prompt-based LLM API.
 *
 * ## Features
 *
 * - Extract audio tracks from video files with ffmpeg
 * - Transcribe audio through an OpenAI-compatible speech-to-text endpoint
 * - Translate caption segments in batches with bisection retry
 * - Preserve segment timing and count across translation
 * - Export subtitles to SubRip (.srt), WebVTT (.vtt) and JSON
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Segment store and subtitle export
 * - `translation`: Batch translation engine:
 *   - `translation::core`: Job orchestration and progress events
 *   - `translation::batch`: Batching and bisection retry
 *   - `translation::filter`: Placeholder filtering and reassembly
 * - `media_utils`: Audio extraction from video files
 * - `transcription`: Speech-to-text API client
 * - `language_utils`: Target language validation
 * - `providers`: Client implementations for text-generation backends:
 *   - `providers::gemini`: Google Gemini API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod media_utils;
pub mod providers;
pub mod subtitle_processor;
pub mod transcription;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TranslationError};
pub use language_utils::TargetLanguage;
pub use subtitle_processor::{Segment, SegmentCollection};
pub use translation::{TranslationEngine, TranslationEvent};
