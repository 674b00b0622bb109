/*!
 * Integration tests for the translation job event surface
 *
 * A job emits zero or more Progress events followed by exactly one
 * terminal event; these tests drive whole jobs through the spawned-task
 * API and verify that contract.
 */

use std::sync::Arc;

use subgen::subtitle_processor::Segment;
use subgen::translation::{TranslationEngine, TranslationEvent};

use crate::common::make_segments;
use crate::common::mock_providers::MockProvider;

/// Drain a job's event stream into (progress values, terminal events)
async fn collect_events(
    mut events: tokio::sync::mpsc::UnboundedReceiver<TranslationEvent>,
) -> (Vec<u32>, Vec<TranslationEvent>) {
    let mut progress = Vec::new();
    let mut terminals = Vec::new();

    while let Some(event) = events.recv().await {
        match event {
            TranslationEvent::Progress { current, total } => {
                assert_eq!(total, 100);
                progress.push(current);
            }
            terminal => terminals.push(terminal),
        }
    }

    (progress, terminals)
}

/// Test a successful job emits progress then exactly one completion
#[tokio::test]
async fn test_spawn_job_withWorkingProvider_shouldEmitProgressThenCompletion() {
    let provider = Arc::new(MockProvider::working());
    let engine = TranslationEngine::new(provider);
    let segments = make_segments(&["Hello", "World"]);

    let events = engine.spawn_job(segments.clone(), "vietnamese");
    let (progress, terminals) = collect_events(events).await;

    assert!(!progress.is_empty());
    assert_eq!(*progress.last().unwrap(), 100);
    assert!(progress.windows(2).all(|pair| pair[0] <= pair[1]));

    assert_eq!(terminals.len(), 1);
    match &terminals[0] {
        TranslationEvent::Completed(translated) => {
            assert_eq!(translated.len(), segments.len());
            for (input, result) in segments.iter().zip(translated) {
                assert_eq!(result.start, input.start);
                assert_eq!(result.end, input.end);
            }
        }
        other => panic!("Expected completion, got {:?}", other),
    }
}

/// Test a validation failure emits exactly one Failed event and nothing else
#[tokio::test]
async fn test_spawn_job_withUnsupportedLanguage_shouldEmitSingleFailure() {
    let provider = Arc::new(MockProvider::working());
    let engine = TranslationEngine::new(provider.clone());
    let segments = make_segments(&["Hello"]);

    let events = engine.spawn_job(segments, "klingon");
    let (progress, terminals) = collect_events(events).await;

    assert!(progress.is_empty());
    assert_eq!(terminals.len(), 1);
    match &terminals[0] {
        TranslationEvent::Failed(message) => {
            assert!(message.contains("klingon"), "message was: {}", message);
        }
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(provider.request_count(), 0);
}

/// Test a cancelled engine still completes, with text unchanged
#[tokio::test]
async fn test_spawn_job_withCancelledEngine_shouldCompleteUnchanged() {
    let provider = Arc::new(MockProvider::working());
    let engine = TranslationEngine::new(provider.clone());
    engine.cancellation_token().cancel();

    let segments = vec![
        Segment::new(0.0, 1.0, "Hello"),
        Segment::new(1.0, 2.0, "(Music)"),
    ];

    let events = engine.spawn_job(segments.clone(), "english");
    let (_, terminals) = collect_events(events).await;

    assert_eq!(terminals.len(), 1);
    match &terminals[0] {
        TranslationEvent::Completed(translated) => {
            assert_eq!(translated.len(), 2);
            assert_eq!(translated[0].text, "Hello");
            assert_eq!(translated[1].text, "(Music)");
        }
        other => panic!("Expected completion, got {:?}", other),
    }
    assert_eq!(provider.request_count(), 0);
}

/// Test empty input surfaces the validation error through the event channel
#[tokio::test]
async fn test_spawn_job_withEmptyInput_shouldEmitSingleFailure() {
    let provider = Arc::new(MockProvider::working());
    let engine = TranslationEngine::new(provider);

    let events = engine.spawn_job(Vec::new(), "english");
    let (progress, terminals) = collect_events(events).await;

    assert!(progress.is_empty());
    assert_eq!(terminals.len(), 1);
    assert!(matches!(terminals[0], TranslationEvent::Failed(_)));
}
