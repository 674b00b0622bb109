/*!
 * Common test utilities shared between unit and integration tests
 */


use subgen::subtitle_processor::Segment;

/// Build a sequence of translatable segments with one-second spacing
pub fn make_segments(texts: &[&str]) -> Vec<Segment> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Segment::new(i as f64, (i + 1) as f64, *text))
        .collect()
}
