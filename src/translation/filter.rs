/*!
 * Segment filtering and reassembly.
 *
 * Partitions a segment sequence into texts that need translation and
 * placeholders that pass through untouched, keeping enough information to
 * rebuild the full original-length sequence afterwards.
 */

use crate::subtitle_processor::Segment;

/// Partition of a segment sequence into translatable and pass-through parts.
///
/// Position is the correlation key: `mask[i]` records whether `segments[i]`
/// needs translation, and `texts` holds the translatable texts in original
/// relative order. `reassemble` splices translated texts back into their
/// original positions.
#[derive(Debug)]
pub struct SegmentPartition {
    /// Texts requiring translation, in original relative order
    texts: Vec<String>,

    /// Per-position flag: true when the segment at that index is translatable
    mask: Vec<bool>,
}

impl SegmentPartition {
    /// Partition a segment sequence
    pub fn split(segments: &[Segment]) -> Self {
        let mut texts = Vec::new();
        let mut mask = Vec::with_capacity(segments.len());

        for segment in segments {
            if segment.is_placeholder() {
                mask.push(false);
            } else {
                texts.push(segment.text.trim().to_string());
                mask.push(true);
            }
        }

        SegmentPartition { texts, mask }
    }

    /// Texts requiring translation
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Whether nothing needs translation
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Rebuild the full-length segment sequence.
    ///
    /// Translated texts are consumed in order and spliced (trimmed) into
    /// translatable positions; placeholder segments are copied verbatim. If
    /// the translated list runs short the original text is kept, so the
    /// output always has exactly `originals.len()` segments with original
    /// timing.
    pub fn reassemble(&self, originals: &[Segment], translated: &[String]) -> Vec<Segment> {
        let mut output = Vec::with_capacity(originals.len());
        let mut next_translated = 0;

        for (segment, translatable) in originals.iter().zip(&self.mask) {
            if *translatable {
                let text = match translated.get(next_translated) {
                    Some(text) => text.trim().to_string(),
                    None => segment.text.trim().to_string(),
                };
                next_translated += 1;
                output.push(Segment::new(segment.start, segment.end, text));
            } else {
                output.push(segment.clone());
            }
        }

        output
    }
}
