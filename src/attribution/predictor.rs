//! Predictor seam for per-chunk quotation attribution.
//!
//! External predictors (LLM-backed, dataset-backed) implement
//! [`SegmentPredictor`]; the engine only consumes the resulting segment
//! sequences. The word-group predictor is the deterministic stand-in used
//! for tests and dry runs.

use crate::error::Result;
use crate::segment::{Segment, SegmentKind, SegmentSequence};

/// Turns one chunk of text into an attributed segment sequence.
pub trait SegmentPredictor: Send + Sync {
    /// Predict the segment sequence for a chunk of text.
    fn predict(&self, text: &str) -> Result<SegmentSequence>;

    /// Name of this predictor for progress reporting.
    fn name(&self) -> &str;
}

/// Deterministic predictor that groups words into fixed-size segments,
/// alternating narration and quotation, and attributes every quote to a
/// single configured speaker.
///
/// Useful as a pipeline stand-in when no real predictor is available.
pub struct WordGroupPredictor {
    words_per_group: usize,
    speaker_id: Option<String>,
}

impl WordGroupPredictor {
    pub fn new(words_per_group: usize, speaker_id: Option<String>) -> Self {
        Self {
            words_per_group: words_per_group.max(1),
            speaker_id,
        }
    }
}

impl SegmentPredictor for WordGroupPredictor {
    fn predict(&self, text: &str) -> Result<SegmentSequence> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut segments = Vec::new();

        for (group_index, group) in words.chunks(self.words_per_group).enumerate() {
            let mut group_text = group.join(" ");
            if (group_index + 1) * self.words_per_group < words.len() {
                group_text.push(' ');
            }
            let segment = if group_index % 2 == 0 {
                Segment::other(0, group_text)
            } else {
                Segment::quote(0, group_text, self.speaker_id.clone())
            };
            segments.push(segment);
        }

        SegmentSequence::renumbered(segments)
    }

    fn name(&self) -> &str {
        "word_group"
    }
}
