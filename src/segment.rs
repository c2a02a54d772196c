//! Segment model: typed spans of narration and attributed quotation.
//!
//! A document is represented as an ordered sequence of segments whose
//! concatenated texts reconstruct exactly one flat string. Segment ids are
//! assigned sequentially starting at 1 in sequence order.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteweaveError, Result};

/// Kind of a text segment: plain narration or quoted speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Other,
    Quote,
}

/// One contiguous span of text, optionally attributed to a speaking character.
///
/// `speaker_id` is only meaningful for `Quote` segments; narration never
/// carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Unique id within the owning sequence, 1-based and sequential.
    pub id: u32,
    /// The exact text of the segment, including all whitespace.
    pub text: String,
    pub kind: SegmentKind,
    /// Identifier of the character who spoke this quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_id: Option<String>,
}

impl Segment {
    /// Create a narration segment.
    pub fn other(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            kind: SegmentKind::Other,
            speaker_id: None,
        }
    }

    /// Create a quote segment attributed to `speaker_id`.
    pub fn quote(id: u32, text: impl Into<String>, speaker_id: Option<String>) -> Self {
        Self {
            id,
            text: text.into(),
            kind: SegmentKind::Quote,
            speaker_id,
        }
    }

    /// Number of characters (not bytes) in the segment text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the text is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered list of segments forming one flat document.
///
/// Constructors validate the sequence invariants: ids are sequential from 1,
/// and only quote segments carry a speaker. The flat text of the sequence is
/// always the concatenation of the segment texts in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct SegmentSequence {
    segments: Vec<Segment>,
}

impl SegmentSequence {
    /// Build a sequence from already-numbered segments, validating invariants.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        let sequence = Self { segments };
        sequence.validate()?;
        Ok(sequence)
    }

    /// Build a sequence by assigning fresh sequential ids starting at 1.
    pub fn renumbered(mut segments: Vec<Segment>) -> Result<Self> {
        for (i, segment) in segments.iter_mut().enumerate() {
            segment.id = i as u32 + 1;
        }
        Self::new(segments)
    }

    /// Internal constructor for segments whose invariants are held by
    /// construction (merge, clip and normalization passes).
    pub(crate) fn from_renumbered_unchecked(mut segments: Vec<Segment>) -> Self {
        for (i, segment) in segments.iter_mut().enumerate() {
            segment.id = i as u32 + 1;
        }
        let sequence = Self { segments };
        debug_assert!(sequence.validate().is_ok());
        sequence
    }

    /// Re-check all sequence invariants.
    pub fn validate(&self) -> Result<()> {
        for (i, segment) in self.segments.iter().enumerate() {
            let expected_id = i as u32 + 1;
            if segment.id != expected_id {
                return Err(QuoteweaveError::invariant(format!(
                    "segment at index {} has id {}, expected {}",
                    i, segment.id, expected_id
                )));
            }
            if segment.kind == SegmentKind::Other && segment.speaker_id.is_some() {
                return Err(QuoteweaveError::invariant(format!(
                    "narration segment {} carries a speaker id",
                    segment.id
                )));
            }
        }
        Ok(())
    }

    /// Verify that the concatenated segment texts reconstruct `expected`.
    ///
    /// A mismatch indicates an upstream bug (chunk production or ground-truth
    /// parsing) and is never silently repaired.
    pub fn validate_against(&self, expected: &str) -> Result<()> {
        let flat = self.flat_text();
        if flat != expected {
            return Err(QuoteweaveError::invariant(format!(
                "flat text reconstruction mismatch: {} chars rebuilt, {} chars expected",
                flat.chars().count(),
                expected.chars().count()
            )));
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Concatenation of all segment texts in order.
    pub fn flat_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Total number of characters across all segments.
    pub fn char_len(&self) -> usize {
        self.segments.iter().map(Segment::char_len).sum()
    }

    /// Merge runs of consecutive segments sharing the same kind and speaker
    /// into one segment, joining their texts with `separator`.
    ///
    /// Ids are recomputed from 1 over the merged result.
    pub fn merge_adjacent(&self, separator: &str) -> SegmentSequence {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match merged.last_mut() {
                Some(last) if last.kind == segment.kind && last.speaker_id == segment.speaker_id => {
                    last.text.push_str(separator);
                    last.text.push_str(&segment.text);
                }
                _ => merged.push(segment.clone()),
            }
        }
        Self::from_renumbered_unchecked(merged)
    }

    /// Drop blank segments and collapse whitespace runs to a single space.
    ///
    /// Runs are collapsed across segment boundaries so the flat text never
    /// contains two consecutive whitespace characters. With `trim`, leading
    /// and trailing whitespace of the whole flat text is removed as well.
    /// Segments that end up empty are dropped and ids are recomputed.
    pub fn normalize_whitespace(&self, trim: bool) -> SegmentSequence {
        let mut normalized: Vec<Segment> = Vec::with_capacity(self.segments.len());
        let mut previous_was_space = trim;

        for segment in self.segments.iter().filter(|s| !s.is_blank()) {
            let mut text = String::with_capacity(segment.text.len());
            for c in segment.text.chars() {
                if c.is_whitespace() {
                    if !previous_was_space {
                        text.push(' ');
                        previous_was_space = true;
                    }
                } else {
                    text.push(c);
                    previous_was_space = false;
                }
            }
            if !text.is_empty() {
                normalized.push(Segment {
                    id: 0,
                    text,
                    kind: segment.kind,
                    speaker_id: segment.speaker_id.clone(),
                });
            }
        }

        if trim {
            while let Some(last) = normalized.last_mut() {
                while last.text.ends_with(' ') {
                    last.text.pop();
                }
                if last.text.is_empty() {
                    normalized.pop();
                } else {
                    break;
                }
            }
        }

        Self::from_renumbered_unchecked(normalized)
    }
}

impl TryFrom<Vec<Segment>> for SegmentSequence {
    type Error = QuoteweaveError;

    fn try_from(segments: Vec<Segment>) -> Result<Self> {
        Self::new(segments)
    }
}

impl From<SegmentSequence> for Vec<Segment> {
    fn from(sequence: SegmentSequence) -> Self {
        sequence.segments
    }
}

impl<'a> IntoIterator for &'a SegmentSequence {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
