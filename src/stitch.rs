//! Splicing overlapping chunk predictions into one canonical sequence.
//!
//! Chunks of a document are predicted independently and overlap by design;
//! the stitcher finds the seam between the accumulated text and each new
//! chunk, drops the already-covered prefix of the chunk, and appends the
//! rest. Chunk texts may drift from each other at the character level
//! (token splitting, predictor rewriting), so the seam is located by edit
//! distance rather than exact matching.

use crate::align::edit_distance;
use crate::defaults::{self, SEAM_TAIL_CHARS};
use crate::error::{QuoteweaveError, Result};
use crate::segment::{Segment, SegmentSequence};

/// Options controlling the overlap seam search and the final merge pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchOptions {
    /// Smallest candidate overlap length, in characters.
    pub min_overlap: usize,
    /// Largest candidate overlap length, in characters.
    pub max_overlap: usize,
    /// Separator inserted between segments joined by the adjacency-merge pass.
    pub separator: String,
}

impl StitchOptions {
    /// Derive search bounds from the chunk overlap the producer was
    /// configured with: `min = hint / 2`, `max = hint * 2`.
    pub fn from_overlap_hint(overlap_hint: usize) -> Self {
        let (min_overlap, max_overlap) = defaults::overlap_bounds(overlap_hint);
        Self {
            min_overlap,
            max_overlap,
            separator: defaults::MERGE_SEPARATOR.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.min_overlap > self.max_overlap {
            return Err(QuoteweaveError::configuration(
                "min_overlap",
                format!(
                    "must not exceed max_overlap ({} > {})",
                    self.min_overlap, self.max_overlap
                ),
            ));
        }
        Ok(())
    }
}

/// Reconcile an ordered list of overlapping chunk sequences into one
/// sequence, deriving seam-search bounds from `overlap_hint`.
///
/// Chunks must be ordered by chunk index; the merge is strictly sequential
/// because each seam depends on the accumulated text so far.
pub fn stitch(chunks: &[SegmentSequence], overlap_hint: usize) -> Result<SegmentSequence> {
    stitch_with(chunks, &StitchOptions::from_overlap_hint(overlap_hint))
}

/// Reconcile an ordered list of overlapping chunk sequences into one
/// sequence using explicit options.
pub fn stitch_with(chunks: &[SegmentSequence], options: &StitchOptions) -> Result<SegmentSequence> {
    options.validate()?;

    let Some(first) = chunks.first() else {
        return Ok(SegmentSequence::default());
    };
    if chunks.len() == 1 {
        // Single chunk passes through untouched.
        return Ok(first.clone());
    }

    let mut accumulated_chars: Vec<char> = first.flat_text().chars().collect();
    let mut accumulated: Vec<Segment> = first.segments().to_vec();

    for chunk in &chunks[1..] {
        let chunk_chars: Vec<char> = chunk.flat_text().chars().collect();
        if chunk_chars.is_empty() {
            continue;
        }

        let displacement = if accumulated_chars.is_empty() {
            0
        } else {
            find_displacement(&accumulated_chars, &chunk_chars, options)?
        };
        debug_assert!(displacement <= chunk_chars.len());

        // Drop fully absorbed segments; clip the first survivor so its text
        // starts exactly at the displacement.
        let mut cursor = 0usize;
        for segment in chunk {
            let start = cursor;
            let end = start + segment.char_len();
            cursor = end;
            if end <= displacement {
                continue;
            }
            let text: String = if start < displacement {
                segment.text.chars().skip(displacement - start).collect()
            } else {
                segment.text.clone()
            };
            accumulated.push(Segment {
                id: 0,
                text,
                kind: segment.kind,
                speaker_id: segment.speaker_id.clone(),
            });
        }

        accumulated_chars.extend_from_slice(&chunk_chars[displacement..]);
    }

    let stitched = SegmentSequence::from_renumbered_unchecked(accumulated);
    let expected: String = accumulated_chars.iter().collect();
    stitched.validate_against(&expected)?;

    Ok(stitched.merge_adjacent(&options.separator))
}

/// Search candidate overlap lengths and return the winning displacement: the
/// character offset into the chunk at which its new content begins.
///
/// For each candidate `o`, the last `o` accumulated characters are compared
/// with the first `o` chunk characters. The primary ranking key is the edit
/// distance over the last `SEAM_TAIL_CHARS` characters of both windows (the
/// part least affected by earlier drift); ties fall back to the full-window
/// distance, then to the smaller overlap.
fn find_displacement(
    accumulated: &[char],
    chunk: &[char],
    options: &StitchOptions,
) -> Result<usize> {
    let max_feasible = options
        .max_overlap
        .min(accumulated.len())
        .min(chunk.len());

    let mut best: Option<(usize, usize, usize)> = None;
    for overlap in options.min_overlap..=max_feasible {
        let accumulated_window = &accumulated[accumulated.len() - overlap..];
        let chunk_window = &chunk[..overlap];

        let tail = SEAM_TAIL_CHARS.min(overlap);
        let tail_distance = edit_distance(
            &accumulated_window[overlap - tail..],
            &chunk_window[overlap - tail..],
        );
        let full_distance = edit_distance(accumulated_window, chunk_window);

        let candidate = (tail_distance, full_distance, overlap);
        if best.is_none_or(|(bt, bf, _)| (tail_distance, full_distance) < (bt, bf)) {
            best = Some(candidate);
        }
    }

    best.map(|(_, _, overlap)| overlap).ok_or_else(|| {
        QuoteweaveError::alignment(format!(
            "no usable seam: overlap search [{}, {}] does not fit accumulated ({} chars) and chunk ({} chars)",
            options.min_overlap,
            options.max_overlap,
            accumulated.len(),
            chunk.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentKind;

    fn other(text: &str) -> Segment {
        Segment::other(0, text)
    }

    fn quote(text: &str, speaker: &str) -> Segment {
        Segment::quote(0, text, Some(speaker.to_string()))
    }

    fn sequence(segments: Vec<Segment>) -> SegmentSequence {
        SegmentSequence::renumbered(segments).unwrap()
    }

    fn options(min: usize, max: usize) -> StitchOptions {
        StitchOptions {
            min_overlap: min,
            max_overlap: max,
            separator: String::new(),
        }
    }

    #[test]
    fn empty_chunk_list_yields_empty_sequence() {
        let stitched = stitch(&[], 8).unwrap();
        assert!(stitched.is_empty());
    }

    #[test]
    fn single_chunk_passes_through() {
        let chunk = sequence(vec![other("One. "), other("Two.")]);
        let stitched = stitch(std::slice::from_ref(&chunk), 8).unwrap();
        // Not even the adjacency merge runs for a single chunk.
        assert_eq!(stitched, chunk);
    }

    #[test]
    fn single_empty_chunk_passes_through() {
        let stitched = stitch(&[SegmentSequence::default()], 8).unwrap();
        assert!(stitched.is_empty());
    }

    #[test]
    fn invalid_bounds_are_a_configuration_error() {
        let chunks = [
            sequence(vec![other("abc")]),
            sequence(vec![other("abc")]),
        ];
        let result = stitch_with(&chunks, &options(10, 5));
        assert!(matches!(
            result,
            Err(QuoteweaveError::Configuration { .. })
        ));
    }

    #[test]
    fn exact_overlap_is_removed_once() {
        // The two chunks share "Start of next"; the stitched text must
        // contain it exactly once.
        let chunks = [
            sequence(vec![other("end of sentence. "), quote("Start of next", "A")]),
            sequence(vec![
                quote("Start of next", "A"),
                other(" sentence continues."),
            ]),
        ];
        let stitched = stitch_with(&chunks, &options(8, 20)).unwrap();
        let text = stitched.flat_text();
        assert_eq!(text, "end of sentence. Start of next sentence continues.");
        assert_eq!(text.matches("Start of next").count(), 1);
    }

    #[test]
    fn clipped_segment_keeps_kind_and_speaker() {
        let chunks = [
            sequence(vec![other("aaaa "), quote("hello there", "TOM")]),
            // The overlap ends inside the chunk's first segment, so that
            // segment is clipped mid-text rather than dropped.
            sequence(vec![quote("hello there and", "TOM"), other(" more.")]),
        ];
        let stitched = stitch_with(&chunks, &options(5, 16)).unwrap();
        assert_eq!(stitched.flat_text(), "aaaa hello there and more.");
        let quote_segment = stitched
            .iter()
            .find(|s| s.kind == SegmentKind::Quote)
            .unwrap();
        assert_eq!(quote_segment.speaker_id.as_deref(), Some("TOM"));
        // The clipped remainder " and" merged back into the overlapping quote.
        assert_eq!(quote_segment.text, "hello there and");
    }

    #[test]
    fn fully_absorbed_chunk_contributes_nothing() {
        let chunks = [
            sequence(vec![other("complete sentence here")]),
            // Entirely contained in the accumulated text's tail.
            sequence(vec![other("sentence here")]),
        ];
        let stitched = stitch_with(&chunks, &options(13, 13)).unwrap();
        assert_eq!(stitched.flat_text(), "complete sentence here");
        assert_eq!(stitched.len(), 1);
    }

    #[test]
    fn adjacency_merge_runs_after_stitching() {
        let chunks = [
            sequence(vec![other("one "), other("two ")]),
            sequence(vec![other("two "), other("three")]),
        ];
        let stitched = stitch_with(&chunks, &options(4, 4)).unwrap();
        // All four narration segments collapse into one.
        assert_eq!(stitched.len(), 1);
        assert_eq!(stitched.flat_text(), "one two three");
    }

    #[test]
    fn ids_are_contiguous_after_stitching() {
        let chunks = [
            sequence(vec![other("alpha "), quote("beta", "B")]),
            sequence(vec![quote("beta", "B"), other(" gamma "), quote("delta", "D")]),
        ];
        let stitched = stitch_with(&chunks, &options(4, 4)).unwrap();
        let ids: Vec<u32> = stitched.iter().map(|s| s.id).collect();
        let expected: Vec<u32> = (1..=stitched.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn seam_survives_character_drift() {
        // The second chunk rewrote one character inside the shared region;
        // the seam is still found and the shared text appears once.
        let chunks = [
            sequence(vec![other("It was a dark night. The wind howled")]),
            sequence(vec![other("The wind hawled through the trees.")]),
        ];
        let stitched = stitch_with(&chunks, &options(10, 20)).unwrap();
        let text = stitched.flat_text();
        assert_eq!(text.matches("The wind").count(), 1);
        assert!(text.ends_with("through the trees."));
        assert!(text.starts_with("It was a dark night."));
    }

    #[test]
    fn unreachable_overlap_is_an_alignment_error() {
        let chunks = [
            sequence(vec![other("tiny")]),
            sequence(vec![other("abc")]),
        ];
        // min_overlap is larger than the new chunk itself.
        let result = stitch_with(&chunks, &options(10, 20));
        assert!(matches!(result, Err(QuoteweaveError::Alignment { .. })));
    }

    #[test]
    fn three_chunks_stitch_in_order() {
        let chunks = [
            sequence(vec![other("The quick brown fox ")]),
            sequence(vec![other("brown fox jumps over ")]),
            sequence(vec![other("jumps over the lazy dog.")]),
        ];
        let stitched = stitch_with(&chunks, &options(5, 15)).unwrap();
        assert_eq!(
            stitched.flat_text(),
            "The quick brown fox jumps over the lazy dog."
        );
    }

    #[test]
    fn empty_middle_chunk_is_skipped() {
        let chunks = [
            sequence(vec![other("first part ")]),
            SegmentSequence::default(),
            sequence(vec![other("part two")]),
        ];
        let stitched = stitch_with(&chunks, &options(5, 5)).unwrap();
        assert_eq!(stitched.flat_text(), "first part two");
    }
}
