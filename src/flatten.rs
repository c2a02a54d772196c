//! Flattening segment sequences into per-character label arrays.
//!
//! Each character of a sequence's flat text is labeled with the id of the
//! segment that owns it; 0 marks unowned characters (placeholders introduced
//! by label projection). Boolean masks and contiguous ranges are derived from
//! these labels for scoring and mistake reporting.

use crate::segment::{SegmentKind, SegmentSequence};

/// Per-character segment-id labels; 0 means "unowned".
pub type LabelArray = Vec<u32>;

/// A segment sequence projected to a flat character array plus label arrays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlatText {
    /// The flat text, one entry per character.
    pub chars: Vec<char>,
    /// Owning segment id for every character.
    pub segment_ids: LabelArray,
    /// Owning segment id for characters inside quote segments, 0 elsewhere.
    pub quote_ids: LabelArray,
}

impl FlatText {
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Rebuild the flat text as a `String`.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Boolean mask of characters belonging to any segment.
    pub fn segment_mask(&self) -> Vec<bool> {
        self.segment_ids.iter().map(|&id| id != 0).collect()
    }

    /// Boolean mask of characters belonging to a quote segment.
    pub fn quote_mask(&self) -> Vec<bool> {
        self.quote_ids.iter().map(|&id| id != 0).collect()
    }
}

/// Project a sequence into its flat text and label arrays in one pass.
///
/// Character `k` of the flat text is labeled with the id of the segment that
/// contains offset `k` in cumulative order. An empty sequence yields empty
/// arrays.
pub fn flatten(sequence: &SegmentSequence) -> FlatText {
    let capacity = sequence.char_len();
    let mut flat = FlatText {
        chars: Vec::with_capacity(capacity),
        segment_ids: Vec::with_capacity(capacity),
        quote_ids: Vec::with_capacity(capacity),
    };

    for segment in sequence {
        let quote_id = match segment.kind {
            SegmentKind::Quote => segment.id,
            SegmentKind::Other => 0,
        };
        for c in segment.text.chars() {
            flat.chars.push(c);
            flat.segment_ids.push(segment.id);
            flat.quote_ids.push(quote_id);
        }
    }

    flat
}

/// Convert a boolean mask into inclusive (start, end) ranges of consecutive
/// true entries.
pub fn mask_ranges(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &set) in mask.iter().enumerate() {
        match (set, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                ranges.push((start, i - 1));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        ranges.push((start, mask.len() - 1));
    }

    ranges
}
