//! Scoring a predicted segment sequence against ground truth.
//!
//! The two sequences rarely share byte-identical text (whitespace
//! normalization, transcription variance), so the predicted labels are first
//! projected into the ground-truth coordinate frame via an edit script.
//! Coverage is scored as intersection-over-union of the two quote masks;
//! attribution is scored in both directions because the two sides may merge
//! segments at different granularities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::align::{edit_script, project_labels};
use crate::flatten::{FlatText, flatten, mask_ranges};
use crate::segment::{Segment, SegmentKind, SegmentSequence};

/// Options controlling evaluation preprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateOptions {
    /// Collapse whitespace runs to a single space before aligning.
    pub collapse_whitespace: bool,
    /// Trim leading/trailing whitespace of the flat texts.
    pub trim: bool,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            collapse_whitespace: true,
            trim: true,
        }
    }
}

/// A span of characters (ground-truth frame, inclusive bounds) where the two
/// sides disagree on quote/non-quote status. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeRange {
    pub start: usize,
    pub end: usize,
    /// Ground-truth excerpt covering the range.
    pub text: String,
    /// Ids of predicted segments touching the range.
    pub predicted_ids: Vec<u32>,
    /// Ids of ground-truth segments touching the range.
    pub ground_truth_ids: Vec<u32>,
}

/// Match counts behind an attribution accuracy figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub correct: usize,
    pub total: usize,
}

impl MatchStats {
    fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Scores for one predicted-vs-ground-truth comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Intersection-over-union of the aligned quote masks.
    pub iou: f64,
    /// Edit distance between the two flat texts, relative to the longer one.
    pub relative_edit_distance: f64,
    /// Character spans where the quote masks disagree.
    pub mistake_ranges: Vec<MistakeRange>,
    /// Attribution accuracy, predicted quotes matched against ground truth.
    pub accuracy_pred_to_gt: f64,
    /// Attribution accuracy, ground-truth quotes matched against prediction.
    pub accuracy_gt_to_pred: f64,
    /// Match counts behind `accuracy_pred_to_gt`.
    pub pred_to_gt: MatchStats,
    /// Match counts behind `accuracy_gt_to_pred`.
    pub gt_to_pred: MatchStats,
}

impl EvaluationReport {
    fn degenerate(iou: f64, relative_edit_distance: f64, accuracy: f64) -> Self {
        Self {
            iou,
            relative_edit_distance,
            mistake_ranges: Vec::new(),
            accuracy_pred_to_gt: accuracy,
            accuracy_gt_to_pred: accuracy,
            pred_to_gt: MatchStats::default(),
            gt_to_pred: MatchStats::default(),
        }
    }
}

/// Score `predicted` against `ground_truth` with default preprocessing.
pub fn evaluate(predicted: &SegmentSequence, ground_truth: &SegmentSequence) -> EvaluationReport {
    evaluate_with(predicted, ground_truth, &EvaluateOptions::default())
}

/// Score `predicted` against `ground_truth`.
///
/// Both sides are preprocessed independently: blank segments dropped,
/// whitespace normalized per `options`, adjacent same-kind/same-speaker
/// segments merged. Predicted labels are then projected into the
/// ground-truth frame and the masks compared character by character.
pub fn evaluate_with(
    predicted: &SegmentSequence,
    ground_truth: &SegmentSequence,
    options: &EvaluateOptions,
) -> EvaluationReport {
    let pred = preprocess(predicted, options);
    let truth = preprocess(ground_truth, options);

    // Degenerate cases: fully-empty comparisons have defined scores and no
    // mistake ranges.
    match (pred.is_empty(), truth.is_empty()) {
        (true, true) => return EvaluationReport::degenerate(1.0, 0.0, 1.0),
        (true, false) | (false, true) => return EvaluationReport::degenerate(0.0, 1.0, 0.0),
        (false, false) => {}
    }

    let pred_flat = flatten(&pred);
    let truth_flat = flatten(&truth);

    let script = edit_script(&pred_flat.chars, &truth_flat.chars);
    let relative_edit_distance =
        script.cost() as f64 / pred_flat.len().max(truth_flat.len()) as f64;

    // Predicted labels re-expressed in the ground-truth coordinate frame.
    let pred_quote_ids = project_labels(&pred_flat.quote_ids, &script);
    let pred_segment_ids = project_labels(&pred_flat.segment_ids, &script);

    let pred_mask: Vec<bool> = pred_quote_ids.iter().map(|&id| id != 0).collect();
    let truth_mask = truth_flat.quote_mask();

    let intersection = pred_mask
        .iter()
        .zip(&truth_mask)
        .filter(|&(&p, &t)| p && t)
        .count();
    let union = pred_mask
        .iter()
        .zip(&truth_mask)
        .filter(|&(&p, &t)| p || t)
        .count();
    let iou = if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    };

    let mistake_ranges = collect_mistake_ranges(
        &pred_mask,
        &truth_mask,
        &pred_segment_ids,
        &truth_flat,
    );

    let pred_to_gt = match_quotes(&pred, &pred_quote_ids, &truth, &truth_flat.quote_ids);
    let gt_to_pred = match_quotes(&truth, &truth_flat.quote_ids, &pred, &pred_quote_ids);

    EvaluationReport {
        iou,
        relative_edit_distance,
        mistake_ranges,
        accuracy_pred_to_gt: pred_to_gt.accuracy(),
        accuracy_gt_to_pred: gt_to_pred.accuracy(),
        pred_to_gt,
        gt_to_pred,
    }
}

fn preprocess(sequence: &SegmentSequence, options: &EvaluateOptions) -> SegmentSequence {
    let normalized = if options.collapse_whitespace {
        sequence.normalize_whitespace(options.trim)
    } else {
        // Blank segments are dropped even when whitespace is kept verbatim.
        SegmentSequence::from_renumbered_unchecked(
            sequence.iter().filter(|s| !s.is_blank()).cloned().collect(),
        )
    };
    normalized.merge_adjacent("")
}

fn collect_mistake_ranges(
    pred_mask: &[bool],
    truth_mask: &[bool],
    pred_segment_ids: &[u32],
    truth_flat: &FlatText,
) -> Vec<MistakeRange> {
    let disagreement: Vec<bool> = pred_mask
        .iter()
        .zip(truth_mask)
        .map(|(&p, &t)| p != t)
        .collect();

    mask_ranges(&disagreement)
        .into_iter()
        .map(|(start, end)| MistakeRange {
            start,
            end,
            text: truth_flat.chars[start..=end].iter().collect(),
            predicted_ids: unique_nonzero(&pred_segment_ids[start..=end]),
            ground_truth_ids: unique_nonzero(&truth_flat.segment_ids[start..=end]),
        })
        .collect()
}

fn unique_nonzero(labels: &[u32]) -> Vec<u32> {
    let set: BTreeSet<u32> = labels.iter().copied().filter(|&id| id != 0).collect();
    set.into_iter().collect()
}

/// Match each quote on the scored side against the segment ids its characters
/// overlap on the other side. Both label arrays must be in the same
/// coordinate frame. A quote overlapping nothing counts as one incorrect
/// match; each overlapped counterpart contributes one match judged by
/// speaker identity.
fn match_quotes(
    scored: &SegmentSequence,
    scored_ids: &[u32],
    other: &SegmentSequence,
    other_ids: &[u32],
) -> MatchStats {
    let mut stats = MatchStats::default();

    for segment in scored.iter().filter(|s| s.kind == SegmentKind::Quote) {
        let overlapping: BTreeSet<u32> = scored_ids
            .iter()
            .zip(other_ids)
            .filter(|&(&sid, &oid)| sid == segment.id && oid != 0)
            .map(|(_, &oid)| oid)
            .collect();

        if overlapping.is_empty() {
            stats.total += 1;
            continue;
        }
        for counterpart_id in overlapping {
            stats.total += 1;
            if counterpart(other, counterpart_id)
                .is_some_and(|c| c.speaker_id == segment.speaker_id)
            {
                stats.correct += 1;
            }
        }
    }

    stats
}

fn counterpart(sequence: &SegmentSequence, id: u32) -> Option<&Segment> {
    sequence.iter().find(|s| s.id == id)
}
