//! Integration tests for prediction-vs-ground-truth scoring.

use quoteweave::evaluate::{EvaluateOptions, evaluate, evaluate_with};
use quoteweave::segment::{Segment, SegmentSequence};

fn other(text: &str) -> Segment {
    Segment::other(0, text)
}

fn quote(text: &str, speaker: &str) -> Segment {
    Segment::quote(0, text, Some(speaker.to_string()))
}

fn sequence(segments: Vec<Segment>) -> SegmentSequence {
    SegmentSequence::renumbered(segments).unwrap()
}

#[test]
fn empty_boundary_scores() {
    let empty = SegmentSequence::default();
    let nonempty = sequence(vec![quote("anything", "X")]);

    assert_eq!(evaluate(&empty, &empty).iou, 1.0);
    assert_eq!(evaluate(&nonempty, &empty).iou, 0.0);
    assert_eq!(evaluate(&empty, &nonempty).iou, 0.0);
}

#[test]
fn spurious_quote_over_narration() {
    let predicted = sequence(vec![other("Hello "), quote("world", "X")]);
    let truth = sequence(vec![other("Hello world")]);

    let report = evaluate(&predicted, &truth);
    assert_eq!(report.iou, 0.0);
    assert_eq!(report.relative_edit_distance, 0.0);
    assert_eq!(report.mistake_ranges.len(), 1);
    assert_eq!(report.mistake_ranges[0].text, "world");
}

#[test]
fn correct_span_wrong_speaker() {
    let predicted = sequence(vec![
        other("The old man whispered "),
        quote("it is time", "TOM_1"),
        other("."),
    ]);
    let truth = sequence(vec![
        other("The old man whispered "),
        quote("it is time", "TOM_2"),
        other("."),
    ]);

    let report = evaluate(&predicted, &truth);
    assert_eq!(report.iou, 1.0);
    assert_eq!(report.accuracy_pred_to_gt, 0.0);
    assert_eq!(report.accuracy_gt_to_pred, 0.0);
}

#[test]
fn transcription_drift_is_absorbed_by_alignment() {
    // Ground truth came from a different transcription: an extra comma and
    // collapsed whitespace. Coverage must survive the character drift.
    let predicted = sequence(vec![
        other("She looked up and said "),
        quote("come in, quickly", "ANNA_1"),
        other(" before closing the door."),
    ]);
    let truth = sequence(vec![
        other("She looked up and said "),
        quote("come in quickly", "ANNA_1"),
        other(" before closing the door."),
    ]);

    let report = evaluate(&predicted, &truth);
    assert!(report.relative_edit_distance > 0.0);
    assert!(report.iou > 0.9, "iou = {}", report.iou);
    assert_eq!(report.accuracy_pred_to_gt, 1.0);
    assert_eq!(report.accuracy_gt_to_pred, 1.0);
}

#[test]
fn adjacent_same_speaker_quotes_merge_before_scoring() {
    // The prediction split one quotation into two adjacent segments with the
    // same speaker; after the merge pass both sides score identically.
    let predicted = sequence(vec![
        other("He shouted "),
        quote("stop ", "GUARD_1"),
        quote("right there", "GUARD_1"),
    ]);
    let truth = sequence(vec![
        other("He shouted "),
        quote("stop right there", "GUARD_1"),
    ]);

    let report = evaluate(&predicted, &truth);
    assert_eq!(report.iou, 1.0);
    assert_eq!(report.accuracy_pred_to_gt, 1.0);
    assert_eq!(report.pred_to_gt.total, 1);
}

#[test]
fn iou_is_symmetric_when_texts_match() {
    let a = sequence(vec![
        other("alpha "),
        quote("beta gamma", "S1"),
        other(" delta"),
    ]);
    let b = sequence(vec![
        other("alpha beta "),
        quote("gamma delta", "S1"),
    ]);
    // Flat texts differ; normalize them to the same string first.
    assert_eq!(a.flat_text(), "alpha beta gamma delta");
    assert_eq!(b.flat_text(), "alpha beta gamma delta");

    let forward = evaluate(&a, &b).iou;
    let backward = evaluate(&b, &a).iou;
    assert!((forward - backward).abs() < 1e-12);
}

#[test]
fn mistake_ranges_are_skipped_without_preprocessing_drift() {
    let predicted = sequence(vec![quote("all of it", "X")]);
    let report = evaluate_with(
        &predicted,
        &predicted.clone(),
        &EvaluateOptions {
            collapse_whitespace: false,
            trim: false,
        },
    );
    assert!(report.mistake_ranges.is_empty());
    assert_eq!(report.iou, 1.0);
}

#[test]
fn report_attributes_survive_json_round_trip() {
    let predicted = sequence(vec![other("say "), quote("hi", "A")]);
    let truth = sequence(vec![other("say "), quote("hi", "B")]);
    let report = evaluate(&predicted, &truth);

    let json = serde_json::to_string(&report).unwrap();
    let back: quoteweave::EvaluationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
