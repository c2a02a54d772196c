//! Terminal rendering for evaluation reports.

use crate::evaluate::{EvaluationReport, MistakeRange};

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Longest mistake excerpt printed before truncation.
const MAX_EXCERPT_CHARS: usize = 60;

/// Return the ANSI color code for a score in [0, 1].
fn score_color(score: f64) -> &'static str {
    if score >= 0.9 {
        GREEN
    } else if score >= 0.7 {
        "" // default terminal color
    } else if score >= 0.5 {
        YELLOW
    } else {
        RED
    }
}

/// Print a labeled value, colored by a goodness score in [0, 1].
fn render_scored(label: &str, value: f64, goodness: f64, detail: &str) {
    let color = score_color(goodness);
    let suffix = if detail.is_empty() {
        String::new()
    } else {
        format!(" {DIM}{detail}{RESET}")
    };
    if color.is_empty() {
        eprintln!("{label}: {value:.4}{suffix}");
    } else {
        eprintln!("{label}: {color}{value:.4}{RESET}{suffix}");
    }
}

fn render_mistake(mistake: &MistakeRange) {
    let excerpt: String = if mistake.text.chars().count() > MAX_EXCERPT_CHARS {
        let head: String = mistake.text.chars().take(MAX_EXCERPT_CHARS).collect();
        format!("{head}…")
    } else {
        mistake.text.clone()
    };
    eprintln!("  {}-{}: {:?}", mistake.start, mistake.end, excerpt);
    eprintln!(
        "    {DIM}predicted segments {:?}, ground truth segments {:?}{RESET}",
        mistake.predicted_ids, mistake.ground_truth_ids
    );
}

/// Render an evaluation report to stderr.
pub fn render_report(report: &EvaluationReport) {
    render_scored(
        "Relative edit distance",
        report.relative_edit_distance,
        1.0 - report.relative_edit_distance,
        "(lower is better)",
    );

    eprintln!("Quotation mistakes ({}):", report.mistake_ranges.len());
    for mistake in &report.mistake_ranges {
        render_mistake(mistake);
    }

    render_scored("Quotation coverage IoU", report.iou, report.iou, "");
    render_scored(
        "Attribution accuracy (predicted to truth)",
        report.accuracy_pred_to_gt,
        report.accuracy_pred_to_gt,
        &format!(
            "({}/{})",
            report.pred_to_gt.correct, report.pred_to_gt.total
        ),
    );
    render_scored(
        "Attribution accuracy (truth to predicted)",
        report.accuracy_gt_to_pred,
        report.accuracy_gt_to_pred,
        &format!(
            "({}/{})",
            report.gt_to_pred.correct, report.gt_to_pred.total
        ),
    );
}
