//! quoteweave - Quotation attribution stitching and scoring
//!
//! Reconstructs and scores sequences of typed text segments (narration vs.
//! attributed quotation) produced by independent per-chunk predictors:
//! chunk predictions are spliced into one document-wide sequence, and
//! predicted sequences are scored against ground truth that may drift at the
//! character level.

// Enforce error handling discipline in library code
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod align;
pub mod attribution;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod evaluate;
pub mod flatten;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod stitch;

// Core model
pub use segment::{Segment, SegmentKind, SegmentSequence};

// Alignment engine
pub use align::{EditOp, EditScript, edit_distance, edit_script, project_labels};
pub use flatten::{FlatText, LabelArray, flatten, mask_ranges};

// Reconciliation and scoring
pub use evaluate::{EvaluateOptions, EvaluationReport, MistakeRange, evaluate, evaluate_with};
pub use stitch::{StitchOptions, stitch, stitch_with};

// Chunked attribution
pub use attribution::{SegmentPredictor, attribute_document};

// Pipeline framework
pub use pipeline::{Component, Pipeline, PipelineData};

// Error handling
pub use error::{QuoteweaveError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.3.1+abc1234"` when git hash is available, `"0.3.1"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
