//! Evaluation component: score the predicted sequence against ground truth.

use crate::error::{QuoteweaveError, Result};
use crate::evaluate::{EvaluateOptions, evaluate_with};
use crate::output;
use crate::pipeline::component::{Component, ComponentParams};
use crate::pipeline::data::PipelineData;

/// Score `segments` against `ground_truth` and record the report.
///
/// The report is rendered to stderr and stored under the `evaluation`
/// attribute for downstream `save_json` components.
pub struct EvaluateAttribution {
    options: EvaluateOptions,
    quiet: bool,
}

impl EvaluateAttribution {
    pub const NAME: &'static str = "evaluate";
    pub const HELP: &'static str = "Score the predicted segments against the loaded ground truth \
        (coverage IoU, mistake ranges, attribution accuracy). Parameters: \
        collapse_whitespace=<bool> (default true), trim=<bool> (default true), \
        quiet=<bool> (default false).";

    pub fn from_params(params: &ComponentParams) -> Result<Box<dyn Component>> {
        let defaults = EvaluateOptions::default();
        Ok(Box::new(Self {
            options: EvaluateOptions {
                collapse_whitespace: params.get_bool(
                    Self::NAME,
                    "collapse_whitespace",
                    defaults.collapse_whitespace,
                )?,
                trim: params.get_bool(Self::NAME, "trim", defaults.trim)?,
            },
            quiet: params.get_bool(Self::NAME, "quiet", false)?,
        }))
    }
}

impl Component for EvaluateAttribution {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        let ground_truth = data.ground_truth.as_ref().ok_or_else(|| {
            QuoteweaveError::component(Self::NAME, "no ground truth loaded into the pipeline")
        })?;

        let report = evaluate_with(&data.segments, ground_truth, &self.options);
        if !self.quiet {
            output::render_report(&report);
        }
        data.attributes
            .insert("evaluation".to_string(), serde_json::to_value(&report)?);
        Ok(())
    }
}
