//! Attribution components: dummy whole-document and chunked prediction.

use crate::attribution::{SegmentPredictor, WordGroupPredictor, attribute_document};
use crate::defaults;
use crate::error::Result;
use crate::pipeline::component::{Component, ComponentParams};
use crate::pipeline::data::PipelineData;

fn first_character_identifier(data: &PipelineData) -> Option<String> {
    data.characters.first().map(|c| c.identifier.clone())
}

/// Attribute the whole document with the deterministic word-group predictor.
///
/// Splits the document into fixed-size word groups alternating narration and
/// quotation, attributing every quote to the first known character. A
/// stand-in for a real predictor, useful for pipeline dry runs.
pub struct DummyAttributor {
    words_per_group: usize,
}

impl DummyAttributor {
    pub const NAME: &'static str = "dummy_attributor";
    pub const HELP: &'static str = "Attribute the document by splitting it into fixed-size word \
        groups, alternating narration and quotes. Parameters: words_per_group=<n> (default 8).";

    pub fn from_params(params: &ComponentParams) -> Result<Box<dyn Component>> {
        let words_per_group = params.get_usize(
            Self::NAME,
            "words_per_group",
            defaults::DUMMY_WORDS_PER_GROUP,
        )?;
        Ok(Box::new(Self { words_per_group }))
    }
}

impl Component for DummyAttributor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        let predictor =
            WordGroupPredictor::new(self.words_per_group, first_character_identifier(data));
        data.segments = predictor.predict(&data.original_text)?;
        Ok(())
    }
}

/// Attribute the document chunk by chunk and stitch the results.
///
/// The predictor seam defaults to the word-group stand-in; library callers
/// can inject a real predictor with [`ChunkAttributor::with_predictor`].
pub struct ChunkAttributor {
    chunk_chars: usize,
    chunk_overlap: usize,
    workers: usize,
    predictor: Option<Box<dyn SegmentPredictor>>,
}

impl ChunkAttributor {
    pub const NAME: &'static str = "chunk_attributor";
    pub const HELP: &'static str = "Attribute the document in overlapping chunks and stitch the \
        per-chunk predictions into one sequence. Parameters: chunk_chars=<n> (default 2000), \
        chunk_overlap=<n> (default 200), workers=<n> (default 4).";

    pub fn from_params(params: &ComponentParams) -> Result<Box<dyn Component>> {
        Ok(Box::new(Self {
            chunk_chars: params.get_usize(Self::NAME, "chunk_chars", defaults::CHUNK_CHARS)?,
            chunk_overlap: params.get_usize(
                Self::NAME,
                "chunk_overlap",
                defaults::CHUNK_OVERLAP,
            )?,
            workers: params.get_usize(Self::NAME, "workers", defaults::PREDICTION_WORKERS)?,
            predictor: None,
        }))
    }

    /// Build a chunk attributor around a caller-supplied predictor.
    pub fn with_predictor(
        chunk_chars: usize,
        chunk_overlap: usize,
        workers: usize,
        predictor: Box<dyn SegmentPredictor>,
    ) -> Self {
        Self {
            chunk_chars,
            chunk_overlap,
            workers,
            predictor: Some(predictor),
        }
    }
}

impl Component for ChunkAttributor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn setup(&mut self, data: &mut PipelineData) -> Result<()> {
        if self.predictor.is_none() {
            self.predictor = Some(Box::new(WordGroupPredictor::new(
                defaults::DUMMY_WORDS_PER_GROUP,
                first_character_identifier(data),
            )));
        }
        Ok(())
    }

    fn run(&mut self, data: &mut PipelineData) -> Result<()> {
        let predictor = self
            .predictor
            .as_deref()
            .ok_or_else(|| crate::error::QuoteweaveError::component(Self::NAME, "setup not run"))?;

        data.segments = attribute_document(
            &data.original_text,
            predictor,
            self.chunk_chars,
            self.chunk_overlap,
            self.workers,
        )?;
        data.attributes.insert(
            "attribution_predictor".to_string(),
            serde_json::json!(predictor.name()),
        );
        Ok(())
    }
}
