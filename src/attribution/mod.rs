//! Chunked quotation attribution: split, predict, stitch.
//!
//! Long documents are cut into overlapping chunks, each chunk is sent
//! independently through a [`SegmentPredictor`], and the per-chunk sequences
//! are spliced back into one document-wide sequence by the stitcher.

pub mod chunker;
pub mod fan_out;
pub mod predictor;

pub use chunker::{TextChunk, chunk_text};
pub use fan_out::predict_chunks;
pub use predictor::{SegmentPredictor, WordGroupPredictor};

use crate::error::Result;
use crate::segment::SegmentSequence;
use crate::stitch::stitch;

/// Attribute a whole document through `predictor`, chunk by chunk.
///
/// The document is split into chunks of `chunk_chars` characters overlapping
/// by `chunk_overlap`, predicted on `workers` threads, reordered by chunk
/// index and stitched with bounds derived from the overlap.
pub fn attribute_document(
    text: &str,
    predictor: &dyn SegmentPredictor,
    chunk_chars: usize,
    chunk_overlap: usize,
    workers: usize,
) -> Result<SegmentSequence> {
    let chunks = chunk_text(text, chunk_chars, chunk_overlap)?;
    let predictions = predict_chunks(predictor, &chunks, workers)?;
    stitch(&predictions, chunk_overlap)
}
