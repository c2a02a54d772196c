//! Parallel chunk prediction with a worker-thread pool.
//!
//! Chunks are predicted concurrently and may finish out of order; results
//! are reordered by chunk index before they reach the stitcher, which
//! requires strictly ordered input.

use std::thread;

use crossbeam_channel::unbounded;

use crate::attribution::chunker::TextChunk;
use crate::attribution::predictor::SegmentPredictor;
use crate::error::Result;
use crate::segment::SegmentSequence;

/// Predict every chunk through `predictor` on up to `workers` threads.
///
/// Returns the predicted sequences in chunk order. The first prediction
/// error aborts the whole batch.
pub fn predict_chunks(
    predictor: &dyn SegmentPredictor,
    chunks: &[TextChunk],
    workers: usize,
) -> Result<Vec<SegmentSequence>> {
    if chunks.is_empty() {
        return Ok(Vec::new());
    }
    let workers = workers.clamp(1, chunks.len());

    let (job_tx, job_rx) = unbounded::<&TextChunk>();
    let (result_tx, result_rx) = unbounded::<(usize, Result<SegmentSequence>)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok(chunk) = job_rx.recv() {
                    let prediction = predictor.predict(&chunk.text);
                    if result_tx.send((chunk.index, prediction)).is_err() {
                        break;
                    }
                }
            });
        }

        for chunk in chunks {
            // Workers hold the receiver for the scope's lifetime.
            if job_tx.send(chunk).is_err() {
                break;
            }
        }
        drop(job_tx);
    });
    drop(result_tx);

    let mut indexed: Vec<(usize, Result<SegmentSequence>)> = result_rx.iter().collect();
    indexed.sort_by_key(|(index, _)| *index);

    indexed
        .into_iter()
        .map(|(_, prediction)| prediction)
        .collect()
}
