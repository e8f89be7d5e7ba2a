use crate::decompose::{BinaryMask, Decomposer, FrameResult, MaskSource};
use crate::error::{ConfigError, FrameFailure};
use rayon::prelude::*;
use std::sync::mpsc;
use std::time::Instant;

/// Output of a batch run.
///
/// `frames[i]` always belongs to input frame `i`. A frame listed in
/// `failures` keeps an empty box list in its slot.
#[derive(Debug, Default)]
pub struct Batch {
    pub frames: Vec<FrameResult>,
    pub failures: Vec<FrameFailure>,
}

impl Batch {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs a decomposer over many frames on a fixed-size worker pool.
pub struct Orchestrator<D: Decomposer + ?Sized> {
    decomposer: Box<D>,
    pool: rayon::ThreadPool,
    workers: usize,
}

impl<D: Decomposer + ?Sized> Orchestrator<D> {
    /// Build a pool of `workers` threads, or one per logical CPU when `None`.
    pub fn new(decomposer: Box<D>, workers: Option<usize>) -> Result<Self, ConfigError> {
        let workers = match workers {
            Some(0) => return Err(ConfigError::ZeroWorkers),
            Some(n) => n,
            None => num_cpus::get(),
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("decompose-{i}"))
            .build()?;

        tracing::info!(
            "Orchestrator ready: {} workers, algorithm={}",
            workers,
            decomposer.name()
        );

        Ok(Self {
            decomposer,
            pool,
            workers,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Decompose every frame, keeping input order in the output.
    ///
    /// Each frame is tagged with its index before dispatch; results come
    /// back in completion order and are placed into their slot by tag.
    pub fn process<F: MaskSource>(&self, frames: Vec<F>) -> Batch {
        let _span = tracing::debug_span!("process_batch", frames = frames.len()).entered();
        let total = frames.len();
        let start = Instant::now();

        let (sender, receiver) = mpsc::channel();
        let decomposer = &*self.decomposer;
        self.pool.install(|| {
            frames
                .into_par_iter()
                .enumerate()
                .for_each_with(sender, |sender, (index, frame)| {
                    let outcome = frame.into_mask().map(|mask| decomposer.decompose(&mask));
                    // The receiver outlives the pool run.
                    let _ = sender.send((index, outcome));
                });
        });

        let mut frames = vec![FrameResult::new(); total];
        let mut failures = Vec::new();
        for (index, outcome) in receiver {
            match outcome {
                Ok(boxes) => {
                    tracing::debug!("Frame {}: {} boxes", index, boxes.len());
                    frames[index] = boxes;
                }
                Err(cause) => {
                    tracing::warn!("Frame {} skipped: {}", index, cause);
                    failures.push(FrameFailure { index, cause });
                }
            }
        }
        failures.sort_by_key(|failure| failure.index);

        tracing::info!(
            "Decomposed {} frames ({} failed) in {:.1}ms",
            total,
            failures.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Batch { frames, failures }
    }

    /// Decompose already validated masks.
    pub fn process_masks(&self, masks: &[BinaryMask]) -> Vec<FrameResult> {
        self.process(masks.to_vec()).frames
    }
}
