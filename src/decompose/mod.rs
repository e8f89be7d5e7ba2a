mod bruteforce;
mod grid;
pub mod types;

pub use bruteforce::{BruteForce, ScanOrder};
pub use grid::{Grid, VisitedMask};
pub use types::{BinaryMask, FrameResult, MaskSource, Rect};

/// Trait for rectangle decomposition strategies.
///
/// Implementations must be deterministic and must cover every foreground
/// pixel with exactly one box. A call owns all of its working state, so a
/// single decomposer can be shared across worker threads.
pub trait Decomposer: Send + Sync {
    /// Cover the foreground of `mask` with disjoint boxes.
    fn decompose(&self, mask: &BinaryMask) -> FrameResult;

    /// Name used on the command line and in logs.
    fn name(&self) -> &'static str;
}

/// Selectable decomposition algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    BruteForce,
}

impl Algorithm {
    /// Parse an algorithm name. Unknown names fall back to brute force.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bruteforce" | "brute-force" => Algorithm::BruteForce,
            other => {
                tracing::warn!("Unknown algorithm {:?}, falling back to bruteforce", other);
                Algorithm::BruteForce
            }
        }
    }
}

/// Create the decomposer for `algorithm`.
pub fn create_decomposer(algorithm: Algorithm, order: ScanOrder) -> Box<dyn Decomposer> {
    match algorithm {
        Algorithm::BruteForce => Box::new(BruteForce::new(order)),
    }
}
