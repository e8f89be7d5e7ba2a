use crate::decompose::Rect;
use std::path::PathBuf;
use thiserror::Error;

/// The frame source could not be read. Fatal for a whole run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read frame source {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode frame {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no frame images found in {}", .0.display())]
    Empty(PathBuf),

    #[error("frame {} has zero width or height", .0.display())]
    ZeroSized(PathBuf),
}

/// A mask grid that is not rectangular.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    #[error("mask of {width}x{height} needs {expected} cells, got {found}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("mask dimensions exceed addressable range")]
    TooLarge,
}

/// A single frame that could not be decomposed. The rest of the batch is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("frame {index} could not be decomposed")]
pub struct FrameFailure {
    pub index: usize,
    #[source]
    pub cause: MaskError,
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("frame {frame}, box {index} ({rect}) does not fit the one-byte binary format")]
    OutOfRange { frame: usize, index: usize, rect: Rect },

    #[error("failed to serialize boxes as JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to write encoded boxes")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed box JSON")]
    Json(#[from] serde_json::Error),

    #[error("binary stream length {len} is not a multiple of 4")]
    Truncated { len: usize },

    #[error("record at byte {offset} has a zero width or height")]
    InvalidRecord { offset: usize },

    #[error("final frame is missing its terminating zero record")]
    Unterminated,

    #[error("failed to read encoded boxes")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("target width must be positive")]
    ZeroWidth,

    #[error("threshold {0} is outside 0.0..=1.0")]
    Threshold(f32),

    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
