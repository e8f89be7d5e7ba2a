pub mod binary;
pub mod debug;
pub mod files;
pub mod stats;
pub mod text;

pub use binary::{decode_binary, encode_binary, write_binary};
pub use debug::{palette_color, render_frame, PngDump};
pub use files::{pack_box_file, write_box_files};
pub use stats::Summary;
pub use text::{decode_text, encode_text, read_text, write_text};

use crate::decompose::{BinaryMask, Rect};
use anyhow::Result;

/// Trait for per-frame output destinations
pub trait FrameSink {
    /// Write one frame's mask and the boxes chosen for it
    fn write_frame(&mut self, index: usize, mask: &BinaryMask, boxes: &[Rect]) -> Result<()>;
}
