mod image_sequence;

pub use image_sequence::ImageSequence;

use crate::error::InputError;
use image::DynamicImage;

/// Trait for frame sources
///
/// Video decoding happens outside this crate; a source hands out frames
/// that have already been extracted to images.
pub trait FrameSource {
    /// Next frame in sequence order, or `None` once exhausted
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, InputError>;

    /// Number of frames, when known up front
    fn frame_count(&self) -> Option<usize> {
        None
    }
}

/// Drain a source, converting each frame as soon as it is read.
///
/// Only one decoded frame is alive at a time. Any read failure aborts the
/// whole run.
pub fn map_frames<S, T, F>(source: &mut S, mut convert: F) -> Result<Vec<T>, InputError>
where
    S: FrameSource + ?Sized,
    F: FnMut(DynamicImage) -> T,
{
    let mut converted = Vec::with_capacity(source.frame_count().unwrap_or(0));
    while let Some(frame) = source.next_frame()? {
        converted.push(convert(frame));
    }
    Ok(converted)
}
