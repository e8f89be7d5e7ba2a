//! Fixed-width binary box stream.
//!
//! Every box is four bytes: `x`, `y`, `width`, `height`. A frame ends with
//! the record `0, 0, 0, 0`. A box that itself encoded to all zeros would be
//! read as a frame boundary; zero-sized boxes cannot be built, so the
//! decomposer never emits one.

use crate::decompose::{FrameResult, Rect};
use crate::error::{DecodeError, EncodeError};
use std::io::Write;

pub const RECORD_LEN: usize = 4;
pub const TERMINATOR: [u8; RECORD_LEN] = [0; RECORD_LEN];

/// Encode all frames. Fails on the first field above 255 rather than truncating it.
pub fn encode_binary(frames: &[FrameResult]) -> Result<Vec<u8>, EncodeError> {
    let records = frames.iter().map(|frame| frame.len() + 1).sum::<usize>();
    let mut bytes = Vec::with_capacity(records * RECORD_LEN);
    for (frame_index, frame) in frames.iter().enumerate() {
        for (index, rect) in frame.iter().enumerate() {
            bytes.extend_from_slice(&record(frame_index, index, rect)?);
        }
        bytes.extend_from_slice(&TERMINATOR);
    }
    Ok(bytes)
}

pub fn write_binary<W: Write>(mut writer: W, frames: &[FrameResult]) -> Result<(), EncodeError> {
    let bytes = encode_binary(frames)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

fn record(frame: usize, index: usize, rect: &Rect) -> Result<[u8; RECORD_LEN], EncodeError> {
    let out_of_range = || EncodeError::OutOfRange {
        frame,
        index,
        rect: *rect,
    };
    Ok([
        u8::try_from(rect.x).map_err(|_| out_of_range())?,
        u8::try_from(rect.y).map_err(|_| out_of_range())?,
        u8::try_from(rect.width).map_err(|_| out_of_range())?,
        u8::try_from(rect.height).map_err(|_| out_of_range())?,
    ])
}

pub fn decode_binary(bytes: &[u8]) -> Result<Vec<FrameResult>, DecodeError> {
    if bytes.len() % RECORD_LEN != 0 {
        return Err(DecodeError::Truncated { len: bytes.len() });
    }

    let mut frames = Vec::new();
    let mut current = FrameResult::new();
    for (n, chunk) in bytes.chunks_exact(RECORD_LEN).enumerate() {
        if chunk == TERMINATOR.as_slice() {
            frames.push(std::mem::take(&mut current));
            continue;
        }
        let rect = Rect::new(chunk[0].into(), chunk[1].into(), chunk[2].into(), chunk[3].into())
            .ok_or(DecodeError::InvalidRecord {
                offset: n * RECORD_LEN,
            })?;
        current.push(rect);
    }

    if !current.is_empty() {
        return Err(DecodeError::Unterminated);
    }
    Ok(frames)
}
