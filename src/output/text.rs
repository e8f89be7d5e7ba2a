//! Nested JSON arrays: one array per frame, one `[x, y, width, height]` per box.

use crate::decompose::FrameResult;
use crate::error::{DecodeError, EncodeError};
use std::io::{Read, Write};

pub fn encode_text(frames: &[FrameResult]) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(frames)?)
}

pub fn write_text<W: Write>(mut writer: W, frames: &[FrameResult]) -> Result<(), EncodeError> {
    serde_json::to_writer(&mut writer, frames)?;
    writer.flush()?;
    Ok(())
}

pub fn decode_text(text: &str) -> Result<Vec<FrameResult>, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

pub fn read_text<R: Read>(reader: R) -> Result<Vec<FrameResult>, DecodeError> {
    Ok(serde_json::from_reader(reader)?)
}
