//! The `boxes.json` / `boxes.bin` pair written by the command line tool.

use super::{encode_binary, read_text, write_text};
use crate::decompose::FrameResult;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write the JSON file, then the binary file.
///
/// The JSON is complete on disk before the binary is encoded, so it stays
/// usable when a box does not fit the one-byte binary fields. In that case
/// no binary file is created and the range error is returned.
pub fn write_box_files(
    json_path: &Path,
    bin_path: &Path,
    frames: &[FrameResult],
) -> Result<()> {
    let json = File::create(json_path)
        .with_context(|| format!("Failed to create {}", json_path.display()))?;
    write_text(BufWriter::new(json), frames)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;
    tracing::info!("Wrote {}", json_path.display());

    write_bin(bin_path, frames)
}

/// Re-encode an existing JSON box file as the binary format.
///
/// Returns the frames read, for reporting.
pub fn pack_box_file(json_path: &Path, bin_path: &Path) -> Result<Vec<FrameResult>> {
    let json = File::open(json_path)
        .with_context(|| format!("Failed to open {}", json_path.display()))?;
    let frames = read_text(BufReader::new(json))
        .with_context(|| format!("Failed to parse {}", json_path.display()))?;

    write_bin(bin_path, &frames)?;
    Ok(frames)
}

fn write_bin(path: &Path, frames: &[FrameResult]) -> Result<()> {
    let bytes = encode_binary(frames)
        .with_context(|| format!("Boxes cannot be stored in {}", path.display()))?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::Rect;
    use crate::error::EncodeError;
    use crate::output::{decode_binary, decode_text};

    #[test]
    fn both_files_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let (json, bin) = (dir.path().join("boxes.json"), dir.path().join("boxes.bin"));
        let frames = vec![vec![Rect::new(1, 2, 3, 4).unwrap()], vec![]];

        write_box_files(&json, &bin, &frames).unwrap();

        let text = std::fs::read_to_string(&json).unwrap();
        assert_eq!(decode_text(&text).unwrap(), frames);
        assert_eq!(decode_binary(&std::fs::read(&bin).unwrap()).unwrap(), frames);
    }

    #[test]
    fn oversized_box_keeps_json_and_fails_binary() {
        let dir = tempfile::tempdir().unwrap();
        let (json, bin) = (dir.path().join("boxes.json"), dir.path().join("boxes.bin"));
        let frames = vec![vec![Rect::new(0, 0, 300, 2).unwrap()]];

        let err = write_box_files(&json, &bin, &frames).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<EncodeError>(),
            Some(EncodeError::OutOfRange { frame: 0, index: 0, .. })
        ));
        assert_eq!(std::fs::read_to_string(&json).unwrap(), "[[[0,0,300,2]]]");
        assert!(!bin.exists());
    }

    #[test]
    fn pack_converts_json_to_binary() {
        let dir = tempfile::tempdir().unwrap();
        let (json, bin) = (dir.path().join("boxes.json"), dir.path().join("boxes.bin"));
        std::fs::write(&json, "[[[0,0,64,48]],[],[[3,4,1,2],[9,0,2,2]]]").unwrap();

        let frames = pack_box_file(&json, &bin).unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(
            std::fs::read(&bin).unwrap(),
            vec![0, 0, 64, 48, 0, 0, 0, 0, 0, 0, 0, 0, 3, 4, 1, 2, 9, 0, 2, 2, 0, 0, 0, 0]
        );
    }

    #[test]
    fn pack_reports_unreadable_json() {
        let dir = tempfile::tempdir().unwrap();
        let (json, bin) = (dir.path().join("boxes.json"), dir.path().join("boxes.bin"));
        std::fs::write(&json, "[[[1,1,0,1]]]").unwrap();

        assert!(pack_box_file(&json, &bin).is_err());
        assert!(!bin.exists());
    }
}
