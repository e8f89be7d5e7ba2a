use super::FrameSource;
use crate::error::InputError;
use image::DynamicImage;
use std::path::{Path, PathBuf};

const FRAME_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "pbm", "pgm", "ppm", "tif", "tiff", "webp",
];

/// Frames stored as image files.
///
/// Either a single image, or a directory whose image files are taken in
/// file name order (`0001.png`, `0002.png`, ...).
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequence {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| InputError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(io_error)?;
        let paths = if metadata.is_dir() {
            let mut paths = Vec::new();
            for entry in std::fs::read_dir(path).map_err(io_error)? {
                let entry_path = entry.map_err(io_error)?.path();
                if entry_path.is_file() && is_frame_image(&entry_path) {
                    paths.push(entry_path);
                }
            }
            paths.sort();
            paths
        } else {
            vec![path.to_path_buf()]
        };

        if paths.is_empty() {
            return Err(InputError::Empty(path.to_path_buf()));
        }

        tracing::info!("Found {} frames in {}", paths.len(), path.display());

        Ok(Self { paths, next: 0 })
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>, InputError> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;

        let frame = image::open(path).map_err(|source| InputError::Decode {
            path: path.clone(),
            source,
        })?;
        if frame.width() == 0 || frame.height() == 0 {
            return Err(InputError::ZeroSized(path.clone()));
        }

        tracing::debug!("Loaded {} ({}x{})", path.display(), frame.width(), frame.height());
        Ok(Some(frame))
    }

    fn frame_count(&self) -> Option<usize> {
        Some(self.paths.len())
    }
}

fn is_frame_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::map_frames;
    use image::{GrayImage, Luma};

    #[test]
    fn directory_frames_are_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for (name, shade) in [("0002.png", 200u8), ("0001.png", 100), ("0003.png", 50)] {
            GrayImage::from_pixel(4, 2, Luma([shade]))
                .save(dir.path().join(name))
                .unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let mut source = ImageSequence::open(dir.path()).unwrap();
        assert_eq!(source.frame_count(), Some(3));
        let shades =
            map_frames(&mut source, |frame| frame.to_luma8().get_pixel(0, 0)[0]).unwrap();
        assert_eq!(shades, vec![100, 200, 50]);
    }

    #[test]
    fn empty_directory_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(ImageSequence::open(dir.path()), Err(InputError::Empty(_))));
    }

    #[test]
    fn missing_path_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp4");
        assert!(matches!(ImageSequence::open(&missing), Err(InputError::Io { .. })));
    }

    #[test]
    fn undecodable_frame_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0001.png");
        std::fs::write(&path, b"not a png").unwrap();
        let mut source = ImageSequence::open(&path).unwrap();
        assert!(matches!(source.next_frame(), Err(InputError::Decode { .. })));
    }
}
