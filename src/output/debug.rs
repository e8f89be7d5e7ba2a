use super::FrameSink;
use crate::decompose::{BinaryMask, Rect};
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

const PALETTE: [Rgb<u8>; 15] = [
    Rgb([255, 0, 0]),     // red
    Rgb([0, 128, 0]),     // green
    Rgb([0, 0, 255]),     // blue
    Rgb([255, 165, 0]),   // orange
    Rgb([255, 255, 0]),   // yellow
    Rgb([128, 0, 128]),   // purple
    Rgb([255, 192, 203]), // pink
    Rgb([0, 255, 255]),   // cyan
    Rgb([128, 128, 128]), // gray
    Rgb([165, 42, 42]),   // brown
    Rgb([128, 0, 0]),     // maroon
    Rgb([255, 105, 180]), // hotpink
    Rgb([255, 215, 0]),   // gold
    Rgb([210, 105, 30]),  // chocolate
    Rgb([0, 128, 0]),     // green
];

/// Fill colour for the `index`-th box of a frame.
pub fn palette_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Draw a frame's boxes over its mask.
///
/// Background pixels are black, covered pixels take their box's colour.
/// A foreground pixel left white means it was missed by every box.
pub fn render_frame(mask: &BinaryMask, boxes: &[Rect]) -> RgbImage {
    let (width, height) = mask.dimensions();
    let mut canvas = RgbImage::from_fn(width, height, |x, y| {
        if mask.is_on(x, y) {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });

    for (index, rect) in boxes.iter().enumerate() {
        let color = palette_color(index);
        for (x, y) in rect.pixels().filter(|&(x, y)| x < width && y < height) {
            canvas.put_pixel(x, y, color);
        }
    }

    canvas
}

/// Writes one `<frame>.png` per frame into a directory.
pub struct PngDump {
    dir: PathBuf,
}

impl PngDump {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            tracing::info!("Creating debug output directory {}", dir.display());
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }
}

impl FrameSink for PngDump {
    fn write_frame(&mut self, index: usize, mask: &BinaryMask, boxes: &[Rect]) -> Result<()> {
        if mask.width() == 0 || mask.height() == 0 {
            tracing::debug!("Frame {} is empty, no debug image written", index);
            return Ok(());
        }
        let path = self.dir.join(format!("{index}.png"));
        render_frame(mask, boxes)
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_index() {
        assert_eq!(palette_color(0), Rgb([255, 0, 0]));
        assert_eq!(palette_color(15), palette_color(0));
        assert_eq!(palette_color(31), palette_color(1));
    }

    #[test]
    fn render_colours_boxes_in_order() {
        let mask = BinaryMask::from_rows(&[[true, false, true]]).unwrap();
        let boxes = [Rect::new(0, 0, 1, 1).unwrap(), Rect::new(2, 0, 1, 1).unwrap()];
        let image = render_frame(&mask, &boxes);
        assert_eq!(*image.get_pixel(0, 0), palette_color(0));
        assert_eq!(*image.get_pixel(1, 0), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(2, 0), palette_color(1));
    }

    #[test]
    fn dump_writes_numbered_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frames");
        let mut sink = PngDump::new(&out).unwrap();
        let mask = BinaryMask::filled(4, 3, true);
        sink.write_frame(7, &mask, &[Rect::new(0, 0, 4, 3).unwrap()]).unwrap();

        let written = image::open(out.join("7.png")).unwrap().to_rgb8();
        assert_eq!(written.dimensions(), (4, 3));
        assert_eq!(*written.get_pixel(3, 2), palette_color(0));
    }
}
