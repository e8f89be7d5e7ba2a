use crate::error::MaskError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned box covering `[x, x + width) × [y, y + height)`.
///
/// Width and height are always non-zero. On the wire a box is the
/// four-element array `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 4]", into = "[u32; 4]")]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Returns `None` for a zero-sized box.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Every pixel inside the box, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.x, self.y, self.width, self.height)
    }
}

impl TryFrom<[u32; 4]> for Rect {
    type Error = String;

    fn try_from([x, y, width, height]: [u32; 4]) -> Result<Self, Self::Error> {
        Rect::new(x, y, width, height)
            .ok_or_else(|| format!("box [{x}, {y}, {width}, {height}] has zero area"))
    }
}

impl From<Rect> for [u32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

/// Boxes of one frame in the order the greedy search selected them.
pub type FrameResult = Vec<Rect>;

/// Boolean pixel grid produced by thresholding a greyscale frame.
///
/// Stored row-major and immutable once built. `true` is foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BinaryMask {
    pub fn new(width: u32, height: u32, bits: Vec<bool>) -> Result<Self, MaskError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(MaskError::TooLarge)?;
        if bits.len() != expected {
            return Err(MaskError::LengthMismatch {
                width,
                height,
                expected,
                found: bits.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    /// Builds a mask from rows of equal length. An empty slice gives a 0x0 mask.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, MaskError> {
        let expected = rows.first().map_or(0, |row| row.as_ref().len());
        let mut bits = Vec::with_capacity(expected * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != expected {
                return Err(MaskError::Ragged {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            bits.extend_from_slice(cells);
        }
        let width = u32::try_from(expected).map_err(|_| MaskError::TooLarge)?;
        let height = u32::try_from(rows.len()).map_err(|_| MaskError::TooLarge)?;
        Ok(Self {
            width,
            height,
            bits,
        })
    }

    pub fn from_fn<F: FnMut(u32, u32) -> bool>(width: u32, height: u32, mut on: F) -> Self {
        let bits = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| on(x, y))
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn filled(width: u32, height: u32, on: bool) -> Self {
        Self::from_fn(width, height, |_, _| on)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Panics if `(x, y)` is outside the mask.
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside mask");
        self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn count_on(&self) -> usize {
        self.bits.iter().filter(|&&on| on).count()
    }
}

/// Anything the orchestrator can turn into a mask on a worker.
///
/// Validation happens per frame so a malformed frame fails alone.
pub trait MaskSource: Send {
    fn into_mask(self) -> Result<BinaryMask, MaskError>;
}

impl MaskSource for BinaryMask {
    fn into_mask(self) -> Result<BinaryMask, MaskError> {
        Ok(self)
    }
}

impl MaskSource for Vec<Vec<bool>> {
    fn into_mask(self) -> Result<BinaryMask, MaskError> {
        BinaryMask::from_rows(&self)
    }
}
