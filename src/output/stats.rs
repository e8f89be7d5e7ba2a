use crate::decompose::FrameResult;
use std::fmt;

/// Figures used to sanity-check a box file before playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Most boxes shown at once in any frame.
    pub max_boxes: usize,
    pub frames: usize,
    pub total_boxes: usize,
    /// Smallest canvas width that holds every box.
    pub base_width: u64,
    /// Smallest canvas height that holds every box.
    pub base_height: u64,
}

impl Summary {
    pub fn from_frames(frames: &[FrameResult]) -> Self {
        let boxes = || frames.iter().flatten();
        Self {
            max_boxes: frames.iter().map(Vec::len).max().unwrap_or(0),
            frames: frames.len(),
            total_boxes: frames.iter().map(Vec::len).sum(),
            base_width: boxes().map(|rect| rect.right()).max().unwrap_or(0),
            base_height: boxes().map(|rect| rect.bottom()).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "most boxes in a frame: {}, frames: {}, total boxes: {}, base size: {}x{}",
            self.max_boxes, self.frames, self.total_boxes, self.base_width, self.base_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::Rect;

    #[test]
    fn summarizes_frames() {
        let frames = vec![
            vec![Rect::new(0, 0, 10, 2).unwrap()],
            vec![],
            vec![Rect::new(3, 5, 4, 40).unwrap(), Rect::new(60, 0, 4, 1).unwrap()],
        ];
        assert_eq!(
            Summary::from_frames(&frames),
            Summary {
                max_boxes: 2,
                frames: 3,
                total_boxes: 3,
                base_width: 64,
                base_height: 45,
            }
        );
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(Summary::from_frames(&[]), Summary::default());
        let blank = Summary::from_frames(&[vec![], vec![]]);
        assert_eq!((blank.frames, blank.base_width), (2, 0));
    }
}
