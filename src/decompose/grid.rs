use super::types::Rect;
use std::ops::{Index, IndexMut};

/// Addressable two-dimensional field, row-major.
///
/// Used as the visited map of a single decomposition: created at the
/// start of the call, dropped when it returns.
#[derive(Debug)]
pub struct Grid<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    cells: Vec<P>,
}

impl<P: Default + Copy> Grid<P> {
    pub fn new(width: u32, height: u32) -> Self {
        Grid {
            width,
            height,
            cells: vec![P::default(); width as usize * height as usize],
        }
    }

    // All index math lives here.
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Sets every cell inside `rect`.
    pub fn fill(&mut self, rect: &Rect, value: P) {
        for (x, y) in rect.pixels() {
            self[(x, y)] = value;
        }
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for Grid<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let offset = self.offset(x, y);
        &self.cells[offset]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for Grid<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let offset = self.offset(x, y);
        &mut self.cells[offset]
    }
}

/// Per-call record of pixels already assigned to a box or known to be off.
pub type VisitedMask = Grid<bool>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_marks_only_the_rect() {
        let mut grid = VisitedMask::new(4, 3);
        grid.fill(&Rect::new(1, 1, 2, 2).unwrap(), true);
        let marked: Vec<_> = (0..3u32)
            .flat_map(|y| (0..4u32).map(move |x| (x, y)))
            .filter(|&p| grid[p])
            .collect();
        assert_eq!(marked, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }
}
