use super::grid::VisitedMask;
use super::types::{BinaryMask, FrameResult, Rect};
use super::Decomposer;

/// Order in which candidate origins are visited during a pass.
///
/// Only affects which of several equal-area boxes is taken first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// `y` outer, `x` inner.
    #[default]
    RowMajor,
    /// `x` outer, `y` inner. Matches the output of the original `boxes.json` tooling.
    ColumnMajor,
}

impl ScanOrder {
    fn positions(self, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
        let count = width as u64 * height as u64;
        (0..count).map(move |i| match self {
            ScanOrder::RowMajor => ((i % width as u64) as u32, (i / width as u64) as u32),
            ScanOrder::ColumnMajor => ((i / height as u64) as u32, (i % height as u64) as u32),
        })
    }
}

/// Greedy maximal-rectangle cover by exhaustive search.
///
/// Each pass tries every unvisited foreground pixel as the top-left corner
/// of a box, grows it right and down as far as the mask allows, and keeps
/// the largest box found. Ties go to the origin scanned first. Passes
/// repeat until no foreground pixel is left uncovered.
///
/// A pass costs O((W·H)²) in the worst case, so this is only practical
/// for small masks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce {
    order: ScanOrder,
}

impl BruteForce {
    pub fn new(order: ScanOrder) -> Self {
        Self { order }
    }

    /// Runs the full decomposition of one mask.
    pub fn cover(&self, mask: &BinaryMask) -> FrameResult {
        let (width, height) = mask.dimensions();
        let mut visited = VisitedMask::new(width, height);
        let mut boxes = Vec::new();

        loop {
            let mut largest: Option<Rect> = None;

            for (x, y) in self.order.positions(width, height) {
                if visited[(x, y)] {
                    continue;
                }
                if !mask.is_on(x, y) {
                    visited[(x, y)] = true;
                    continue;
                }

                let candidate = grow_from(mask, &visited, x, y);
                if largest.map_or(true, |best| best.area() < candidate.area()) {
                    largest = Some(candidate);
                }
            }

            let Some(rect) = largest else {
                break;
            };
            visited.fill(&rect, true);
            tracing::trace!("selected box {} (area {})", rect, rect.area());
            boxes.push(rect);
        }

        boxes
    }
}

impl Decomposer for BruteForce {
    fn decompose(&self, mask: &BinaryMask) -> FrameResult {
        let _span = tracing::debug_span!("bruteforce").entered();
        self.cover(mask)
    }

    fn name(&self) -> &'static str {
        "bruteforce"
    }
}

/// Largest box with its top-left corner at `(x, y)`.
///
/// The origin must be on and unvisited, so the result is at least 1x1.
fn grow_from(mask: &BinaryMask, visited: &VisitedMask, x: u32, y: u32) -> Rect {
    let (width, height) = mask.dimensions();
    let mut widest = width - x;
    let (mut best_width, mut best_height) = (0u32, 0u32);
    let mut best_area = 0u64;

    for row in y..height {
        // Width can only shrink row over row.
        widest = (0..widest)
            .find(|&dx| visited[(x + dx, row)] || !mask.is_on(x + dx, row))
            .unwrap_or(widest);
        if widest == 0 {
            break;
        }

        let rows = row - y + 1;
        let area = widest as u64 * rows as u64;
        if best_area < area {
            best_area = area;
            best_width = widest;
            best_height = rows;
        }
    }

    Rect {
        x,
        y,
        width: best_width,
        height: best_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: &[&str]) -> BinaryMask {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect();
        BinaryMask::from_rows(&rows).unwrap()
    }

    fn rect(x: u32, y: u32, width: u32, height: u32) -> Rect {
        Rect::new(x, y, width, height).unwrap()
    }

    #[test]
    fn top_left_square() {
        let m = mask(&["##..", "##..", "....", "...."]);
        assert_eq!(BruteForce::default().cover(&m), vec![rect(0, 0, 2, 2)]);
    }

    #[test]
    fn separated_pixels_leftmost_first() {
        let m = mask(&["#.#"]);
        for order in [ScanOrder::RowMajor, ScanOrder::ColumnMajor] {
            assert_eq!(
                BruteForce::new(order).cover(&m),
                vec![rect(0, 0, 1, 1), rect(2, 0, 1, 1)]
            );
        }
    }

    #[test]
    fn all_off_is_empty() {
        assert!(BruteForce::default().cover(&BinaryMask::filled(7, 5, false)).is_empty());
        assert!(BruteForce::default().cover(&BinaryMask::filled(0, 0, false)).is_empty());
    }

    #[test]
    fn all_on_is_one_box() {
        let m = BinaryMask::filled(9, 4, true);
        assert_eq!(BruteForce::default().cover(&m), vec![rect(0, 0, 9, 4)]);
    }

    #[test]
    fn largest_box_is_selected_first() {
        // A 4x1 bar on top of a 2x3 column: the 2x3 block (area 6) wins the
        // first pass over the full-width bar (area 4).
        let m = mask(&["####", "##..", "##..", "...."]);
        assert_eq!(
            BruteForce::default().cover(&m),
            vec![rect(0, 0, 2, 3), rect(2, 0, 2, 1)]
        );
    }

    #[test]
    fn width_shrinks_row_over_row() {
        let m = mask(&["###", "##.", "#.."]);
        // 3x1, 2x2 and 1x3 all have area 3 or 4; the 2x2 wins.
        assert_eq!(
            BruteForce::default().cover(&m),
            vec![rect(0, 0, 2, 2), rect(2, 0, 1, 1), rect(0, 2, 1, 1)]
        );
    }

    #[test]
    fn scan_order_breaks_ties() {
        // Two disjoint 1x2 bars of equal area.
        let m = mask(&["#.", "#.", ".#", ".#"]);
        let row_major = BruteForce::new(ScanOrder::RowMajor).cover(&m);
        let column_major = BruteForce::new(ScanOrder::ColumnMajor).cover(&m);
        assert_eq!(row_major, vec![rect(0, 0, 1, 2), rect(1, 2, 1, 2)]);
        assert_eq!(column_major, row_major);

        // Row-major reaches (1, 0) before (0, 1); column-major the reverse.
        let m = mask(&[".#", "#."]);
        assert_eq!(
            BruteForce::new(ScanOrder::RowMajor).cover(&m),
            vec![rect(1, 0, 1, 1), rect(0, 1, 1, 1)]
        );
        assert_eq!(
            BruteForce::new(ScanOrder::ColumnMajor).cover(&m),
            vec![rect(0, 1, 1, 1), rect(1, 0, 1, 1)]
        );
    }

    #[test]
    fn single_column_run() {
        let m = mask(&[".", "#", "#", "#", "."]);
        assert_eq!(BruteForce::default().cover(&m), vec![rect(0, 1, 1, 3)]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let m = mask(&["#.##.", "###.#", ".####", "##..#"]);
        let first = BruteForce::default().cover(&m);
        for _ in 0..3 {
            assert_eq!(BruteForce::default().cover(&m), first);
        }
    }
}
