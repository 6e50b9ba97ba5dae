use std::ops::Range;

use crate::{drain::Drain, types::Coord};

/// Widest wall the sweep buffers are allocated for, in units.
pub const MAX_WALL_WIDTH: usize = 1 << 24;

/// Horizontal extent of the wall, implied by the union of drain spans.
///
/// Positions are normalized to a zero-based index by subtracting
/// `min_left_x`, so the wall covers indices `0..width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wall {
    pub min_left_x: Coord,
    pub width: usize,
}

impl Wall {
    /// Returns the smallest wall containing every drain, or `None` if
    /// `drains` is empty.
    ///
    /// A drain with `right_x <= left_x` can make the extent degenerate;
    /// such layouts never pass validation, and the width saturates at 0.
    pub fn enclosing(drains: &[Drain]) -> Option<Self> {
        let min_left_x = drains.iter().map(|d| d.left_x).min()?;
        let max_right_x = drains.iter().map(|d| d.right_x).max()?;
        let width = (i64::from(max_right_x) - i64::from(min_left_x)).max(0) as usize;
        Some(Self { min_left_x, width })
    }

    /// Normalized `[left, right)` index range covered by `drain`.
    #[inline]
    pub fn span(&self, drain: &Drain) -> Range<usize> {
        self.index_of(drain.left_x)..self.index_of(drain.right_x)
    }

    #[inline]
    fn index_of(&self, x: Coord) -> usize {
        (i64::from(x) - i64::from(self.min_left_x)).max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_spans_min_left_to_max_right() {
        let drains = [Drain::new(50, 20, 40), Drain::new(30, 35, 60)];
        let wall = Wall::enclosing(&drains).unwrap();

        assert_eq!(wall.min_left_x, 20);
        assert_eq!(wall.width, 40);
        assert_eq!(wall.span(&drains[0]), 0..20);
        assert_eq!(wall.span(&drains[1]), 15..40);
    }

    #[test]
    fn enclosing_handles_negative_coordinates() {
        let drains = [Drain::new(1, -10, -4), Drain::new(0, -2, 3)];
        let wall = Wall::enclosing(&drains).unwrap();

        assert_eq!(wall.width, 13);
        assert_eq!(wall.span(&drains[1]), 8..13);
    }

    #[test]
    fn enclosing_spans_the_full_coordinate_range_without_overflow() {
        let drains = [
            Drain::new(1, Coord::MIN, Coord::MIN + 1),
            Drain::new(0, Coord::MAX - 1, Coord::MAX),
        ];
        let wall = Wall::enclosing(&drains).unwrap();

        assert_eq!(wall.width, u32::MAX as usize);
        assert!(wall.width > MAX_WALL_WIDTH);
    }

    #[test]
    fn enclosing_empty_is_none() {
        assert_eq!(Wall::enclosing(&[]), None);
    }
}
