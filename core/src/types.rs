use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid height, width, and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait GridSizeExt {
    fn grid_size(&self) -> Coord2;

    fn contains_coords(&self, coords: Coord2) -> bool {
        let size = self.grid_size();
        coords.0 < size.0 && coords.1 < size.1
    }

    /// Row-major iterator over every coordinate of the grid.
    fn iter_coords(&self) -> CoordIter {
        CoordIter::new(self.grid_size())
    }
}

impl<T> GridSizeExt for Array2<T> {
    fn grid_size(&self) -> Coord2 {
        let dim = self.dim();
        (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        )
    }
}

#[derive(Debug)]
pub struct CoordIter {
    size: Coord2,
    next: Option<Coord2>,
}

impl CoordIter {
    fn new(size: Coord2) -> Self {
        let next = (size.0 > 0 && size.1 > 0).then_some((0, 0));
        Self { size, next }
    }
}

impl Iterator for CoordIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let (row, col) = current;
        self.next = if col + 1 < self.size.1 {
            Some((row, col + 1))
        } else if row + 1 < self.size.0 {
            Some((row + 1, 0))
        } else {
            None
        };
        Some(current)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    pub const fn flip(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }

    const fn delta(self) -> (Coord, Coord) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }

    /// Offset of `coords` along this direction, relative to `start`, when both lie on the same line.
    pub fn offset_from(self, start: Coord2, coords: Coord2) -> Option<Coord> {
        match self {
            Self::Across if coords.0 == start.0 => coords.1.checked_sub(start.1),
            Self::Down if coords.1 == start.1 => coords.0.checked_sub(start.0),
            _ => None,
        }
    }

    /// Applies `steps` moves in this direction, returning a value only when it remains in bounds.
    pub fn advance(self, coords: Coord2, steps: Coord, bounds: Coord2) -> Option<Coord2> {
        let (dr, dc) = self.delta();
        let row = coords.0.checked_add(dr.checked_mul(steps)?)?;
        let col = coords.1.checked_add(dc.checked_mul(steps)?)?;
        (row < bounds.0 && col < bounds.1).then_some((row, col))
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Across => "Across",
            Self::Down => "Down",
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Across
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn advance_stops_at_bounds() {
        assert_eq!(Direction::Across.advance((0, 1), 1, (2, 3)), Some((0, 2)));
        assert_eq!(Direction::Across.advance((0, 2), 1, (2, 3)), None);
        assert_eq!(Direction::Down.advance((0, 2), 1, (2, 3)), Some((1, 2)));
        assert_eq!(Direction::Down.advance((1, 2), 1, (2, 3)), None);
        assert_eq!(Direction::Down.advance((0, 0), 200, (2, 3)), None);
    }

    #[test]
    fn offset_requires_same_line() {
        assert_eq!(Direction::Across.offset_from((1, 5), (1, 8)), Some(3));
        assert_eq!(Direction::Across.offset_from((1, 5), (2, 8)), None);
        assert_eq!(Direction::Across.offset_from((1, 5), (1, 4)), None);
        assert_eq!(Direction::Down.offset_from((1, 5), (4, 5)), Some(3));
    }

    #[test]
    fn coord_iter_is_row_major() {
        let grid: Array2<u8> = Array2::default([2, 3]);
        let coords: Vec<_> = grid.iter_coords().collect();
        assert_eq!(coords, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);

        let empty: Array2<u8> = Array2::default([0, 3]);
        assert_eq!(empty.iter_coords().count(), 0);
    }
}
