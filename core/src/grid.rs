use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Character marking a blocked cell in textual grids.
pub const BLOCKED: char = '#';

/// Immutable puzzle content of a single grid position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Square {
    Blocked,
    Open(char),
}

impl Square {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub const fn letter(self) -> Option<char> {
        match self {
            Self::Open(letter) => Some(letter),
            Self::Blocked => None,
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::Blocked
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    squares: Array2<Square>,
}

impl Grid {
    /// Builds a grid from equal-length rows where `blocked` marks blocked cells and every other
    /// character is the expected letter of an open cell.
    pub fn parse<S: AsRef<str>>(rows: &[S], blocked: char) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if height == 0 || width == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        if height > Coord::MAX.into() || width > Coord::MAX.into() {
            return Err(PuzzleError::GridTooLarge);
        }

        let mut squares = Array2::default([height, width]);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(PuzzleError::RaggedGrid(row_index));
            }
            for (col_index, ch) in row.chars().enumerate() {
                squares[[row_index, col_index]] = match ch {
                    ch if ch == blocked => Square::Blocked,
                    ch if ch.is_ascii_alphabetic() => Square::Open(ch.to_ascii_uppercase()),
                    ch => return Err(PuzzleError::InvalidCharacter(ch)),
                };
            }
        }

        Ok(Self { squares })
    }

    pub fn size(&self) -> Coord2 {
        self.squares.grid_size()
    }

    pub fn square_at(&self, coords: Coord2) -> Square {
        if self.squares.contains_coords(coords) {
            self.squares[coords.to_nd_index()]
        } else {
            Square::Blocked
        }
    }

    pub fn is_open(&self, coords: Coord2) -> bool {
        self.square_at(coords).is_open()
    }

    pub fn open_cell_count(&self) -> CellCount {
        self.squares
            .iter()
            .filter(|square| square.is_open())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Length of the run of open cells starting at `start` in `direction`, stopping at the first
    /// blocked cell or the grid edge.
    pub fn run_len(&self, start: Coord2, direction: Direction) -> Coord {
        let bounds = self.size();
        let mut len = 0;
        while let Some(coords) = direction.advance(start, len, bounds) {
            if !self.is_open(coords) {
                break;
            }
            len += 1;
        }
        len
    }

    /// Whether `coords` begins a run, ie. the previous cell in `direction` is blocked or outside.
    pub fn starts_run(&self, coords: Coord2, direction: Direction) -> bool {
        if !self.is_open(coords) {
            return false;
        }
        let prev = match direction {
            Direction::Across => coords.1.checked_sub(1).map(|col| (coords.0, col)),
            Direction::Down => coords.0.checked_sub(1).map(|row| (row, coords.1)),
        };
        prev.is_none_or(|prev| !self.is_open(prev))
    }

    pub fn iter_coords(&self) -> CoordIter {
        self.squares.iter_coords()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uppercases_letters_and_marks_blocks() {
        let grid = Grid::parse(&["#ab", "c#d"], BLOCKED).unwrap();

        assert_eq!(grid.size(), (2, 3));
        assert_eq!(grid.square_at((0, 0)), Square::Blocked);
        assert_eq!(grid.square_at((0, 1)), Square::Open('A'));
        assert_eq!(grid.square_at((1, 2)), Square::Open('D'));
        assert_eq!(grid.open_cell_count(), 4);
    }

    #[test]
    fn parse_rejects_malformed_rows() {
        assert_eq!(
            Grid::parse::<&str>(&[], BLOCKED),
            Err(PuzzleError::EmptyGrid)
        );
        assert_eq!(
            Grid::parse(&["ABC", "AB"], BLOCKED),
            Err(PuzzleError::RaggedGrid(1))
        );
        assert_eq!(
            Grid::parse(&["A1C"], BLOCKED),
            Err(PuzzleError::InvalidCharacter('1'))
        );
    }

    #[test]
    fn run_len_stops_at_blocked_cells_and_edges() {
        let grid = Grid::parse(&["#####DEFEAT####"], BLOCKED).unwrap();

        assert_eq!(grid.run_len((0, 5), Direction::Across), 6);
        assert_eq!(grid.run_len((0, 8), Direction::Across), 3);
        assert_eq!(grid.run_len((0, 4), Direction::Across), 0);
        assert_eq!(grid.run_len((0, 5), Direction::Down), 1);
    }

    #[test]
    fn run_len_never_wraps_rows() {
        let grid = Grid::parse(&["#AB", "CD#"], BLOCKED).unwrap();

        assert_eq!(grid.run_len((0, 1), Direction::Across), 2);
        assert_eq!(grid.run_len((0, 2), Direction::Down), 1);
    }

    #[test]
    fn starts_run_checks_previous_cell() {
        let grid = Grid::parse(&["#AB", "CD#"], BLOCKED).unwrap();

        assert!(grid.starts_run((0, 1), Direction::Across));
        assert!(!grid.starts_run((0, 2), Direction::Across));
        assert!(grid.starts_run((1, 0), Direction::Across));
        assert!(grid.starts_run((0, 1), Direction::Down));
        assert!(!grid.starts_run((1, 1), Direction::Down));
        assert!(!grid.starts_run((0, 0), Direction::Down));
    }
}
