use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Clue number as printed in the grid and the clue lists.
pub type ClueNumber = u16;

/// Identifies a clue by its printed number and direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClueId {
    pub number: ClueNumber,
    pub direction: Direction,
}

/// Authoring form of a clue, before it is bound to a grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClueSpec {
    pub number: ClueNumber,
    pub text: String,
    pub start: Coord2,
}

impl ClueSpec {
    pub fn new(number: ClueNumber, text: impl Into<String>, start: Coord2) -> Self {
        Self {
            number,
            text: text.into(),
            start,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub number: ClueNumber,
    pub text: String,
    pub direction: Direction,
    pub start: Coord2,
    /// Derived from the grid, never declared by the content.
    pub len: Coord,
}

impl Clue {
    pub fn id(&self) -> ClueId {
        ClueId {
            number: self.number,
            direction: self.direction,
        }
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            direction: self.direction,
            len: self.len,
        }
    }
}

/// Contiguous range of open cells covered by a clue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: Coord2,
    pub direction: Direction,
    pub len: Coord,
}

impl Span {
    pub fn position_of(&self, coords: Coord2) -> Option<Coord> {
        self.direction
            .offset_from(self.start, coords)
            .filter(|&offset| offset < self.len)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.position_of(coords).is_some()
    }

    /// The cell following `coords` inside this span, `None` at the end of the word.
    pub fn next_after(&self, coords: Coord2) -> Option<Coord2> {
        let offset = self.position_of(coords)?;
        if offset + 1 >= self.len {
            return None;
        }
        self.direction
            .advance(self.start, offset + 1, (Coord::MAX, Coord::MAX))
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + use<> {
        let span = *self;
        (0..span.len).filter_map(move |offset| {
            span.direction
                .advance(span.start, offset, (Coord::MAX, Coord::MAX))
        })
    }
}

/// The clues covering a single cell, either may be absent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellClues<T> {
    pub across: Option<T>,
    pub down: Option<T>,
}

impl<T> Default for CellClues<T> {
    fn default() -> Self {
        Self {
            across: None,
            down: None,
        }
    }
}

impl<T> CellClues<T> {
    pub fn get(&self, direction: Direction) -> Option<&T> {
        match direction {
            Direction::Across => self.across.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.across.is_none() && self.down.is_none()
    }

    pub fn is_both(&self) -> bool {
        self.across.is_some() && self.down.is_some()
    }
}

/// Content audit finding from [`Crossword::check_consistency`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContentIssue {
    /// The clue starts in the middle of a run of open cells.
    StartsMidWord(ClueId),
    /// Two clues share a number and direction.
    DuplicateClue(ClueId),
}

/// Grid plus bound clue lists, with a precomputed cell to clue table.
#[derive(Clone, Debug, PartialEq)]
pub struct Crossword {
    grid: Grid,
    across: Vec<Clue>,
    down: Vec<Clue>,
    cell_clues: Array2<CellClues<usize>>,
}

impl Crossword {
    pub fn new(grid: Grid, across: Vec<ClueSpec>, down: Vec<ClueSpec>) -> Result<Self> {
        let across = Self::bind(&grid, across, Direction::Across)?;
        let down = Self::bind(&grid, down, Direction::Down)?;

        let mut puzzle = Self {
            cell_clues: Array2::default(grid.size().to_nd_index()),
            grid,
            across,
            down,
        };
        for coords in puzzle.grid.iter_coords() {
            let found = puzzle.find_clue_indices(coords);
            puzzle.cell_clues[coords.to_nd_index()] = found;
        }
        log::debug!(
            "crossword {:?}: {} across, {} down",
            puzzle.size(),
            puzzle.across.len(),
            puzzle.down.len()
        );
        Ok(puzzle)
    }

    /// Parses `rows` with [`BLOCKED`] as the blocked marker and binds the clue lists.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        across: Vec<ClueSpec>,
        down: Vec<ClueSpec>,
    ) -> Result<Self> {
        Self::new(Grid::parse(rows, BLOCKED)?, across, down)
    }

    fn bind(grid: &Grid, specs: Vec<ClueSpec>, direction: Direction) -> Result<Vec<Clue>> {
        let size = grid.size();
        specs
            .into_iter()
            .map(|spec| {
                if spec.start.0 >= size.0 || spec.start.1 >= size.1 {
                    return Err(PuzzleError::InvalidCoords);
                }
                if !grid.is_open(spec.start) {
                    return Err(PuzzleError::BlockedClueStart(
                        spec.number,
                        direction,
                        spec.start,
                    ));
                }
                Ok(Clue {
                    len: grid.run_len(spec.start, direction),
                    number: spec.number,
                    text: spec.text,
                    direction,
                    start: spec.start,
                })
            })
            .collect()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn clues(&self, direction: Direction) -> &[Clue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }

    pub fn clue(&self, id: ClueId) -> Option<&Clue> {
        self.clues(id.direction)
            .iter()
            .find(|clue| clue.number == id.number)
    }

    pub fn expected_at(&self, coords: Coord2) -> Option<char> {
        self.grid.square_at(coords).letter()
    }

    /// Scans the clue lists for the across and down clues whose spans contain `coords`.
    pub fn find_clues(&self, coords: Coord2) -> CellClues<&Clue> {
        let found = self.find_clue_indices(coords);
        self.resolve(found)
    }

    /// Same answer as [`Self::find_clues`], served from the table built at load time.
    pub fn clues_at(&self, coords: Coord2) -> CellClues<&Clue> {
        if !self.grid.is_open(coords) {
            return CellClues::default();
        }
        self.resolve(self.cell_clues[coords.to_nd_index()])
    }

    pub fn clue_at(&self, coords: Coord2, direction: Direction) -> Option<&Clue> {
        match direction {
            Direction::Across => self.clues_at(coords).across,
            Direction::Down => self.clues_at(coords).down,
        }
    }

    /// Number printed in the corner of a cell that starts a word.
    pub fn clue_number_at(&self, coords: Coord2) -> Option<ClueNumber> {
        let CellClues { across, down } = self.clues_at(coords);
        across
            .filter(|clue| clue.start == coords)
            .or(down.filter(|clue| clue.start == coords))
            .map(|clue| clue.number)
    }

    /// Content audit, meant for load-time logging and tests. Never fatal for a session.
    pub fn check_consistency(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();
        for direction in Direction::ALL {
            let clues = self.clues(direction);
            for (index, clue) in clues.iter().enumerate() {
                if !self.grid.starts_run(clue.start, direction) {
                    issues.push(ContentIssue::StartsMidWord(clue.id()));
                }
                if clues[..index].iter().any(|prev| prev.number == clue.number) {
                    issues.push(ContentIssue::DuplicateClue(clue.id()));
                }
            }
        }
        issues
    }

    fn find_clue_indices(&self, coords: Coord2) -> CellClues<usize> {
        if !self.grid.is_open(coords) {
            return CellClues::default();
        }
        let find = |clues: &[Clue]| clues.iter().position(|clue| clue.span().contains(coords));
        CellClues {
            across: find(&self.across),
            down: find(&self.down),
        }
    }

    fn resolve(&self, indices: CellClues<usize>) -> CellClues<&Clue> {
        CellClues {
            across: indices.across.and_then(|index| self.across.get(index)),
            down: indices.down.and_then(|index| self.down.get(index)),
        }
    }
}
