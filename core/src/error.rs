use thiserror::Error;

use crate::{Coord2, Direction};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid has no cells")]
    EmptyGrid,
    #[error("Grid is too large")]
    GridTooLarge,
    #[error("Grid row {0} length does not match the first row")]
    RaggedGrid(usize),
    #[error("Invalid grid character {0:?}")]
    InvalidCharacter(char),
    #[error("{1} clue {0} starts on a blocked cell at {2:?}")]
    BlockedClueStart(u16, Direction, Coord2),
    #[error("Category {0} must have exactly four words")]
    CategorySize(usize),
    #[error("Too many category words")]
    TooManyWords,
    #[error("Word appears in more than one place")]
    DuplicateWord,
    #[error("Snapshot version {0} is not supported")]
    SnapshotVersion(u32),
    #[error("Snapshot could not be decoded")]
    SnapshotFormat,
    #[error("Snapshot does not match the loaded puzzle content")]
    SnapshotMismatch,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
