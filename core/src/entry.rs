use bitflags::bitflags;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Pointer gesture that activated a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Single,
    Double,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InteractOutcome {
    NoChange,
    Highlighted(ClueId),
}

impl InteractOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Highlighted(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EntryOutcome {
    NoChange,
    Written {
        correct: bool,
        /// Cell that receives focus next, `None` when focus stays put.
        next: Option<Coord2>,
    },
    Erased,
}

impl EntryOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

bitflags! {
    /// Render-facing status of a single cell.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CellStatus: u8 {
        const OPEN        = 1;
        const FILLED      = 1 << 1;
        const LOCKED      = 1 << 2;
        const ERROR       = 1 << 3;
        const HIGHLIGHTED = 1 << 4;
        const FOCUSED     = 1 << 5;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Activation {
    coords: Coord2,
    at: Instant,
}

/// Mutable crossword state: the entry grid, active direction, highlighted clue and focus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrosswordSession {
    entries: Array2<Option<char>>,
    direction: Direction,
    highlight: Option<ClueId>,
    focus: Option<Coord2>,
    #[serde(skip)]
    last_activation: Option<Activation>,
}

impl CrosswordSession {
    pub fn new(puzzle: &Crossword) -> Self {
        Self {
            entries: Array2::default(puzzle.size().to_nd_index()),
            direction: Direction::default(),
            highlight: None,
            focus: None,
            last_activation: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn highlight(&self) -> Option<ClueId> {
        self.highlight
    }

    pub fn focus(&self) -> Option<Coord2> {
        self.focus
    }

    pub fn entry_at(&self, coords: Coord2) -> Option<char> {
        if self.entries.contains_coords(coords) {
            self.entries[coords.to_nd_index()]
        } else {
            None
        }
    }

    /// Resolves the clue to highlight for a pointer activation of `coords`.
    pub fn interact(
        &mut self,
        puzzle: &Crossword,
        coords: Coord2,
        gesture: Gesture,
        policy: DirectionPolicy,
        now: Instant,
    ) -> InteractOutcome {
        let clues = puzzle.clues_at(coords);
        if clues.is_empty() {
            return InteractOutcome::NoChange;
        }

        let preferred = match policy {
            DirectionPolicy::Toggle { .. } => {
                let repeat = self
                    .last_activation
                    .filter(|last| last.coords == coords)
                    .map(|last| now.saturating_duration_since(last.at));
                match repeat {
                    Some(elapsed) if elapsed < policy.debounce() => {
                        log::trace!("activation of {:?} debounced", coords);
                        return InteractOutcome::NoChange;
                    }
                    Some(_) if clues.is_both() => self.direction.flip(),
                    Some(_) => self.direction,
                    None => Direction::Across,
                }
            }
            DirectionPolicy::Gesture => match gesture {
                Gesture::Single => Direction::Across,
                Gesture::Double => Direction::Down,
            },
        };

        let direction = if clues.get(preferred).is_some() {
            preferred
        } else {
            preferred.flip()
        };
        let Some(clue) = clues.get(direction) else {
            return InteractOutcome::NoChange;
        };

        let id = clue.id();
        self.direction = direction;
        self.highlight = Some(id);
        self.focus = Some(coords);
        self.last_activation = Some(Activation { coords, at: now });
        log::debug!("highlight {} {} from {:?}", id.number, direction, coords);
        InteractOutcome::Highlighted(id)
    }

    /// Writes a typed character into an open cell and decides where focus goes next.
    pub fn enter(
        &mut self,
        puzzle: &Crossword,
        coords: Coord2,
        ch: char,
        policy: EntryPolicy,
    ) -> EntryOutcome {
        let Some(expected) = puzzle.expected_at(coords) else {
            return EntryOutcome::NoChange;
        };
        let Some(letter) = normalize_entry(ch) else {
            return EntryOutcome::NoChange;
        };
        if policy.is_strict() && self.is_correct_at(puzzle, coords) {
            return EntryOutcome::NoChange;
        }

        self.entries[coords.to_nd_index()] = Some(letter);

        let correct = letter == expected;
        let next = if correct || !policy.is_strict() {
            self.activate_word_at(puzzle, coords)
                .and_then(|span| span.next_after(coords))
        } else {
            None
        };
        self.focus = Some(next.unwrap_or(coords));
        log::trace!("enter {:?} at {:?}, next {:?}", letter, coords, next);

        EntryOutcome::Written { correct, next }
    }

    /// Clears an entry, as with backspace on a filled cell.
    pub fn erase(&mut self, puzzle: &Crossword, coords: Coord2, policy: EntryPolicy) -> EntryOutcome {
        if !puzzle.grid().is_open(coords) || self.entry_at(coords).is_none() {
            return EntryOutcome::NoChange;
        }
        if policy.is_strict() && self.is_correct_at(puzzle, coords) {
            return EntryOutcome::NoChange;
        }
        self.entries[coords.to_nd_index()] = None;
        self.focus = Some(coords);
        EntryOutcome::Erased
    }

    pub fn cell_status(&self, puzzle: &Crossword, coords: Coord2, policy: EntryPolicy) -> CellStatus {
        let Some(expected) = puzzle.expected_at(coords) else {
            return CellStatus::empty();
        };

        let mut status = CellStatus::OPEN;
        if let Some(entered) = self.entry_at(coords) {
            status |= CellStatus::FILLED;
            if policy.is_strict() {
                status |= if entered == expected {
                    CellStatus::LOCKED
                } else {
                    CellStatus::ERROR
                };
            }
        }
        if self.is_highlighted(puzzle, coords) {
            status |= CellStatus::HIGHLIGHTED;
        }
        if self.focus == Some(coords) {
            status |= CellStatus::FOCUSED;
        }
        status
    }

    pub fn is_highlighted(&self, puzzle: &Crossword, coords: Coord2) -> bool {
        self.highlight
            .and_then(|id| puzzle.clue(id))
            .is_some_and(|clue| clue.span().contains(coords))
    }

    pub fn filled_count(&self) -> CellCount {
        self.entries
            .iter()
            .filter(|entry| entry.is_some())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn is_solved(&self, puzzle: &Crossword) -> bool {
        puzzle
            .grid()
            .iter_coords()
            .all(|coords| match puzzle.expected_at(coords) {
                Some(expected) => self.entry_at(coords) == Some(expected),
                None => true,
            })
    }

    pub fn reset(&mut self) {
        self.entries.fill(None);
        self.direction = Direction::default();
        self.highlight = None;
        self.focus = None;
        self.last_activation = None;
    }

    /// Whether a restored session can be used with `puzzle`.
    pub fn fits(&self, puzzle: &Crossword) -> bool {
        self.entries.grid_size() == puzzle.size()
            && self
                .entries
                .iter_coords()
                .all(|coords| self.entry_at(coords).is_none() || puzzle.grid().is_open(coords))
            && self.highlight.is_none_or(|id| puzzle.clue(id).is_some())
            && self.focus.is_none_or(|coords| puzzle.grid().is_open(coords))
    }

    fn is_correct_at(&self, puzzle: &Crossword, coords: Coord2) -> bool {
        self.entry_at(coords)
            .is_some_and(|entered| Some(entered) == puzzle.expected_at(coords))
    }

    /// The word being typed into: the clue in the active direction, else the crossing clue,
    /// which then becomes active.
    fn activate_word_at(&mut self, puzzle: &Crossword, coords: Coord2) -> Option<Span> {
        let clues = puzzle.clues_at(coords);
        let direction = if clues.get(self.direction).is_some() {
            self.direction
        } else {
            self.direction.flip()
        };
        let clue = clues.get(direction)?;
        self.direction = direction;
        self.highlight = Some(clue.id());
        Some(clue.span())
    }
}

/// Uppercases a typed character. Any visible character is accepted; ones
/// without a single-character uppercase form are kept as typed.
pub fn normalize_entry(ch: char) -> Option<char> {
    if ch.is_whitespace() || ch.is_control() {
        return None;
    }
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(letter), None) => Some(letter),
        _ => Some(ch),
    }
}
