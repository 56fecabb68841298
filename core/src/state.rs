use alloc::string::String;
use core::cell::RefCell;
use serde::{Deserialize, Serialize};

use crate::*;

/// Bumped whenever the serialized shape of [`ViewState`] changes.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameTab {
    Crossword,
    Connections,
}

impl Default for GameTab {
    fn default() -> Self {
        Self::Crossword
    }
}

/// Everything a page session mutates, owned in one place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub tab: GameTab,
    pub crossword: CrosswordSession,
    pub matching: MatchingGame,
}

impl ViewState {
    pub fn new(puzzle: &Crossword, set: &CategorySet, seed: u64) -> Self {
        Self {
            tab: GameTab::default(),
            crossword: CrosswordSession::new(puzzle),
            matching: MatchingGame::new(set, seed),
        }
    }

    pub fn fits(&self, puzzle: &Crossword, set: &CategorySet) -> bool {
        self.crossword.fits(puzzle) && self.matching.fits(set)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            state: self.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub state: ViewState,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

impl Snapshot {
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|_| PuzzleError::SnapshotFormat)
    }

    /// Decodes a snapshot, rejecting unknown versions before looking at the state payload.
    pub fn decode(data: &str) -> Result<Self> {
        let header: SnapshotHeader =
            serde_json::from_str(data).map_err(|_| PuzzleError::SnapshotFormat)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(PuzzleError::SnapshotVersion(header.version));
        }
        serde_json::from_str(data).map_err(|_| PuzzleError::SnapshotFormat)
    }

    /// Unwraps the state if it matches the loaded content.
    pub fn into_state(self, puzzle: &Crossword, set: &CategorySet) -> Result<ViewState> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PuzzleError::SnapshotVersion(self.version));
        }
        if !self.state.fits(puzzle, set) {
            return Err(PuzzleError::SnapshotMismatch);
        }
        Ok(self.state)
    }
}

/// Key-value persistence of the whole view state. Saving is fire-and-forget.
pub trait SnapshotStore {
    fn load(&self) -> Option<Snapshot>;
    fn save(&self, snapshot: &Snapshot);
}

/// Restores the previous session from `store`, or starts a fresh one when there is nothing usable.
pub fn restore_or_new<S: SnapshotStore + ?Sized>(
    store: &S,
    puzzle: &Crossword,
    set: &CategorySet,
    seed: u64,
) -> ViewState {
    match store.load().map(|snapshot| snapshot.into_state(puzzle, set)) {
        Some(Ok(state)) => {
            log::debug!("restored saved session");
            state
        }
        Some(Err(err)) => {
            log::warn!("discarding saved session: {}", err);
            ViewState::new(puzzle, set, seed)
        }
        None => ViewState::new(puzzle, set, seed),
    }
}

/// In-memory store holding the encoded snapshot, as a browser storage entry would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(data: impl Into<String>) -> Self {
        Self {
            data: RefCell::new(Some(data.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        let data = self.data.borrow();
        let data = data.as_deref()?;
        match Snapshot::decode(data) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("stored snapshot unreadable: {}", err);
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) {
        match snapshot.encode() {
            Ok(data) => *self.data.borrow_mut() = Some(data),
            Err(err) => log::warn!("snapshot not saved: {}", err),
        }
    }
}
