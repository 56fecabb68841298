use core::time::Duration;
use serde::{Deserialize, Serialize};

/// How typed letters interact with correctness.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryPolicy {
    /// Advance only on a correct letter, lock correct cells and flag wrong ones.
    Strict,
    /// Always advance, never lock or flag.
    Lenient,
}

impl EntryPolicy {
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl Default for EntryPolicy {
    fn default() -> Self {
        Self::Strict
    }
}

/// How pointer activations on a cell pick the active direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionPolicy {
    /// Activating the same cell again flips between across and down, ignoring repeats that
    /// arrive within `debounce_ms` of the previous activation.
    Toggle { debounce_ms: u32 },
    /// Single activation selects across, double activation selects down.
    Gesture,
}

impl DirectionPolicy {
    pub const DEFAULT_DEBOUNCE_MS: u32 = 300;

    pub const fn debounce(self) -> Duration {
        match self {
            Self::Toggle { debounce_ms } => Duration::from_millis(debounce_ms as u64),
            Self::Gesture => Duration::ZERO,
        }
    }
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        Self::Toggle {
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub entry_policy: EntryPolicy,
    pub direction_policy: DirectionPolicy,
}
