#![no_std]

extern crate alloc;

pub use crossword::*;
pub use entry::*;
pub use error::*;
pub use grid::*;
pub use matching::*;
pub use settings::*;
pub use state::*;
pub use types::*;

pub mod catalog;
mod crossword;
mod entry;
mod error;
mod grid;
mod matching;
mod settings;
mod state;
mod types;
