//! The playlist engine.
//!
//! Tracks live in an arena keyed by `TrackId`. The display order is what the
//! user sees and rearranges; the play order is what next/previous walk and
//! is either a copy of the display order or a shuffled permutation with the
//! current track first.

mod engine;
pub mod files;
mod model;
pub mod order;

pub use engine::{Order, Playlist};
pub use model::{FileFormat, Track, TrackId};

#[cfg(test)]
mod tests;
