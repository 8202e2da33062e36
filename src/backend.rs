//! The audio backend seam.
//!
//! The playback core never decodes audio itself: it drives an
//! [`AudioBackend`] through opaque stream handles, the way a BASS-style
//! library is driven. `RodioBackend` is the real implementation (rodio for
//! output, lofty for stream properties and tags); tests use the in-memory
//! `mock::MockBackend`.

mod fileinfo;
mod rodio_backend;
mod types;

#[cfg(test)]
pub mod mock;

pub use rodio_backend::RodioBackend;
pub use types::*;
