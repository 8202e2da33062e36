//! Hand-rolled decoders for the tag blobs handed out by the audio backend.
//!
//! `id3v2` understands the ID3v2.3 frame layout found at the head of MP3
//! files, `ogg` the flattened Vorbis comment vector (`NAME=value\0...\0\0`)
//! and `picture` locates embedded JPEG/PNG album art inside an APIC frame.
//! Every function here is total: malformed or truncated input produces
//! partial (or empty) metadata, never a panic.

pub mod id3v2;
pub mod ogg;
mod model;
mod picture;

pub use model::*;
pub use picture::extract_attached_picture;

#[cfg(test)]
mod tests;
