//! Backend handle types and the collaborator contract.

use std::path::Path;

/// Opaque handle to an open stream. Only meaningful to the backend that
/// issued it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub(crate) u64);

/// Which raw tag blob to ask the backend for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagKind {
    /// The complete ID3v2 tag, header included.
    Id3v2,
    /// The Vorbis comment vector flattened as `NAME=value\0...\0\0`.
    Ogg,
}

/// Synchronous audio library contract.
///
/// Every call reports failure through a sentinel (`None`, `false`, `0`);
/// none of them may panic. Positions and lengths are expressed in the
/// backend's byte units; `bytes_to_seconds` is the only timebase conversion.
pub trait AudioBackend {
    /// Open `path` for playback. `None` when the file cannot be decoded.
    fn open_stream(&mut self, path: &Path) -> Option<StreamHandle>;
    /// Total length in bytes.
    fn length(&self, stream: StreamHandle) -> u64;
    fn bytes_to_seconds(&self, stream: StreamHandle, bytes: u64) -> f64;
    /// Start or resume playback; `restart` rewinds to the beginning first.
    fn play(&mut self, stream: StreamHandle, restart: bool) -> bool;
    fn pause(&mut self, stream: StreamHandle);
    fn stop(&mut self, stream: StreamHandle);
    /// Current position in bytes.
    fn position(&self, stream: StreamHandle) -> u64;
    fn set_position(&mut self, stream: StreamHandle, bytes: u64) -> bool;
    /// `volume` in `0.0..=1.0`.
    fn set_volume(&mut self, stream: StreamHandle, volume: f32);
    fn tag(&self, stream: StreamHandle, kind: TagKind) -> Option<Vec<u8>>;
    /// Kilobits per second.
    fn bitrate(&self, stream: StreamHandle) -> f32;
    /// Sample rate in Hz.
    fn frequency(&self, stream: StreamHandle) -> f32;
    fn channels(&self, stream: StreamHandle) -> u16;
    /// True once the stream has run out or was stopped.
    fn is_finished(&self, stream: StreamHandle) -> bool;
    fn close_stream(&mut self, stream: StreamHandle);
}
