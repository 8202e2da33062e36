//! In-memory `AudioBackend` used by the player and app tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::types::{AudioBackend, StreamHandle, TagKind};

/// 44.1 kHz, stereo, 16-bit.
pub const BYTES_PER_SECOND: u64 = 176_400;

#[derive(Debug, Clone)]
pub struct MockFile {
    pub seconds: u64,
    pub bitrate: f32,
    pub frequency: f32,
    pub channels: u16,
    pub id3v2: Option<Vec<u8>>,
    pub ogg: Option<Vec<u8>>,
}

impl Default for MockFile {
    fn default() -> Self {
        Self {
            seconds: 180,
            bitrate: 128.4,
            frequency: 44_100.0,
            channels: 2,
            id3v2: None,
            ogg: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockStatus {
    Idle,
    Playing,
    Paused,
    Stopped,
}

#[derive(Debug)]
struct MockStream {
    path: PathBuf,
    position: u64,
    volume: f32,
    status: MockStatus,
    finished: bool,
}

#[derive(Debug, Default)]
pub struct MockBackend {
    files: HashMap<PathBuf, MockFile>,
    streams: HashMap<u64, MockStream>,
    next_id: u64,
    /// Every path passed to `open_stream`, successful or not.
    pub opened: Vec<PathBuf>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, file: MockFile) -> Self {
        self.add_file(path, file);
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, file: MockFile) {
        self.files.insert(path.into(), file);
    }

    pub fn remove_file(&mut self, path: &Path) {
        self.files.remove(path);
    }

    /// Make `handle` report end of stream on the next poll.
    pub fn finish(&mut self, handle: StreamHandle) {
        if let Some(stream) = self.streams.get_mut(&handle.0) {
            stream.finished = true;
            stream.status = MockStatus::Stopped;
        }
    }

    pub fn status(&self, handle: StreamHandle) -> Option<MockStatus> {
        self.streams.get(&handle.0).map(|s| s.status)
    }

    pub fn volume(&self, handle: StreamHandle) -> Option<f32> {
        self.streams.get(&handle.0).map(|s| s.volume)
    }

    pub fn path_of(&self, handle: StreamHandle) -> Option<&Path> {
        self.streams.get(&handle.0).map(|s| s.path.as_path())
    }

    pub fn live_streams(&self) -> usize {
        self.streams.len()
    }

    fn file_of(&self, handle: StreamHandle) -> Option<&MockFile> {
        let stream = self.streams.get(&handle.0)?;
        self.files.get(&stream.path)
    }
}

impl AudioBackend for MockBackend {
    fn open_stream(&mut self, path: &Path) -> Option<StreamHandle> {
        self.opened.push(path.to_path_buf());
        if !self.files.contains_key(path) {
            return None;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.streams.insert(
            id,
            MockStream {
                path: path.to_path_buf(),
                position: 0,
                volume: 1.0,
                status: MockStatus::Idle,
                finished: false,
            },
        );
        Some(StreamHandle(id))
    }

    fn length(&self, handle: StreamHandle) -> u64 {
        self.file_of(handle)
            .map_or(0, |f| f.seconds * BYTES_PER_SECOND)
    }

    fn bytes_to_seconds(&self, handle: StreamHandle, bytes: u64) -> f64 {
        if self.streams.contains_key(&handle.0) {
            bytes as f64 / BYTES_PER_SECOND as f64
        } else {
            0.0
        }
    }

    fn play(&mut self, handle: StreamHandle, restart: bool) -> bool {
        let Some(stream) = self.streams.get_mut(&handle.0) else {
            return false;
        };
        if restart || stream.status == MockStatus::Stopped {
            stream.position = 0;
        }
        stream.status = MockStatus::Playing;
        stream.finished = false;
        true
    }

    fn pause(&mut self, handle: StreamHandle) {
        if let Some(stream) = self.streams.get_mut(&handle.0) {
            stream.status = MockStatus::Paused;
        }
    }

    fn stop(&mut self, handle: StreamHandle) {
        if let Some(stream) = self.streams.get_mut(&handle.0) {
            stream.status = MockStatus::Stopped;
        }
    }

    fn position(&self, handle: StreamHandle) -> u64 {
        self.streams.get(&handle.0).map_or(0, |s| s.position)
    }

    fn set_position(&mut self, handle: StreamHandle, bytes: u64) -> bool {
        let length = self.length(handle);
        match self.streams.get_mut(&handle.0) {
            Some(stream) => {
                stream.position = bytes.min(length);
                true
            }
            None => false,
        }
    }

    fn set_volume(&mut self, handle: StreamHandle, volume: f32) {
        if let Some(stream) = self.streams.get_mut(&handle.0) {
            stream.volume = volume;
        }
    }

    fn tag(&self, handle: StreamHandle, kind: TagKind) -> Option<Vec<u8>> {
        let file = self.file_of(handle)?;
        match kind {
            TagKind::Id3v2 => file.id3v2.clone(),
            TagKind::Ogg => file.ogg.clone(),
        }
    }

    fn bitrate(&self, handle: StreamHandle) -> f32 {
        self.file_of(handle).map_or(0.0, |f| f.bitrate)
    }

    fn frequency(&self, handle: StreamHandle) -> f32 {
        self.file_of(handle).map_or(0.0, |f| f.frequency)
    }

    fn channels(&self, handle: StreamHandle) -> u16 {
        self.file_of(handle).map_or(0, |f| f.channels)
    }

    fn is_finished(&self, handle: StreamHandle) -> bool {
        self.streams.get(&handle.0).map_or(true, |s| {
            s.finished || matches!(s.status, MockStatus::Idle | MockStatus::Stopped)
        })
    }

    fn close_stream(&mut self, handle: StreamHandle) {
        self.streams.remove(&handle.0);
    }
}
