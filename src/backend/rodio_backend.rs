//! `AudioBackend` on top of rodio sinks.
//!
//! Each open stream owns a paused `Sink` fed by a `Decoder`. Seeking and
//! restarting rebuild the sink and skip into the file, which works for every
//! format rodio decodes.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::{Result, TonearmError};

use super::fileinfo::{self, StreamInfo};
use super::types::{AudioBackend, StreamHandle, TagKind};

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
fn create_sink_at(output: &OutputStream, path: &Path, start_at: Duration) -> Option<Sink> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("failed to open {:?}: {e}", path);
            return None;
        }
    };
    let decoder = match Decoder::new(BufReader::new(file)) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("failed to decode {:?}: {e}", path);
            return None;
        }
    };

    let sink = Sink::connect_new(output.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Some(sink)
}

struct RodioStream {
    path: PathBuf,
    sink: Sink,
    /// Where the current sink started inside the file.
    offset: Duration,
    info: StreamInfo,
    volume: f32,
    stopped: bool,
}

impl RodioStream {
    fn elapsed(&self) -> Duration {
        if self.stopped {
            return Duration::ZERO;
        }
        self.offset + self.sink.get_pos()
    }
}

pub struct RodioBackend {
    output: OutputStream,
    streams: HashMap<u64, RodioStream>,
    next_id: u64,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open_default() -> Result<Self> {
        let mut output = OutputStreamBuilder::open_default_stream()
            .map_err(|e| TonearmError::AudioOutput(e.to_string()))?;
        // rodio logs to stderr when the OutputStream is dropped, which
        // scribbles over the terminal UI.
        output.log_on_drop(false);

        Ok(Self {
            output,
            streams: HashMap::new(),
            next_id: 1,
        })
    }

    /// Replace the sink of `stream` with one starting at `start_at`,
    /// keeping its paused/playing state.
    fn rebuild(&mut self, handle: StreamHandle, start_at: Duration, play: bool) -> bool {
        let Some(stream) = self.streams.get_mut(&handle.0) else {
            return false;
        };
        let Some(sink) = create_sink_at(&self.output, &stream.path, start_at) else {
            return false;
        };
        stream.sink.stop();
        sink.set_volume(stream.volume);
        if play {
            sink.play();
        }
        stream.sink = sink;
        stream.offset = start_at;
        stream.stopped = false;
        true
    }

    fn stream(&self, handle: StreamHandle) -> Option<&RodioStream> {
        self.streams.get(&handle.0)
    }
}

impl AudioBackend for RodioBackend {
    fn open_stream(&mut self, path: &Path) -> Option<StreamHandle> {
        let sink = create_sink_at(&self.output, path, Duration::ZERO)?;
        let info = fileinfo::read_stream_info(path);
        log::debug!(
            "opened {:?}: {:?}, {} kbps, {} Hz, {} ch",
            path,
            info.duration,
            info.bitrate_kbps,
            info.sample_rate,
            info.channels
        );

        let id = self.next_id;
        self.next_id += 1;
        self.streams.insert(
            id,
            RodioStream {
                path: path.to_path_buf(),
                sink,
                offset: Duration::ZERO,
                info,
                volume: 1.0,
                stopped: false,
            },
        );
        Some(StreamHandle(id))
    }

    fn length(&self, handle: StreamHandle) -> u64 {
        self.stream(handle).map_or(0, |s| {
            let bps = s.info.bytes_per_second();
            (s.info.duration.as_secs_f64() * bps as f64) as u64
        })
    }

    fn bytes_to_seconds(&self, handle: StreamHandle, bytes: u64) -> f64 {
        self.stream(handle)
            .map_or(0.0, |s| bytes as f64 / s.info.bytes_per_second() as f64)
    }

    fn play(&mut self, handle: StreamHandle, restart: bool) -> bool {
        let Some(stream) = self.streams.get(&handle.0) else {
            return false;
        };
        if restart || stream.stopped {
            return self.rebuild(handle, Duration::ZERO, true);
        }
        stream.sink.play();
        true
    }

    fn pause(&mut self, handle: StreamHandle) {
        if let Some(stream) = self.streams.get(&handle.0) {
            stream.sink.pause();
        }
    }

    fn stop(&mut self, handle: StreamHandle) {
        if let Some(stream) = self.streams.get_mut(&handle.0) {
            stream.sink.stop();
            stream.stopped = true;
        }
    }

    fn position(&self, handle: StreamHandle) -> u64 {
        self.stream(handle).map_or(0, |s| {
            (s.elapsed().as_secs_f64() * s.info.bytes_per_second() as f64) as u64
        })
    }

    fn set_position(&mut self, handle: StreamHandle, bytes: u64) -> bool {
        let Some(stream) = self.streams.get(&handle.0) else {
            return false;
        };
        let secs = bytes as f64 / stream.info.bytes_per_second() as f64;
        let play = !stream.stopped && !stream.sink.is_paused();
        self.rebuild(handle, Duration::from_secs_f64(secs), play)
    }

    fn set_volume(&mut self, handle: StreamHandle, volume: f32) {
        if let Some(stream) = self.streams.get_mut(&handle.0) {
            stream.volume = volume.clamp(0.0, 1.0);
            stream.sink.set_volume(stream.volume);
        }
    }

    fn tag(&self, handle: StreamHandle, kind: TagKind) -> Option<Vec<u8>> {
        let stream = self.stream(handle)?;
        match kind {
            TagKind::Id3v2 => match fileinfo::read_id3v2_tag(&stream.path) {
                Ok(tag) => tag,
                Err(e) => {
                    log::debug!("reading ID3v2 tag of {:?} failed: {e}", stream.path);
                    None
                }
            },
            TagKind::Ogg => fileinfo::read_vorbis_comments(&stream.path),
        }
    }

    fn bitrate(&self, handle: StreamHandle) -> f32 {
        self.stream(handle).map_or(0.0, |s| s.info.bitrate_kbps as f32)
    }

    fn frequency(&self, handle: StreamHandle) -> f32 {
        self.stream(handle).map_or(0.0, |s| s.info.sample_rate as f32)
    }

    fn channels(&self, handle: StreamHandle) -> u16 {
        self.stream(handle).map_or(0, |s| s.info.channels)
    }

    fn is_finished(&self, handle: StreamHandle) -> bool {
        self.stream(handle)
            .map_or(true, |s| s.stopped || s.sink.empty())
    }

    fn close_stream(&mut self, handle: StreamHandle) {
        if let Some(stream) = self.streams.remove(&handle.0) {
            stream.sink.stop();
        }
    }
}
