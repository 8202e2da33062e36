use std::path::PathBuf;

use crate::backend::{AudioBackend, StreamHandle};
use crate::metadata::{file_info_text, format_duration, title_or_file_name};
use crate::playlist::{Order, Playlist};

use super::state::{InfoLabels, PlayOutcome, PlayerState, PositionBar};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Playback state machine.
///
/// Owns the backend, the playlist and the single open stream, and keeps the
/// published labels and position bar in step with them. The stream is only
/// polled, from `tick`.
pub struct Player<B: AudioBackend> {
    backend: B,
    playlist: Playlist,
    stream: Option<StreamHandle>,
    state: PlayerState,
    /// 0..=100
    volume: u8,
    repeat: bool,
    labels: InfoLabels,
    position: PositionBar,
    /// Ticks left before a flashed title is restored.
    title_flash: Option<u32>,
    flash_ticks: u32,
}

impl<B: AudioBackend> Player<B> {
    pub fn new(backend: B, playlist: Playlist, volume: u8, flash_ticks: u32) -> Self {
        Self {
            backend,
            playlist,
            stream: None,
            state: PlayerState::Stopped,
            volume: volume.min(100),
            repeat: false,
            labels: InfoLabels::default(),
            position: PositionBar::default(),
            title_flash: None,
            flash_ticks,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn shuffle(&self) -> bool {
        self.playlist.shuffle()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn labels(&self) -> &InfoLabels {
        &self.labels
    }

    pub fn position_bar(&self) -> PositionBar {
        self.position
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[cfg(test)]
    pub fn stream(&self) -> Option<StreamHandle> {
        self.stream
    }

    // ---- transport ----

    pub fn play(&mut self) -> PlayOutcome {
        let Some(stream) = self.stream else {
            return self.play_without_stream();
        };

        match self.state {
            PlayerState::Playing => {
                self.backend.play(stream, true);
                self.position.pos = 0;
                PlayOutcome::Playing
            }
            PlayerState::Paused => {
                self.backend.play(stream, false);
                self.state = PlayerState::Playing;
                PlayOutcome::Playing
            }
            PlayerState::Stopped => {
                if let Some(track) = self.playlist.current() {
                    let (secs, text) = (track.duration_secs, track.duration_text.clone());
                    self.backend.play(stream, true);
                    self.position.reset(secs, 0);
                    self.labels.time_length = text;
                    self.state = PlayerState::Playing;
                    return PlayOutcome::Playing;
                }

                // The current track was removed while stopped.
                self.labels.clear();
                self.release_stream();
                if self.playlist.is_empty() {
                    return PlayOutcome::EmptyPlaylist;
                }
                if !self.advance(Direction::Forward) {
                    return PlayOutcome::NothingPlayable;
                }
                self.update_labels(true);
                self.start_stream();
                PlayOutcome::Playing
            }
        }
    }

    fn play_without_stream(&mut self) -> PlayOutcome {
        if self.playlist.is_empty() {
            return PlayOutcome::EmptyPlaylist;
        }
        if self.playlist.current_id().is_none() {
            if let Some(first) = self.playlist.id_at(Order::Play, 0) {
                self.playlist.set_current(first);
            }
        }
        if !self.load_current() {
            return PlayOutcome::NothingPlayable;
        }
        self.update_labels(true);
        self.start_stream();
        PlayOutcome::Playing
    }

    /// Toggle between playing and paused. Ignored when stopped.
    pub fn pause(&mut self) {
        let Some(stream) = self.stream else {
            return;
        };
        match self.state {
            PlayerState::Paused => {
                self.backend.play(stream, false);
                self.state = PlayerState::Playing;
            }
            PlayerState::Playing => {
                self.backend.pause(stream);
                self.state = PlayerState::Paused;
            }
            PlayerState::Stopped => {}
        }
    }

    pub fn stop(&mut self) {
        let Some(stream) = self.stream else {
            return;
        };
        self.backend.stop(stream);

        if matches!(self.state, PlayerState::Playing | PlayerState::Paused) {
            self.labels.time_position.clear();
            self.labels.time_length.clear();
            self.position.reset(0, 0);
        }
        if self.playlist.current_id().is_none() {
            self.labels.clear();
            self.release_stream();
        }
        self.state = PlayerState::Stopped;
    }

    pub fn next(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let has_next = match self.playlist.current_index(Order::Play) {
            Some(cur) => cur + 1 < self.playlist.len(),
            None => true,
        };
        if self.repeat || has_next {
            self.skip(Direction::Forward);
        }
    }

    pub fn prev(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let has_prev = self
            .playlist
            .current_index(Order::Play)
            .is_some_and(|cur| cur > 0);
        if self.repeat || has_prev {
            self.skip(Direction::Backward);
        }
    }

    fn skip(&mut self, direction: Direction) {
        self.release_stream();
        if !self.advance(direction) {
            return;
        }
        if matches!(self.state, PlayerState::Playing | PlayerState::Paused) {
            self.update_labels(true);
            self.start_stream();
        } else {
            self.update_labels(false);
            self.position.reset(0, 0);
        }
    }

    /// Make the track at `display_index` current and play it.
    pub fn play_track_at(&mut self, display_index: usize) {
        let Some(id) = self.playlist.id_at(Order::Display, display_index) else {
            return;
        };
        self.playlist.set_current(id);
        if self.load_current() {
            self.update_labels(true);
            self.start_stream();
        } else {
            self.state = PlayerState::Stopped;
        }
    }

    /// Load the next candidate in play order. Returns whether it opened.
    pub fn select_next(&mut self) -> bool {
        self.select(Direction::Forward)
    }

    /// Load the previous candidate in play order. Returns whether it opened.
    pub fn select_prev(&mut self) -> bool {
        self.select(Direction::Backward)
    }

    fn select(&mut self, direction: Direction) -> bool {
        let candidate = match direction {
            Direction::Forward => self.playlist.next_candidate(self.repeat),
            Direction::Backward => self.playlist.prev_candidate(self.repeat),
        };
        let Some(id) = candidate.and_then(|idx| self.playlist.id_at(Order::Play, idx)) else {
            return false;
        };
        self.playlist.set_current(id);
        self.load_current()
    }

    /// Try candidates until one loads, at most once per track. On
    /// exhaustion the player settles in `Stopped` with cleared labels.
    fn advance(&mut self, direction: Direction) -> bool {
        let attempts = self.playlist.len();
        let mut failures = 0;
        loop {
            let loaded = match direction {
                Direction::Forward => self.select_next(),
                Direction::Backward => self.select_prev(),
            };
            if loaded {
                return true;
            }
            failures += 1;
            if failures >= attempts {
                log::info!("no playable track left in the playlist");
                self.labels.clear();
                self.position.reset(0, 0);
                self.state = PlayerState::Stopped;
                return false;
            }
        }
    }

    // ---- polling ----

    /// Periodic poll: end-of-track handling, elapsed time, title flashes.
    pub fn tick(&mut self) {
        if let Some(left) = self.title_flash {
            if left <= 1 {
                self.title_flash = None;
                self.restore_title();
            } else {
                self.title_flash = Some(left - 1);
            }
        }

        let Some(stream) = self.stream else {
            return;
        };

        if self.backend.is_finished(stream) && self.state != PlayerState::Stopped {
            let last = self.playlist.len().checked_sub(1);
            if self.playlist.current_index(Order::Play) == last && !self.repeat {
                self.position.reset(0, 0);
                self.labels.time_position.clear();
                self.labels.time_length.clear();
                self.state = PlayerState::Stopped;
                return;
            }
            if self.advance(Direction::Forward) {
                self.update_labels(true);
                self.start_stream();
            }
        } else if self.state == PlayerState::Playing {
            let bytes = self.backend.position(stream);
            let secs = self.backend.bytes_to_seconds(stream, bytes) as u64;
            self.labels.time_position = format_duration(secs);
            self.position.pos = secs.min(self.position.max);
        }
    }

    // ---- seeking ----

    /// Show where a seek to `secs` would land without moving playback.
    pub fn seek_preview(&mut self, secs: u64) {
        if self.stream.is_none() {
            return;
        }
        let Some(track) = self.playlist.current() else {
            return;
        };
        let target = secs.min(track.duration_secs);
        self.labels.title = format!(
            "Seek to:  {} / {}",
            format_duration(target),
            track.duration_text
        );
    }

    /// Move playback to `secs` and restore the title.
    pub fn seek_commit(&mut self, secs: u64) {
        let Some(stream) = self.stream else {
            return;
        };
        let Some(track) = self.playlist.current() else {
            self.restore_title();
            return;
        };
        if track.duration_secs > 0 {
            let target = secs.min(track.duration_secs);
            let bytes =
                (target as f64 / track.duration_secs as f64 * track.length_bytes as f64) as u64;
            if self.backend.set_position(stream, bytes) {
                self.position.pos = target;
                self.labels.time_position = format_duration(target);
            }
        }
        self.restore_title();
    }

    // ---- volume ----

    /// Apply a volume while its control is being dragged; the title shows it.
    pub fn set_volume_live(&mut self, volume: u8) {
        self.set_volume(volume);
        self.flash_volume();
    }

    /// The volume control was let go.
    pub fn volume_release(&mut self) {
        self.title_flash = None;
        self.restore_title();
    }

    /// Step the volume by `delta`, clamped to 0..=100, and flash it in the
    /// title for a few ticks.
    pub fn nudge_volume(&mut self, delta: i16) {
        let target = (i16::from(self.volume) + delta).clamp(0, 100) as u8;
        self.set_volume(target);
        self.flash_volume();
        self.title_flash = Some(self.flash_ticks.max(1));
    }

    /// Set the volume quietly, without touching the title.
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if let Some(stream) = self.stream {
            self.backend
                .set_volume(stream, f32::from(self.volume) / 100.0);
        }
    }

    fn flash_volume(&mut self) {
        self.labels.title = format!("Volume:  {}%", self.volume);
    }

    // ---- playlist edits ----

    /// Add files (`append`) or replace the playlist and start playing its
    /// first track in play order.
    pub fn open_files(&mut self, paths: Vec<PathBuf>, append: bool) {
        if paths.is_empty() {
            return;
        }
        if append {
            self.playlist.add_tracks(paths, true, &mut self.backend);
            return;
        }

        self.release_stream();
        self.playlist.add_tracks(paths, false, &mut self.backend);
        let Some(first) = self.playlist.id_at(Order::Play, 0) else {
            return;
        };
        self.playlist.set_current(first);
        if self.load_current() {
            self.update_labels(true);
            self.start_stream();
        } else {
            self.update_labels(true);
            self.state = PlayerState::Stopped;
        }
    }

    /// Restore a saved playlist without loading a stream.
    ///
    /// The current track is set before shuffling so it lands first in the
    /// play order.
    pub fn restore(
        &mut self,
        paths: Vec<PathBuf>,
        current_display_index: usize,
        shuffle: bool,
        repeat: bool,
        volume: u8,
    ) {
        self.release_stream();
        self.state = PlayerState::Stopped;
        self.repeat = repeat;
        self.volume = volume.min(100);
        self.playlist.set_shuffle(false);
        self.playlist.add_tracks(paths, false, &mut self.backend);

        let index = if current_display_index < self.playlist.len() {
            current_display_index
        } else {
            0
        };
        if let Some(id) = self.playlist.id_at(Order::Display, index) {
            self.playlist.set_current(id);
        }
        self.playlist.set_shuffle(shuffle);

        self.position.reset(0, 0);
        if self.playlist.current_id().is_some() {
            self.update_labels(false);
        }
    }

    /// Remove the track at `display_index`. Removing the current track
    /// keeps its stream until the next stop/play/next/prev.
    pub fn delete_track(&mut self, display_index: usize) {
        if let Some(track) = self.playlist.remove_track(display_index) {
            log::debug!("removed {:?} from the playlist", track.path);
        }
    }

    pub fn move_up(&mut self, display_index: usize) -> Option<usize> {
        self.playlist.move_up(display_index)
    }

    pub fn move_down(&mut self, display_index: usize) -> Option<usize> {
        self.playlist.move_down(display_index)
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.playlist.set_shuffle(enabled);
    }

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle());
    }

    pub fn set_repeat(&mut self, enabled: bool) {
        self.repeat = enabled;
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    // ---- stream lifecycle ----

    /// Replace the stream with one for the current track.
    fn load_current(&mut self) -> bool {
        self.release_stream();
        let Some(path) = self.playlist.current().map(|t| t.path.clone()) else {
            return false;
        };

        match self.backend.open_stream(&path) {
            Some(stream) => {
                let length = self.backend.length(stream);
                let secs = self.backend.bytes_to_seconds(stream, length) as u64;
                self.backend
                    .set_volume(stream, f32::from(self.volume) / 100.0);
                self.stream = Some(stream);
                self.position.reset(secs, 0);
                self.mark_loaded(length, secs);
                true
            }
            None => {
                log::warn!("failed to load {:?}", path);
                if let Some(track) = self.playlist.current_mut() {
                    track.is_valid = false;
                }
                false
            }
        }
    }

    fn mark_loaded(&mut self, length: u64, secs: u64) {
        if let Some(track) = self.playlist.current_mut() {
            track.length_bytes = length;
            track.duration_secs = secs;
            track.duration_text = format_duration(secs);
            track.is_valid = true;
        }
    }

    fn start_stream(&mut self) {
        if let Some(stream) = self.stream {
            self.backend.play(stream, false);
            self.state = PlayerState::Playing;
        }
    }

    fn release_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.backend.stop(stream);
            self.backend.close_stream(stream);
        }
    }

    // ---- labels ----

    fn update_labels(&mut self, show_length: bool) {
        let Some(track) = self.playlist.current() else {
            return;
        };
        self.labels.title = title_or_file_name(track).to_string();
        self.labels.artist = track.tags.artist.clone().unwrap_or_default();
        self.labels.album = track.tags.album.clone().unwrap_or_default();
        self.labels.album_art = track.tags.album_art.clone();
        self.labels.file_info = file_info_text(track);
        if show_length {
            self.labels.time_length = track.duration_text.clone();
        }
        self.labels.caption = track.display_name.clone();
    }

    fn restore_title(&mut self) {
        self.labels.title = self
            .playlist
            .current()
            .map(|t| title_or_file_name(t).to_string())
            .unwrap_or_default();
    }
}
