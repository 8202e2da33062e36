//! Application model types: `App` and `PromptKind`.

use std::path::PathBuf;

use crate::backend::AudioBackend;
use crate::config::{LibrarySettings, PlaybackSettings};
use crate::player::{PlayOutcome, Player};
use crate::playlist::{Order, Track, files};

/// What a submitted path prompt does with the files it names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Replace the playlist and start playing.
    Open,
    /// Append to the playlist.
    Add,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Add => "Add",
        }
    }
}

/// The main application model.
pub struct App<B: AudioBackend> {
    pub player: Player<B>,
    /// Selected row, as a display-order index.
    pub selected: usize,
    pub playlist_visible: bool,
    pub prompt: Option<PromptKind>,
    pub prompt_input: String,
    /// One-line message under the playlist; cleared by the next key press.
    pub status: Option<String>,
    pub should_quit: bool,

    /// Seek target shown by `h` / `l` and not committed yet, in seconds.
    pending_seek: Option<u64>,
    /// `+` / `-` are holding the volume control.
    volume_held: bool,
    /// Ticks left before pending adjustments are settled.
    release_in: Option<u32>,
    release_ticks: u32,

    volume_step: u8,
    seek_step_secs: u64,
    library: LibrarySettings,
}

impl<B: AudioBackend> App<B> {
    pub fn new(player: Player<B>, playback: &PlaybackSettings, library: &LibrarySettings) -> Self {
        let mut app = Self {
            player,
            selected: 0,
            playlist_visible: true,
            prompt: None,
            prompt_input: String::new(),
            status: None,
            should_quit: false,
            pending_seek: None,
            volume_held: false,
            release_in: None,
            release_ticks: playback.adjust_release_ticks.max(1),
            volume_step: playback.volume_step,
            seek_step_secs: playback.seek_step_secs,
            library: library.clone(),
        };
        app.follow_current();
        app
    }

    pub fn volume_step(&self) -> u8 {
        self.volume_step
    }

    pub fn seek_step_secs(&self) -> u64 {
        self.seek_step_secs
    }

    pub fn has_tracks(&self) -> bool {
        !self.player.playlist().is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.player.playlist().track_at(Order::Display, self.selected)
    }

    pub fn pending_seek(&self) -> Option<u64> {
        self.pending_seek
    }

    /// Poll the player and settle adjustments that went idle.
    pub fn tick(&mut self) {
        self.player.tick();
        if let Some(left) = self.release_in {
            if left <= 1 {
                self.settle_adjustments();
            } else {
                self.release_in = Some(left - 1);
            }
        }
    }

    // ---- seek and volume adjustments ----

    /// Move the previewed seek target by `delta_secs`. Playback only moves
    /// once the adjustment is settled.
    pub fn adjust_seek(&mut self, delta_secs: i64) {
        if !self.player.has_stream() {
            return;
        }
        let bar = self.player.position_bar();
        let base = self.pending_seek.unwrap_or(bar.pos);
        let target = (base as i64)
            .saturating_add(delta_secs)
            .clamp(0, bar.max.min(i64::MAX as u64) as i64) as u64;
        self.pending_seek = Some(target);
        self.player.seek_preview(target);
        self.release_in = Some(self.release_ticks);
    }

    /// Step the volume while holding the control; the title shows it.
    pub fn adjust_volume(&mut self, delta: i16) {
        let target = (i16::from(self.player.volume()) + delta).clamp(0, 100) as u8;
        self.player.set_volume_live(target);
        self.volume_held = true;
        self.release_in = Some(self.release_ticks);
    }

    /// Commit a previewed seek and let go of the volume control.
    pub fn settle_adjustments(&mut self) {
        self.release_in = None;
        if let Some(target) = self.pending_seek.take() {
            self.player.seek_commit(target);
        }
        if self.volume_held {
            self.volume_held = false;
            self.player.volume_release();
        }
    }

    /// Move the selection onto the current track, if there is one.
    pub fn follow_current(&mut self) {
        if let Some(idx) = self.player.playlist().current_index(Order::Display) {
            self.selected = idx;
        }
    }

    /// Keep `selected` inside the playlist after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.player.playlist().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Move selection to the next row, wrapping to the first.
    pub fn select_down(&mut self) {
        let len = self.player.playlist().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous row, wrapping to the last.
    pub fn select_up(&mut self) {
        let len = self.player.playlist().len();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.player.playlist().len().saturating_sub(1);
    }

    /// `play()` plus the front-end reaction to its outcome.
    pub fn play(&mut self) {
        match self.player.play() {
            PlayOutcome::Playing => self.follow_current(),
            PlayOutcome::EmptyPlaylist => self.enter_prompt(PromptKind::Open),
            PlayOutcome::NothingPlayable => {
                self.status = Some("No playable track in the playlist".to_string());
            }
        }
    }

    pub fn play_selected(&mut self) {
        if self.has_tracks() {
            self.player.play_track_at(self.selected);
            self.follow_current();
        }
    }

    pub fn delete_selected(&mut self) {
        if self.has_tracks() {
            self.player.delete_track(self.selected);
            self.clamp_selection();
        }
    }

    pub fn move_selected_up(&mut self) {
        if let Some(idx) = self.player.move_up(self.selected) {
            self.selected = idx;
        }
    }

    pub fn move_selected_down(&mut self) {
        if let Some(idx) = self.player.move_down(self.selected) {
            self.selected = idx;
        }
    }

    pub fn toggle_playlist(&mut self) {
        self.playlist_visible = !self.playlist_visible;
    }

    // ---- path prompt ----

    /// Enter prompt mode; typed characters go to `prompt_input`.
    pub fn enter_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(kind);
        self.prompt_input.clear();
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
        self.prompt_input.clear();
    }

    pub fn push_prompt_char(&mut self, c: char) {
        self.prompt_input.push(c);
    }

    pub fn pop_prompt_char(&mut self) {
        self.prompt_input.pop();
    }

    /// Pasted text goes to the prompt as is. NULs are kept so a file
    /// selection buffer can be pasted whole.
    pub fn handle_paste(&mut self, text: &str) {
        if self.prompt.is_none() {
            return;
        }
        self.prompt_input
            .extend(text.chars().filter(|&c| c == '\0' || !c.is_control()));
    }

    /// Expand the typed path, or a pasted `dir\0name\0...\0\0` selection,
    /// and open or add what it names.
    pub fn submit_prompt(&mut self) {
        let Some(kind) = self.prompt.take() else {
            return;
        };
        let typed = std::mem::take(&mut self.prompt_input);
        let selection = if typed.contains('\0') {
            files::parse_file_selection(typed.as_bytes())
        } else {
            let path = typed.trim();
            if path.is_empty() {
                Vec::new()
            } else {
                vec![PathBuf::from(path)]
            }
        };
        if selection.is_empty() {
            return;
        }

        let paths = files::expand_paths(&selection, &self.library);
        if paths.is_empty() {
            log::warn!("no audio files found in {:?}", selection);
            self.status = Some(format!("No audio files in {}", selection[0].display()));
            return;
        }
        self.open_paths(paths, kind);
    }

    /// Open or add already expanded `paths`.
    pub fn open_paths(&mut self, paths: Vec<PathBuf>, kind: PromptKind) {
        let count = paths.len();
        match kind {
            PromptKind::Open => {
                self.player.open_files(paths, false);
                self.selected = 0;
                self.follow_current();
            }
            PromptKind::Add => self.player.open_files(paths, true),
        }
        self.status = Some(format!("{}: {count} files", kind.label()));
    }
}
