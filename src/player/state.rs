//! View state the controller publishes for the front end.

use crate::tags::AlbumArt;

/// Caption shown when nothing is loaded.
pub const DEFAULT_CAPTION: &str = "tonearm";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlayerState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

/// Text shown around the transport controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLabels {
    /// Track title, or a transient seek/volume message.
    pub title: String,
    pub artist: String,
    pub album: String,
    /// e.g. `MP3, 128 kbps, 44 kHz, Stereo`.
    pub file_info: String,
    pub time_position: String,
    pub time_length: String,
    /// Terminal window title.
    pub caption: String,
    pub album_art: Option<AlbumArt>,
}

impl Default for InfoLabels {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            file_info: String::new(),
            time_position: String::new(),
            time_length: String::new(),
            caption: DEFAULT_CAPTION.to_string(),
            album_art: None,
        }
    }
}

impl InfoLabels {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Seek bar model, in whole seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PositionBar {
    pub max: u64,
    pub pos: u64,
}

impl PositionBar {
    pub fn reset(&mut self, max: u64, pos: u64) {
        self.max = max;
        self.pos = pos.min(max);
    }

    /// Filled fraction in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            (self.pos as f64 / self.max as f64).clamp(0.0, 1.0)
        }
    }
}

/// What a `play()` request ended up doing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A track is playing (started, restarted or resumed).
    Playing,
    /// There is nothing to play; the front end should ask for files.
    EmptyPlaylist,
    /// Every candidate failed to load.
    NothingPlayable,
}
