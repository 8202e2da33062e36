use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tonearm/config.toml` or `~/.config/tonearm/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TONEARM__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume used when no session is restored (0..=100).
    pub default_volume: u8,
    /// Step for `+` / `-` and the mouse wheel.
    pub volume_step: u8,
    /// Number of seconds to scrub when pressing `h` / `l`.
    pub seek_step_secs: u64,
    /// How long the event loop waits for input before ticking the player.
    pub poll_interval_ms: u64,
    /// Ticks a volume flash stays in the title before it is restored.
    pub title_flash_ticks: u32,
    /// Idle ticks after the last `h` / `l` or `+` / `-` press before the
    /// pending seek is committed and the volume control let go.
    pub adjust_release_ticks: u32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_volume: 20,
            volume_step: 3,
            seek_step_secs: 5,
            poll_interval_ms: 100,
            title_flash_ticks: 10,
            adjust_release_ticks: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions picked up when a directory is opened
    /// (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "ogg".into(), "flac".into(), "wav".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Where `session.toml` lives. Defaults to the XDG state directory.
    pub path: Option<PathBuf>,
    /// Reload the previous playlist, modes and volume on start.
    pub restore_on_start: bool,
    /// Write the session back when quitting.
    pub save_on_quit: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            path: None,
            restore_on_start: true,
            save_on_quit: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter used when `RUST_LOG` is not set.
    pub level: String,
    /// Log file. Defaults to `tonearm.log` in the XDG state directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
