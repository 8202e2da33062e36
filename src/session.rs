//! The persisted session: playlist, modes, volume and current track.
//!
//! Stored as a flat, hand-editable `session.toml`. Anything odd in it is
//! clamped or skipped rather than rejected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::AudioBackend;
use crate::error::Result;
use crate::player::Player;
use crate::playlist::Order;

/// Entries shorter than this cannot be a full path to an audio file.
const MIN_ENTRY_LEN: usize = 8;
/// Longest accepted entry, in bytes.
const MAX_ENTRY_LEN: usize = 259;
const SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Display-order paths joined with `|`.
    pub playlist_files: String,
    pub shuffle: bool,
    pub repeat: bool,
    pub volume: i64,
    /// Display-order index of the current track, `-1` when there is none.
    pub current_index: i64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            playlist_files: String::new(),
            shuffle: false,
            repeat: false,
            volume: 20,
            current_index: 0,
        }
    }
}

impl Session {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Read `path`; a missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_toml()?)?;
        log::info!("session saved to {:?}", path);
        Ok(())
    }

    /// Snapshot what `player` would need to come back to the same place.
    pub fn capture<B: AudioBackend>(player: &Player<B>) -> Self {
        let playlist = player.playlist();
        Self {
            playlist_files: join_playlist_files(playlist.iter().map(|t| t.path.as_path())),
            shuffle: player.shuffle(),
            repeat: player.repeat(),
            volume: i64::from(player.volume()),
            current_index: playlist
                .current_index(Order::Display)
                .map_or(-1, |i| i as i64),
        }
    }

    /// Load this session into `player`. Nothing starts playing.
    pub fn apply_to<B: AudioBackend>(&self, player: &mut Player<B>) {
        let paths = self.paths();
        if paths.is_empty() {
            player.set_shuffle(self.shuffle);
            player.set_repeat(self.repeat);
            player.set_volume(self.clamped_volume());
            return;
        }
        let count = paths.len();
        let current = self.current_index_within(count);
        player.restore(paths, current, self.shuffle, self.repeat, self.clamped_volume());
        log::info!("restored {count} tracks from the previous session");
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        split_playlist_files(&self.playlist_files)
    }

    pub fn clamped_volume(&self) -> u8 {
        self.volume.clamp(0, 100) as u8
    }

    /// The saved index, or 0 when it does not fit a playlist of `len`.
    pub fn current_index_within(&self, len: usize) -> usize {
        usize::try_from(self.current_index)
            .ok()
            .filter(|&i| i < len)
            .unwrap_or(0)
    }
}

pub fn join_playlist_files<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a Path>,
{
    let parts: Vec<String> = paths
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    parts.join(&SEPARATOR.to_string())
}

/// Split a `|`-joined list, dropping entries outside 8..=259 bytes.
pub fn split_playlist_files(joined: &str) -> Vec<PathBuf> {
    joined
        .split(SEPARATOR)
        .filter(|entry| (MIN_ENTRY_LEN..=MAX_ENTRY_LEN).contains(&entry.len()))
        .map(PathBuf::from)
        .collect()
}
