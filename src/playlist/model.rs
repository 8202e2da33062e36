use std::path::{Path, PathBuf};

use crate::tags::TagMetadata;

/// Stable handle to a track inside one `Playlist`. Never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub(super) u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileFormat {
    Mp3,
    Ogg,
    Aac,
    Flac,
    Unknown,
}

impl FileFormat {
    /// Container format from a case-insensitive file extension.
    ///
    /// Only MP3 and Ogg carry tags we parse; AAC and FLAC are recognised so
    /// the info line can name them.
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return Self::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Self::Mp3,
            "ogg" => Self::Ogg,
            "aac" | "m4a" => Self::Aac,
            "flac" => Self::Flac,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Mp3 => Some("MP3"),
            Self::Ogg => Some("OGG"),
            Self::Aac => Some("AAC"),
            Self::Flac => Some("FLAC"),
            Self::Unknown => None,
        }
    }
}

/// One playlist entry.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub file_name: String,
    pub tags: TagMetadata,
    /// What the playlist shows: `Artist - Title` or the file name.
    pub display_name: String,
    /// `M:SS`, empty until info was fetched.
    pub duration_text: String,
    pub duration_secs: u64,
    /// Length in backend byte units.
    pub length_bytes: u64,
    pub bitrate_kbps: u32,
    /// Truncated, e.g. 44 for 44.1 kHz.
    pub frequency_khz: u32,
    pub stereo: bool,
    pub format: FileFormat,
    pub has_info: bool,
    /// Cleared when the file could not be opened; such rows are drawn grayed.
    pub is_valid: bool,
    pub(super) is_current: bool,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let format = FileFormat::from_path(&path);

        Self {
            display_name: file_name.clone(),
            path,
            file_name,
            tags: TagMetadata::default(),
            duration_text: String::new(),
            duration_secs: 0,
            length_bytes: 0,
            bitrate_kbps: 0,
            frequency_khz: 0,
            stereo: false,
            format,
            has_info: false,
            is_valid: true,
            is_current: false,
        }
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }
}
