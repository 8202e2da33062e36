use crate::playlist::{Playlist, Track};
use crate::tags::TagMetadata;

/// Artists at least this long are cut and suffixed with `...`.
const MAX_ARTIST_CHARS: usize = 30;

/// `Artist - Title` when both are known, the bare file name otherwise.
pub fn compose_display_name(file_name: &str, tags: &TagMetadata) -> String {
    match (tags.artist.as_deref(), tags.title.as_deref()) {
        (Some(artist), Some(title)) => {
            if artist.chars().count() < MAX_ARTIST_CHARS {
                format!("{artist} - {title}")
            } else {
                let cut: String = artist.chars().take(MAX_ARTIST_CHARS).collect();
                format!("{cut}... - {title}")
            }
        }
        _ => file_name.to_string(),
    }
}

/// `M:SS`; minutes are not wrapped into hours.
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Title label text: the tag title, or the file name.
pub fn title_or_file_name(track: &Track) -> &str {
    track.tags.title.as_deref().unwrap_or(&track.file_name)
}

/// e.g. `MP3, 128 kbps, 44 kHz, Stereo`. Empty for unknown formats.
pub fn file_info_text(track: &Track) -> String {
    let Some(label) = track.format.label() else {
        return String::new();
    };
    let layout = if track.stereo { "Stereo" } else { "Mono" };
    format!(
        "{label}, {} kbps, {} kHz, {layout}",
        track.bitrate_kbps, track.frequency_khz
    )
}

/// `N Songs, Time: M:SS` over the whole playlist.
pub fn playlist_summary(playlist: &Playlist) -> String {
    format!(
        "{} Songs, Time: {}",
        playlist.len(),
        format_duration(playlist.total_seconds())
    )
}
