use crate::backend::{AudioBackend, TagKind};
use crate::playlist::{FileFormat, Track};
use crate::tags::{TagMetadata, id3v2, ogg};

use super::display::{compose_display_name, format_duration};

/// Fill in duration, tags and technical info for `track`.
///
/// Opens a throwaway stream on `backend` and always closes it again. Does
/// nothing once `has_info` is set. A file that cannot be opened is marked
/// invalid and keeps its file name as display name.
pub fn fetch_track_info<B: AudioBackend>(track: &mut Track, backend: &mut B) {
    if track.has_info {
        return;
    }

    let Some(stream) = backend.open_stream(&track.path) else {
        log::warn!("cannot open {:?}, marking it invalid", track.path);
        track.display_name = track.file_name.clone();
        track.has_info = false;
        track.is_valid = false;
        return;
    };

    track.length_bytes = backend.length(stream);
    track.duration_secs = backend.bytes_to_seconds(stream, track.length_bytes) as u64;
    track.duration_text = format_duration(track.duration_secs);

    track.tags = match track.format {
        FileFormat::Mp3 => backend
            .tag(stream, TagKind::Id3v2)
            .map(|raw| id3v2::parse_tag(&raw))
            .unwrap_or_default(),
        FileFormat::Ogg => backend
            .tag(stream, TagKind::Ogg)
            .map(|raw| ogg::parse_comments(&raw))
            .unwrap_or_default(),
        _ => TagMetadata::default(),
    };
    track.display_name = compose_display_name(&track.file_name, &track.tags);

    track.bitrate_kbps = backend.bitrate(stream).round() as u32;
    track.frequency_khz = backend.frequency(stream) as u32 / 1000;
    track.stereo = backend.channels(stream) > 1;

    backend.close_stream(stream);
    track.has_info = true;
    track.is_valid = true;
}
