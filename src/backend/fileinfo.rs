//! Stream properties and raw tag capture, backed by lofty and plain reads.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use lofty::config::ParseOptions;
use lofty::file::AudioFile;
use lofty::ogg::VorbisFile;

use crate::tags::{id3v2, ogg};

/// Used when lofty cannot tell us the PCM layout.
const FALLBACK_SAMPLE_RATE: u32 = 44_100;
const FALLBACK_CHANNELS: u16 = 2;
const BYTES_PER_SAMPLE: u64 = 2;

/// What lofty reports about a file's audio properties.
#[derive(Debug, Clone, Default)]
pub(super) struct StreamInfo {
    pub duration: Duration,
    pub bitrate_kbps: u32,
    pub sample_rate: u32,
    pub channels: u16,
}

impl StreamInfo {
    /// Decoded 16-bit PCM bytes per second of audio.
    pub fn bytes_per_second(&self) -> u64 {
        let rate = if self.sample_rate == 0 {
            FALLBACK_SAMPLE_RATE
        } else {
            self.sample_rate
        };
        let channels = if self.channels == 0 {
            FALLBACK_CHANNELS
        } else {
            self.channels
        };
        u64::from(rate) * u64::from(channels) * BYTES_PER_SAMPLE
    }
}

pub(super) fn read_stream_info(path: &Path) -> StreamInfo {
    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let props = tagged.properties();
            StreamInfo {
                duration: props.duration(),
                bitrate_kbps: props
                    .audio_bitrate()
                    .or_else(|| props.overall_bitrate())
                    .unwrap_or(0),
                sample_rate: props.sample_rate().unwrap_or(0),
                channels: props.channels().map(u16::from).unwrap_or(0),
            }
        }
        Err(e) => {
            log::debug!("lofty could not read properties of {:?}: {e}", path);
            StreamInfo::default()
        }
    }
}

/// Read the complete ID3v2 tag (header included) from the head of the file.
pub(super) fn read_id3v2_tag(path: &Path) -> io::Result<Option<Vec<u8>>> {
    let mut file = File::open(path)?;
    let mut header = [0u8; id3v2::HEADER_LEN];
    match file.read_exact(&mut header) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let Some(parsed) = id3v2::parse_header(&header) else {
        return Ok(None);
    };
    log::debug!(
        "ID3v2.{}.{} tag of {} bytes (flags {:#04x}) in {:?}",
        parsed.major_version,
        parsed.revision,
        parsed.tag_size,
        parsed.flags,
        path
    );

    let mut buf = header.to_vec();
    file.take(u64::from(parsed.tag_size)).read_to_end(&mut buf)?;
    Ok(Some(buf))
}

/// Read the Vorbis comment header and flatten it into the wire layout the
/// Ogg comment parser expects.
pub(super) fn read_vorbis_comments(path: &Path) -> Option<Vec<u8>> {
    let mut file = File::open(path).ok()?;
    match VorbisFile::read_from(&mut file, ParseOptions::new()) {
        Ok(vorbis) => Some(ogg::encode_comments(vorbis.vorbis_comments().items())),
        Err(e) => {
            log::debug!("no vorbis comments in {:?}: {e}", path);
            None
        }
    }
}
