//! ID3v2 (v2.3 layout) tag decoding.
//!
//! Layout reminders:
//! - tag header: `"ID3"`, version (2 bytes), flags (1 byte), synchsafe size
//!   (4 bytes, excludes the header itself);
//! - frame header: 4-byte ID, 4-byte plain big-endian size, 2 flag bytes,
//!   followed by `size` bytes of frame data.

use super::model::TagMetadata;
use super::picture::extract_attached_picture;

pub const HEADER_LEN: usize = 10;
pub const FRAME_HEADER_LEN: usize = 10;

const ENC_LATIN1: u8 = 0;
const ENC_UTF16_BOM: u8 = 1;
// 2 (UTF-16BE without BOM) and 3 (UTF-8) are ID3v2.4 encodings; not decoded.

/// Length of the language code that opens a COMM frame body.
const COMM_LANGUAGE_LEN: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Id3v2Header {
    pub major_version: u8,
    pub revision: u8,
    pub flags: u8,
    /// Size of the whole tag excluding the 10-byte header.
    pub tag_size: u32,
}

/// One frame borrowed from the tag buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Id3v2Frame<'a> {
    pub id: [u8; 4],
    /// Declared size; `data` may be shorter if the buffer was truncated.
    pub frame_size: u32,
    pub flags: [u8; 2],
    pub data: &'a [u8],
}

/// Decode a 28-bit synchsafe integer (7 significant bits per byte).
pub fn decode_synchsafe(bytes: [u8; 4]) -> u32 {
    (u32::from(bytes[0]) << 21)
        | (u32::from(bytes[1]) << 14)
        | (u32::from(bytes[2]) << 7)
        | u32::from(bytes[3])
}

/// Frame sizes are plain big-endian in v2.3.
pub fn decode_frame_size(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Parse the 10-byte tag header. `None` when the buffer is not an ID3v2 tag.
pub fn parse_header(buf: &[u8]) -> Option<Id3v2Header> {
    let raw = buf.get(..HEADER_LEN)?;
    if &raw[..3] != b"ID3" {
        return None;
    }
    Some(Id3v2Header {
        major_version: raw[3],
        revision: raw[4],
        flags: raw[5],
        tag_size: decode_synchsafe([raw[6], raw[7], raw[8], raw[9]]),
    })
}

fn is_frame_id_byte(b: u8) -> bool {
    (48..=90).contains(&b)
}

/// Parse the frame starting at `buf[0]`.
///
/// Returns `None` when the ID contains anything but digits/uppercase letters
/// (padding, garbage) or when the buffer cannot hold a frame header.
pub fn parse_frame(buf: &[u8]) -> Option<Id3v2Frame<'_>> {
    let header = buf.get(..FRAME_HEADER_LEN)?;
    let id = [header[0], header[1], header[2], header[3]];
    if !id.iter().copied().all(is_frame_id_byte) {
        return None;
    }
    let frame_size = decode_frame_size([header[4], header[5], header[6], header[7]]);
    let flags = [header[8], header[9]];

    let body = &buf[FRAME_HEADER_LEN..];
    let end = usize::try_from(frame_size).unwrap_or(usize::MAX).min(body.len());
    Some(Id3v2Frame {
        id,
        frame_size,
        flags,
        data: &body[..end],
    })
}

fn latin1_until_nul(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

/// UTF-16 text introduced by a byte-order mark. The first two bytes are
/// always taken as the mark; an unrecognised one means little-endian.
fn utf16_with_bom(bytes: &[u8]) -> String {
    let (little_endian, body) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        [_, _, rest @ ..] => (true, rest),
        _ => return String::new(),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .take_while(|&unit| unit != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Decode a text frame: the first data byte selects the encoding.
pub fn decode_frame_text(frame: &Id3v2Frame<'_>) -> Option<String> {
    if frame.frame_size <= 1 {
        return None;
    }
    let (&encoding, payload) = frame.data.split_first()?;
    let text = match encoding {
        ENC_LATIN1 => latin1_until_nul(payload),
        ENC_UTF16_BOM => utf16_with_bom(payload),
        _ => return None,
    };
    non_empty(text)
}

/// Decode a COMM frame: encoding, language, short description, then text.
pub fn decode_comment_frame(frame: &Id3v2Frame<'_>) -> Option<String> {
    if frame.frame_size <= 1 {
        return None;
    }
    let (&encoding, rest) = frame.data.split_first()?;
    let body = rest.get(COMM_LANGUAGE_LEN..)?;
    let text = match encoding {
        ENC_LATIN1 => {
            let start = body.iter().position(|&b| b == 0).map_or(body.len(), |p| p + 1);
            latin1_until_nul(&body[start..])
        }
        ENC_UTF16_BOM => {
            let start = body
                .chunks_exact(2)
                .position(|pair| pair == [0, 0])
                .map_or(body.len(), |p| p * 2 + 2);
            utf16_with_bom(&body[start..])
        }
        _ => return None,
    };
    non_empty(text)
}

/// Walk every frame of a tag and collect the fields the player displays.
///
/// Iteration starts right after the header and advances by
/// `frame_size + FRAME_HEADER_LEN` until the declared tag size is reached or
/// an invalid frame shows up. Whatever was decoded before that is kept.
pub fn parse_tag(buf: &[u8]) -> TagMetadata {
    let mut meta = TagMetadata::default();
    let Some(header) = parse_header(buf) else {
        return meta;
    };

    let tag_size = header.tag_size as usize;
    let mut offset = HEADER_LEN;
    while offset < tag_size {
        let Some(frame) = buf.get(offset..).and_then(parse_frame) else {
            break;
        };

        match &frame.id {
            b"TIT2" => meta.title = decode_frame_text(&frame),
            b"TPE1" => meta.artist = decode_frame_text(&frame),
            b"TALB" => meta.album = decode_frame_text(&frame),
            b"TCON" => meta.genre = decode_frame_text(&frame),
            b"TYER" => meta.date = decode_frame_text(&frame),
            b"TDRC" => {
                if meta.date.is_none() {
                    meta.date = decode_frame_text(&frame);
                }
            }
            b"TRCK" => meta.track_number = decode_frame_text(&frame),
            b"TCOM" => meta.composer = decode_frame_text(&frame),
            b"COMM" => meta.comment = decode_comment_frame(&frame),
            b"APIC" => meta.album_art = extract_attached_picture(frame.data),
            _ => {}
        }

        offset = offset
            .saturating_add(frame.frame_size as usize)
            .saturating_add(FRAME_HEADER_LEN);
    }

    meta
}
