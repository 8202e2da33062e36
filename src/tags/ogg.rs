//! Ogg Vorbis comments, flattened as `NAME=value\0NAME=value\0\0`.
//!
//! Field names are case-insensitive (`ARTIST`, `Artist` and `artist` are the
//! same field). Values are UTF-8.

use super::model::TagMetadata;

fn entries(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    // An empty entry is the second NUL of the terminating pair.
    buf.split(|&b| b == 0).take_while(|entry| !entry.is_empty())
}

/// Decode a comment vector into metadata; unknown names are ignored.
pub fn parse_comments(buf: &[u8]) -> TagMetadata {
    let mut meta = TagMetadata::default();

    for entry in entries(buf) {
        let Some(eq) = entry.iter().position(|&b| b == b'=') else {
            continue;
        };
        let name = &entry[..eq];
        let value = String::from_utf8_lossy(&entry[eq + 1..]).into_owned();

        let slot = if name.eq_ignore_ascii_case(b"TITLE") {
            &mut meta.title
        } else if name.eq_ignore_ascii_case(b"ARTIST") {
            &mut meta.artist
        } else if name.eq_ignore_ascii_case(b"ALBUM") {
            &mut meta.album
        } else if name.eq_ignore_ascii_case(b"GENRE") {
            &mut meta.genre
        } else if name.eq_ignore_ascii_case(b"TRACKNUMBER") {
            &mut meta.track_number
        } else if name.eq_ignore_ascii_case(b"DATE") {
            &mut meta.date
        } else if name.eq_ignore_ascii_case(b"DESCRIPTION") {
            &mut meta.comment
        } else if name.eq_ignore_ascii_case(b"COMPOSER") {
            &mut meta.composer
        } else {
            continue;
        };
        *slot = Some(value);
    }

    meta
}

/// Flatten `(name, value)` pairs back into the wire layout above.
///
/// Used by the backend to hand lofty's decoded comments to `parse_comments`.
pub fn encode_comments<'a, I>(fields: I) -> Vec<u8>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = Vec::new();
    for (name, value) in fields {
        out.extend_from_slice(name.as_bytes());
        out.push(b'=');
        // An embedded NUL would terminate the entry early.
        out.extend(value.bytes().filter(|&b| b != 0));
        out.push(0);
    }
    out.push(0);
    out
}
