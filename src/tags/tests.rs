use super::id3v2::{self, Id3v2Frame};
use super::ogg;
use super::*;

fn frame(id: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(data);
    out
}

fn tag(frames: &[Vec<u8>], padding: usize) -> Vec<u8> {
    let body_len: usize = frames.iter().map(Vec::len).sum::<usize>() + padding;
    let size = body_len as u32;
    let mut out = b"ID3\x03\x00\x00".to_vec();
    out.extend_from_slice(&[
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]);
    for f in frames {
        out.extend_from_slice(f);
    }
    out.extend(std::iter::repeat(0u8).take(padding));
    out
}

fn latin1(text: &str) -> Vec<u8> {
    let mut data = vec![0u8];
    data.extend_from_slice(text.as_bytes());
    data
}

#[test]
fn synchsafe_size_decodes_seven_bits_per_byte() {
    assert_eq!(id3v2::decode_synchsafe([0x00, 0x00, 0x02, 0x01]), 257);
    assert_eq!(id3v2::decode_synchsafe([0x7F, 0x7F, 0x7F, 0x7F]), 0x0FFF_FFFF);
    assert_eq!(id3v2::decode_frame_size([0x00, 0x00, 0x02, 0x01]), 513);
}

#[test]
fn header_requires_id3_magic() {
    let h = id3v2::parse_header(b"ID3\x03\x01\x40\x00\x00\x02\x01").unwrap();
    assert_eq!(h.major_version, 3);
    assert_eq!(h.revision, 1);
    assert_eq!(h.flags, 0x40);
    assert_eq!(h.tag_size, 257);

    assert!(id3v2::parse_header(b"TAG\x03\x00\x00\x00\x00\x02\x01").is_none());
    assert!(id3v2::parse_header(b"ID3").is_none());
}

#[test]
fn latin1_title_frame_decodes_to_the_same_ascii() {
    let raw = frame(&[0x54, 0x49, 0x54, 0x32], &latin1("Stairway"));
    let f = id3v2::parse_frame(&raw).unwrap();
    assert_eq!(&f.id, b"TIT2");
    assert_eq!(id3v2::decode_frame_text(&f).as_deref(), Some("Stairway"));
}

#[test]
fn frame_id_outside_digits_and_uppercase_is_invalid() {
    assert!(id3v2::parse_frame(&frame(b"tit2", &latin1("x"))).is_none());
    assert!(id3v2::parse_frame(&frame(b"TI[2", &latin1("x"))).is_none());
    assert!(id3v2::parse_frame(&[0u8; 10]).is_none());
    assert!(id3v2::parse_frame(b"TIT2").is_none());
}

#[test]
fn frame_text_without_payload_is_none() {
    let empty = Id3v2Frame {
        id: *b"TIT2",
        frame_size: 1,
        flags: [0, 0],
        data: &[0],
    };
    assert!(id3v2::decode_frame_text(&empty).is_none());
}

#[test]
fn utf16_frames_honour_the_byte_order_mark() {
    let mut le = vec![1u8, 0xFF, 0xFE];
    for unit in "Björk".encode_utf16() {
        le.extend_from_slice(&unit.to_le_bytes());
    }
    le.extend_from_slice(&[0, 0]);
    let raw = frame(b"TPE1", &le);
    let f = id3v2::parse_frame(&raw).unwrap();
    assert_eq!(id3v2::decode_frame_text(&f).as_deref(), Some("Björk"));

    let mut be = vec![1u8, 0xFE, 0xFF];
    for unit in "Sigur Rós".encode_utf16() {
        be.extend_from_slice(&unit.to_be_bytes());
    }
    let raw = frame(b"TPE1", &be);
    let f = id3v2::parse_frame(&raw).unwrap();
    assert_eq!(id3v2::decode_frame_text(&f).as_deref(), Some("Sigur Rós"));
}

#[test]
fn utf16_frames_always_skip_two_bytes_for_the_mark() {
    let raw = frame(b"TIT2", &[1, 0x41, 0x00, 0x42, 0x00]);
    let f = id3v2::parse_frame(&raw).unwrap();
    assert_eq!(id3v2::decode_frame_text(&f).as_deref(), Some("B"));

    let raw = frame(b"TIT2", &[1, 0xFF]);
    let f = id3v2::parse_frame(&raw).unwrap();
    assert!(id3v2::decode_frame_text(&f).is_none());
}

#[test]
fn v24_encodings_are_not_decoded() {
    let raw = frame(b"TIT2", b"\x03hello");
    let f = id3v2::parse_frame(&raw).unwrap();
    assert!(id3v2::decode_frame_text(&f).is_none());

    let raw = frame(b"TIT2", b"\x02\x00h\x00i");
    let f = id3v2::parse_frame(&raw).unwrap();
    assert!(id3v2::decode_frame_text(&f).is_none());
}

#[test]
fn comment_frame_skips_language_and_description() {
    let raw = frame(b"COMM", b"\x00engshort\x00The actual comment");
    let f = id3v2::parse_frame(&raw).unwrap();
    assert_eq!(
        id3v2::decode_comment_frame(&f).as_deref(),
        Some("The actual comment")
    );
}

#[test]
fn full_tag_maps_known_frames_and_ignores_others() {
    let buf = tag(
        &[
            frame(b"TIT2", &latin1("Song")),
            frame(b"TPE1", &latin1("Artist")),
            frame(b"TALB", &latin1("Album")),
            frame(b"TCON", &latin1("Rock")),
            frame(b"TYER", &latin1("1971")),
            frame(b"TRCK", &latin1("4/8")),
            frame(b"TXXX", &latin1("ignored")),
            frame(b"TCOM", &latin1("Page")),
        ],
        32,
    );

    let meta = id3v2::parse_tag(&buf);
    assert_eq!(meta.title.as_deref(), Some("Song"));
    assert_eq!(meta.artist.as_deref(), Some("Artist"));
    assert_eq!(meta.album.as_deref(), Some("Album"));
    assert_eq!(meta.genre.as_deref(), Some("Rock"));
    assert_eq!(meta.date.as_deref(), Some("1971"));
    assert_eq!(meta.track_number.as_deref(), Some("4/8"));
    assert_eq!(meta.composer.as_deref(), Some("Page"));
    assert!(meta.comment.is_none());
    assert!(meta.album_art.is_none());
}

#[test]
fn invalid_frame_stops_parsing_but_keeps_earlier_fields() {
    let mut garbage = frame(b"TPE1", &latin1("Never read"));
    garbage[0] = b'!';
    let buf = tag(
        &[
            frame(b"TIT2", &latin1("Kept")),
            garbage,
            frame(b"TALB", &latin1("Also never read")),
        ],
        0,
    );

    let meta = id3v2::parse_tag(&buf);
    assert_eq!(meta.title.as_deref(), Some("Kept"));
    assert!(meta.artist.is_none());
    assert!(meta.album.is_none());
}

#[test]
fn truncated_tag_does_not_panic() {
    let mut buf = tag(&[frame(b"TIT2", &latin1("Cut short"))], 0);
    buf.truncate(buf.len() - 4);
    let meta = id3v2::parse_tag(&buf);
    assert_eq!(meta.title.as_deref(), Some("Cut s"));

    assert!(id3v2::parse_tag(b"ID3\x03\x00\x00\x00\x00\x7F\x7F").is_empty());
    assert!(id3v2::parse_tag(b"not a tag at all").is_empty());
}

#[test]
fn apic_frame_yields_jpeg_from_magic_offset() {
    let mut data = b"\x00image/jpeg\x00\x03cover\x00".to_vec();
    let offset = data.len();
    data.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3]);
    let buf = tag(&[frame(b"APIC", &data)], 0);

    let art = id3v2::parse_tag(&buf).album_art.unwrap();
    assert_eq!(art.format, ImageFormat::Jpeg);
    assert_eq!(art.data, data[offset..].to_vec());
}

#[test]
fn png_magic_is_detected() {
    let mut data = b"\x00image/png\x00\x03\x00".to_vec();
    data.extend_from_slice(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 9, 9]);
    let art = extract_attached_picture(&data).unwrap();
    assert_eq!(art.format, ImageFormat::Png);
    assert_eq!(art.data.len(), 10);
}

#[test]
fn picture_magic_beyond_scan_window_is_ignored() {
    let mut data = vec![b'x'; 100];
    data.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0x00]);
    assert!(extract_attached_picture(&data).is_none());

    let mut data = vec![b'x'; 99];
    data.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0x00]);
    assert!(extract_attached_picture(&data).is_some());
}

#[test]
fn ogg_comments_match_names_case_insensitively() {
    let buf = b"title=Song\0Artist=Band\0ALBUM=Record\0genre=Jazz\0TrackNumber=3\0DATE=1999\0description=Live\0\0";
    let meta = ogg::parse_comments(buf);
    assert_eq!(meta.title.as_deref(), Some("Song"));
    assert_eq!(meta.artist.as_deref(), Some("Band"));
    assert_eq!(meta.album.as_deref(), Some("Record"));
    assert_eq!(meta.genre.as_deref(), Some("Jazz"));
    assert_eq!(meta.track_number.as_deref(), Some("3"));
    assert_eq!(meta.date.as_deref(), Some("1999"));
    assert_eq!(meta.comment.as_deref(), Some("Live"));
}

#[test]
fn ogg_comments_stop_at_double_nul() {
    let buf = b"TITLE=First\0ENCODER=x\0\0ARTIST=Hidden\0\0";
    let meta = ogg::parse_comments(buf);
    assert_eq!(meta.title.as_deref(), Some("First"));
    assert!(meta.artist.is_none());

    assert!(ogg::parse_comments(b"\0\0TITLE=x\0").is_empty());
    assert!(ogg::parse_comments(b"").is_empty());
}

#[test]
fn ogg_comment_encoding_feeds_the_parser() {
    let buf = ogg::encode_comments([("ARTIST", "Nick Drake"), ("TITLE", "Pink Moon")]);
    assert!(buf.ends_with(&[0, 0]));
    let meta = ogg::parse_comments(&buf);
    assert_eq!(meta.artist.as_deref(), Some("Nick Drake"));
    assert_eq!(meta.title.as_deref(), Some("Pink Moon"));
}
