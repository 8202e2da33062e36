use super::model::{AlbumArt, ImageFormat};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// The APIC sub-header (encoding, MIME type, picture type, description of at
/// most 64 bytes) always fits inside this many leading bytes.
const SCAN_WINDOW: usize = 100;

/// Locate the embedded image inside APIC frame data.
///
/// Instead of walking the variable-length sub-header, the first
/// `SCAN_WINDOW` offsets are checked for a JPEG or PNG signature; the image is
/// everything from that offset to the end of the frame.
pub fn extract_attached_picture(frame_data: &[u8]) -> Option<AlbumArt> {
    (0..frame_data.len().min(SCAN_WINDOW)).find_map(|offset| {
        let rest = &frame_data[offset..];
        let format = if rest.starts_with(JPEG_MAGIC) {
            ImageFormat::Jpeg
        } else if rest.starts_with(PNG_MAGIC) {
            ImageFormat::Png
        } else {
            return None;
        };
        Some(AlbumArt {
            data: rest.to_vec(),
            format,
        })
    })
}
