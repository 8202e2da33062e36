/// Container of an embedded picture, detected from its magic number.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }
}

/// Raw album art bytes, starting at the image magic number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumArt {
    pub data: Vec<u8>,
    pub format: ImageFormat,
}

/// Fields recovered from an ID3v2 tag or an Ogg comment vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub track_number: Option<String>,
    pub date: Option<String>,
    /// COMM frame (ID3v2) or DESCRIPTION field (Ogg).
    pub comment: Option<String>,
    pub composer: Option<String>,
    pub album_art: Option<AlbumArt>,
}

impl TagMetadata {
    /// True when no field at all was recovered.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.genre.is_none()
            && self.track_number.is_none()
            && self.date.is_none()
            && self.comment.is_none()
            && self.composer.is_none()
            && self.album_art.is_none()
    }
}
