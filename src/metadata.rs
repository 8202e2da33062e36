//! Per-track metadata: technical properties from the backend, tags from the
//! binary parsers, and the strings the front end shows.

mod display;
mod extractor;

pub use display::{
    compose_display_name, file_info_text, format_duration, playlist_summary, title_or_file_name,
};
pub use extractor::fetch_track_info;
