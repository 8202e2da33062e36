//! Turning user input into playlist paths.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// Decode an open-dialog result buffer.
///
/// Two layouts exist: a single NUL-terminated path, or a directory followed
/// by file names, each NUL-terminated, with an extra NUL at the end:
/// `dir\0name1\0name2\0\0`. Anything after the double NUL is ignored.
pub fn parse_file_selection(buffer: &[u8]) -> Vec<PathBuf> {
    let mut parts = buffer
        .split(|&b| b == 0)
        .take_while(|part| !part.is_empty())
        .map(|part| String::from_utf8_lossy(part).into_owned());

    let Some(first) = parts.next() else {
        return Vec::new();
    };
    let names: Vec<String> = parts.collect();
    if names.is_empty() {
        return vec![PathBuf::from(first)];
    }

    let dir = PathBuf::from(first);
    names.into_iter().map(|name| dir.join(name)).collect()
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand command-line or prompt paths into playlist entries.
///
/// Files are kept as given, whatever their extension, so unplayable ones
/// still show up (grayed out). Directories are walked for files with one of
/// the configured extensions, sorted by path.
pub fn expand_paths(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            out.extend(scan_dir(path, settings));
        } else {
            out.push(path.clone());
        }
    }
    out
}

fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut found: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_audio_file(path, settings))
        .collect();

    found.sort();
    log::debug!("found {} audio files under {:?}", found.len(), dir);
    found
}
