use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

use super::files::{expand_paths, parse_file_selection};
use super::order::{next_index, prev_index};
use super::*;
use crate::backend::mock::{MockBackend, MockFile};
use crate::config::LibrarySettings;

fn paths(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("/music/{i:02}.mp3"))).collect()
}

fn backend_for(paths: &[PathBuf]) -> MockBackend {
    let mut backend = MockBackend::new();
    for p in paths {
        backend.add_file(p.clone(), MockFile::default());
    }
    backend
}

fn seeded(n: usize) -> (Playlist, MockBackend) {
    let p = paths(n);
    let mut backend = backend_for(&p);
    let mut playlist = Playlist::with_rng(StdRng::seed_from_u64(7));
    playlist.add_tracks(p, false, &mut backend);
    (playlist, backend)
}

fn names(playlist: &Playlist, order: Order) -> Vec<String> {
    playlist
        .ids(order)
        .iter()
        .map(|&id| playlist.get(id).unwrap().file_name.clone())
        .collect()
}

fn current_count(playlist: &Playlist) -> usize {
    playlist.iter().filter(|t| t.is_current()).count()
}

#[test]
fn add_replaces_unless_appending() {
    let (mut playlist, mut backend) = seeded(3);
    assert_eq!(playlist.len(), 3);
    assert_eq!(names(&playlist, Order::Display), names(&playlist, Order::Play));

    backend.add_file("/music/extra.mp3", MockFile::default());
    playlist.add_tracks([PathBuf::from("/music/extra.mp3")], true, &mut backend);
    assert_eq!(playlist.len(), 4);
    assert_eq!(playlist.track_at(Order::Display, 3).unwrap().file_name, "extra.mp3");

    playlist.add_tracks([PathBuf::from("/music/extra.mp3")], false, &mut backend);
    assert_eq!(playlist.len(), 1);
}

#[test]
fn added_tracks_are_read_for_info() {
    let mut backend = MockBackend::new().with_file("/music/ok.mp3", MockFile::default());
    let mut playlist = Playlist::new();
    playlist.add_tracks(
        [PathBuf::from("/music/ok.mp3"), PathBuf::from("/music/broken.mp3")],
        false,
        &mut backend,
    );

    let ok = playlist.track_at(Order::Display, 0).unwrap();
    assert!(ok.has_info && ok.is_valid);
    let broken = playlist.track_at(Order::Display, 1).unwrap();
    assert!(!broken.has_info && !broken.is_valid);
}

#[test]
fn track_ids_are_not_reused() {
    let (mut playlist, mut backend) = seeded(2);
    let before: HashSet<TrackId> = playlist.ids(Order::Display).iter().copied().collect();
    playlist.remove_track(1);

    let added = playlist.add_tracks(paths(1), true, &mut backend);
    assert!(!before.contains(&added[0]));
}

#[test]
fn set_current_keeps_a_single_current_track() {
    let (mut playlist, _) = seeded(4);
    assert_eq!(current_count(&playlist), 0);
    assert_eq!(playlist.current_index(Order::Play), None);

    let a = playlist.id_at(Order::Display, 1).unwrap();
    let b = playlist.id_at(Order::Display, 3).unwrap();
    assert!(playlist.set_current(a));
    assert!(playlist.set_current(b));
    assert_eq!(current_count(&playlist), 1);
    assert_eq!(playlist.current_id(), Some(b));
    assert_eq!(playlist.current_index(Order::Display), Some(3));
}

#[test]
fn shuffle_is_a_permutation_with_current_first() {
    let (mut playlist, _) = seeded(12);
    let current = playlist.id_at(Order::Display, 5).unwrap();
    playlist.set_current(current);

    playlist.set_shuffle(true);
    assert!(playlist.shuffle());
    let display: HashSet<_> = playlist.ids(Order::Display).iter().copied().collect();
    let play: HashSet<_> = playlist.ids(Order::Play).iter().copied().collect();
    assert_eq!(display, play);
    assert_eq!(playlist.ids(Order::Play).len(), 12);
    assert_eq!(playlist.current_index(Order::Play), Some(0));
    assert_eq!(current_count(&playlist), 1);

    playlist.set_shuffle(false);
    assert_eq!(names(&playlist, Order::Display), names(&playlist, Order::Play));
}

#[test]
fn adding_while_shuffled_reshuffles_around_current() {
    let (mut playlist, mut backend) = seeded(6);
    let current = playlist.id_at(Order::Display, 4).unwrap();
    playlist.set_current(current);
    playlist.set_shuffle(true);

    backend.add_file("/music/late.mp3", MockFile::default());
    playlist.add_tracks([PathBuf::from("/music/late.mp3")], true, &mut backend);

    assert_eq!(playlist.ids(Order::Play).len(), 7);
    assert_eq!(playlist.id_at(Order::Play, 0), Some(current));
}

#[test]
fn next_with_repeat_wraps_back_to_start() {
    let len = 5;
    let mut idx = 0;
    for _ in 0..len {
        idx = next_index(idx, len, true).unwrap();
    }
    assert_eq!(idx, 0);
}

#[test]
fn neighbours_at_the_edges() {
    assert_eq!(next_index(4, 5, false), None);
    assert_eq!(next_index(4, 5, true), Some(0));
    assert_eq!(next_index(0, 0, true), None);
    assert_eq!(prev_index(0, 5, false), None);
    assert_eq!(prev_index(0, 5, true), Some(4));
    assert_eq!(prev_index(3, 5, false), Some(2));
}

#[test]
fn candidates_follow_play_order() {
    let (mut playlist, _) = seeded(3);
    let last = playlist.id_at(Order::Play, 2).unwrap();
    playlist.set_current(last);
    assert_eq!(playlist.next_candidate(false), None);
    assert_eq!(playlist.next_candidate(true), Some(0));
    assert_eq!(playlist.prev_candidate(false), Some(1));
}

#[test]
fn removing_current_falls_back_to_the_first_play_position() {
    let (mut playlist, _) = seeded(4);
    let cur = playlist.id_at(Order::Display, 2).unwrap();
    playlist.set_current(cur);

    let removed = playlist.remove_track(2).unwrap();
    assert!(removed.is_current());
    assert_eq!(playlist.len(), 3);
    assert_eq!(playlist.ids(Order::Play).len(), 3);
    assert!(playlist.current_id().is_none());

    assert_eq!(playlist.next_candidate(false), Some(0));
    assert_eq!(playlist.next_candidate(true), Some(0));
    assert_eq!(playlist.prev_candidate(false), Some(0));
}

#[test]
fn removing_out_of_range_is_a_no_op() {
    let (mut playlist, _) = seeded(2);
    assert!(playlist.remove_track(2).is_none());
    assert_eq!(playlist.len(), 2);
}

#[test]
fn moves_swap_neighbours_and_resync_unshuffled_play_order() {
    let (mut playlist, _) = seeded(3);
    assert_eq!(playlist.move_up(0), None);
    assert_eq!(playlist.move_down(2), None);
    assert_eq!(playlist.move_down(7), None);

    assert_eq!(playlist.move_up(2), Some(1));
    assert_eq!(names(&playlist, Order::Display), ["00.mp3", "02.mp3", "01.mp3"]);
    assert_eq!(names(&playlist, Order::Play), ["00.mp3", "02.mp3", "01.mp3"]);

    assert_eq!(playlist.move_down(0), Some(1));
    assert_eq!(names(&playlist, Order::Display), ["02.mp3", "00.mp3", "01.mp3"]);
}

#[test]
fn moves_leave_shuffled_play_order_alone() {
    let (mut playlist, _) = seeded(8);
    playlist.set_shuffle(true);
    let play_before = playlist.ids(Order::Play).to_vec();

    playlist.move_down(0);
    assert_eq!(playlist.ids(Order::Play), play_before.as_slice());
}

#[test]
fn file_format_comes_from_the_extension() {
    assert_eq!(FileFormat::from_path(Path::new("a.MP3")), FileFormat::Mp3);
    assert_eq!(FileFormat::from_path(Path::new("a.ogg")), FileFormat::Ogg);
    assert_eq!(FileFormat::from_path(Path::new("a.flac")), FileFormat::Flac);
    assert_eq!(FileFormat::from_path(Path::new("a.m4a")), FileFormat::Aac);
    assert_eq!(FileFormat::from_path(Path::new("a.wav")), FileFormat::Unknown);
    assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::Unknown);
}

#[test]
fn selection_buffer_with_a_single_path() {
    let files = parse_file_selection(b"/music/Led Zeppelin - Stairway.mp3\0");
    assert_eq!(files, vec![PathBuf::from("/music/Led Zeppelin - Stairway.mp3")]);
}

#[test]
fn selection_buffer_with_a_directory_and_names() {
    let files = parse_file_selection(b"/music/album\0one.mp3\0two.ogg\0\0stale\0");
    assert_eq!(
        files,
        vec![
            PathBuf::from("/music/album/one.mp3"),
            PathBuf::from("/music/album/two.ogg"),
        ]
    );
    assert!(parse_file_selection(b"").is_empty());
    assert!(parse_file_selection(b"\0\0").is_empty());
}

#[test]
fn expand_paths_walks_directories_for_known_extensions() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("a.OGG"), b"not real").unwrap();
    fs::write(dir.path().join("notes.txt"), b"skip").unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"skip").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("c.flac"), b"not real").unwrap();

    let explicit = PathBuf::from("/elsewhere/kept.txt");
    let settings = LibrarySettings::default();
    let found = expand_paths(&[dir.path().to_path_buf(), explicit.clone()], &settings);

    assert_eq!(
        found,
        vec![
            dir.path().join("a.OGG"),
            dir.path().join("b.mp3"),
            sub.join("c.flac"),
            explicit,
        ]
    );
}

#[test]
fn expand_paths_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let found = expand_paths(&[dir.path().to_path_buf()], &settings);
    assert_eq!(found, vec![dir.path().join("root.mp3")]);
}
