use std::collections::HashMap;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::backend::AudioBackend;
use crate::metadata::fetch_track_info;

use super::model::{Track, TrackId};
use super::order::{self, shuffle_current_first};

/// Which of the two orderings an index refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Order {
    /// What the user sees and rearranges.
    Display,
    /// What next/previous walk. Equal to `Display` unless shuffle is on.
    Play,
}

/// Tracks in an arena plus two orderings over the same set of ids.
pub struct Playlist {
    tracks: HashMap<TrackId, Track>,
    display: Vec<TrackId>,
    play: Vec<TrackId>,
    next_id: u64,
    shuffle: bool,
    rng: StdRng,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Playlist {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Playlist whose shuffles are driven by `rng`.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            tracks: HashMap::new(),
            display: Vec::new(),
            play: Vec::new(),
            next_id: 0,
            shuffle: false,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn ids(&self, order: Order) -> &[TrackId] {
        match order {
            Order::Display => &self.display,
            Order::Play => &self.play,
        }
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(&id)
    }

    pub fn id_at(&self, order: Order, index: usize) -> Option<TrackId> {
        self.ids(order).get(index).copied()
    }

    pub fn track_at(&self, order: Order, index: usize) -> Option<&Track> {
        self.id_at(order, index).and_then(|id| self.get(id))
    }

    /// Tracks in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.display.iter().filter_map(|id| self.tracks.get(id))
    }

    pub fn current_id(&self) -> Option<TrackId> {
        self.display
            .iter()
            .copied()
            .find(|id| self.tracks.get(id).is_some_and(|t| t.is_current))
    }

    pub fn current(&self) -> Option<&Track> {
        self.current_id().and_then(|id| self.get(id))
    }

    pub fn current_mut(&mut self) -> Option<&mut Track> {
        let id = self.current_id()?;
        self.get_mut(id)
    }

    /// Position of the current track in `order`; `None` when there is none
    /// (for instance right after it was removed).
    pub fn current_index(&self, order: Order) -> Option<usize> {
        let current = self.current_id()?;
        self.ids(order).iter().position(|&id| id == current)
    }

    /// Make `id` the only current track. Returns `false` for unknown ids.
    pub fn set_current(&mut self, id: TrackId) -> bool {
        if !self.tracks.contains_key(&id) {
            return false;
        }
        for (&other, track) in self.tracks.iter_mut() {
            track.is_current = other == id;
        }
        true
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.display.clear();
        self.play.clear();
    }

    /// Add `paths` to the end of the display order, replacing the playlist
    /// first unless `append` is set. Every track without info is passed to
    /// the metadata extractor. Returns the ids of the new tracks.
    pub fn add_tracks<B, I>(&mut self, paths: I, append: bool, backend: &mut B) -> Vec<TrackId>
    where
        B: AudioBackend,
        I: IntoIterator<Item = PathBuf>,
    {
        if !append {
            self.clear();
        }

        let mut added = Vec::new();
        for path in paths {
            let id = TrackId(self.next_id);
            self.next_id += 1;
            self.tracks.insert(id, Track::new(path));
            self.display.push(id);
            added.push(id);
        }

        for track in self.tracks.values_mut() {
            fetch_track_info(track, backend);
        }

        self.rebuild_play_order();
        log::debug!(
            "playlist now holds {} tracks ({} added)",
            self.len(),
            added.len()
        );
        added
    }

    /// Remove the track at `display_index` from both orders.
    ///
    /// Removing the current track leaves the playlist without one; callers
    /// decide what happens next.
    pub fn remove_track(&mut self, display_index: usize) -> Option<Track> {
        if display_index >= self.display.len() {
            return None;
        }
        let id = self.display.remove(display_index);
        self.play.retain(|&other| other != id);
        self.tracks.remove(&id)
    }

    /// Swap the track at `index` with its predecessor. Returns its new index.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.display.len() {
            return None;
        }
        self.display.swap(index, index - 1);
        self.sync_play_order();
        Some(index - 1)
    }

    /// Swap the track at `index` with its successor. Returns its new index.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index + 1 >= self.display.len() {
            return None;
        }
        self.display.swap(index, index + 1);
        self.sync_play_order();
        Some(index + 1)
    }

    /// Enabling shuffles the play order with the current track first;
    /// disabling restores display order.
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
        self.rebuild_play_order();
    }

    /// Play-order index `next()` should try, or `None` at the end of a
    /// non-repeating playlist. Without a current track this is always 0.
    pub fn next_candidate(&self, repeat: bool) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        match self.current_index(Order::Play) {
            Some(cur) => order::next_index(cur, self.len(), repeat),
            None => Some(0),
        }
    }

    /// Play-order index `prev()` should try. Without a current track this
    /// is always 0.
    pub fn prev_candidate(&self, repeat: bool) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        match self.current_index(Order::Play) {
            Some(cur) => order::prev_index(cur, self.len(), repeat),
            None => Some(0),
        }
    }

    /// Total duration of all tracks, in seconds.
    pub fn total_seconds(&self) -> u64 {
        self.tracks.values().map(|t| t.duration_secs).sum()
    }

    fn rebuild_play_order(&mut self) {
        self.play = self.display.clone();
        if self.shuffle {
            let current = self.current_id();
            shuffle_current_first(&mut self.play, current, &mut self.rng);
        }
    }

    /// Moving entries around only touches the play order when it mirrors
    /// the display order.
    fn sync_play_order(&mut self) {
        if !self.shuffle {
            self.play = self.display.clone();
        }
    }
}
