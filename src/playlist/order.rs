//! Index arithmetic over the play order.
//!
//! These are pure so the controller's skip loops and the tests can reason
//! about them without a playlist.

use rand::Rng;
use rand::seq::SliceRandom;

use super::model::TrackId;

/// Play-order index after `current`, wrapping only when `repeat` is on.
pub fn next_index(current: usize, len: usize, repeat: bool) -> Option<usize> {
    if current + 1 < len {
        Some(current + 1)
    } else if repeat && len > 0 {
        Some(0)
    } else {
        None
    }
}

/// Play-order index before `current`, wrapping only when `repeat` is on.
pub fn prev_index(current: usize, len: usize, repeat: bool) -> Option<usize> {
    if current > 0 && current <= len {
        Some(current - 1)
    } else if repeat && len > 0 {
        Some(len - 1)
    } else {
        None
    }
}

/// Shuffle `order` in place and move `current` (if present) to the front.
pub(super) fn shuffle_current_first<R: Rng + ?Sized>(
    order: &mut [TrackId],
    current: Option<TrackId>,
    rng: &mut R,
) {
    order.shuffle(rng);
    if let Some(cur) = current {
        if let Some(pos) = order.iter().position(|&id| id == cur) {
            order.swap(0, pos);
        }
    }
}
