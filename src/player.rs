//! Playback controller: transport commands, the skip-invalid selection
//! loops and the view state the front end renders.

mod controller;
mod state;

pub use controller::Player;
pub use state::{DEFAULT_CAPTION, InfoLabels, PlayOutcome, PlayerState, PositionBar};
