//! Application module: the root object the runtime drives and the UI draws.
//!
//! `App` owns the `Player` and the front-end-only state around it: the
//! selected playlist row, the path prompt and the panel visibility.

mod input;
mod model;

pub use model::*;
