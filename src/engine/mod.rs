//! The dialog graph engine: matching, rendering and the per-turn
//! controller. Everything outside this module and `voc`/`session`/`morph`
//! is transport plumbing.

pub mod controller;
pub mod matcher;
pub mod renderer;
pub mod types;

pub use controller::Dialog;
pub use types::{Button, ButtonAction, Event, EventKind, Presentation};
