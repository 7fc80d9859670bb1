pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod morph;
pub mod session;
pub mod voc;

pub use config::Config;
pub use engine::{Dialog, Event, EventKind, Presentation};
pub use error::{Result, VocabotError};
pub use voc::Vocabulary;
