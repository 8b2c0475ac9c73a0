#![forbid(unsafe_code)]

//! Host screen for [`SingleCharField`](monoglyph_widgets::SingleCharField).
//!
//! The host subscribes to the field's notifications and logs each one with
//! the field's current character. Input comes either from a raw-mode
//! terminal (`interactive`) or from a script of edits (`replay`).

pub mod cli;
pub mod error;
pub mod host;
pub mod interactive;
pub mod logging;
pub mod replay;
pub mod script;

pub use cli::{run, run_from_env};
