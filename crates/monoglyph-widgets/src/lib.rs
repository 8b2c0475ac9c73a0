#![forbid(unsafe_code)]

//! Input widgets for monoglyph.

pub mod single_char;

pub use single_char::{
    ChangeLog, ChangeLogEntry, FieldChange, SingleCharField, SingleCharObserver,
};
