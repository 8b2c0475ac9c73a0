#![forbid(unsafe_code)]

//! Core: canonical input events and text-unit helpers.

pub mod event;
pub mod grapheme;
