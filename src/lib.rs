//! Lowers type-annotated syntax trees of a small C-like language to three-address code.

pub mod ast;
pub mod driver;
pub mod error;
pub mod il;
pub mod listing;
pub mod prelude;
pub mod samples;
