//! Lightweight editor module for in-place note editing.
//!
//! Provides a rope-backed text buffer with cursor management and the
//! inline formatting commands, designed for integration into the TEA
//! architecture.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
