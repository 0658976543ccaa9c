//! Shared types used across the cadence workspace.
//!
//! # Invariants
//! - Key codes follow the GLFW numbering so tables sized by [`KEY_COUNT`]
//!   can be indexed directly by a valid key.

pub mod key;

pub use key::{Key, KeyAction, KeyEvent, KeyParseError, KEY_COUNT};
