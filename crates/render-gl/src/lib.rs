//! OpenGL implementation of the rendering adapter, built on `glow`.
//!
//! # Invariants
//! - Every call assumes the GL context is current on the calling thread.
//! - Program and uniform handles map one-to-one onto GL object names.
//! - The clear colour is set once when the backend is created.

mod backend;
mod level;
pub mod shaders;

pub use backend::{DEFAULT_CLEAR_COLOR, GlBackend, error_name};
pub use level::{
    BG_INDICES, BG_VERTICES, BgLevel, BgVertex, LevelError, VIEW_HALF_HEIGHT, VIEW_HALF_WIDTH,
    background_projection, upload_projection,
};
