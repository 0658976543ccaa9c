//! Rendering adapter: backend-agnostic shader programs and uniform caching.
//!
//! # Invariants
//! - Exactly one program slot is active at a time, owned by [`RenderContext`]
//!   and changed only by bind/unbind.
//! - A cached uniform location is the one last resolved for that exact
//!   program. Lookup misses are never cached.
//! - Uniform writes are refused unless the writing program is bound.
//!
//! # Backends
//! [`GraphicsBackend`] is the seam to the graphics API. [`RecordingBackend`]
//! is an in-memory implementation for tests and headless runs; the OpenGL
//! implementation lives in `cadence-render-gl`.

mod backend;
mod context;
mod error;
mod headless;
mod scene;
mod shader;
mod uniform;

pub use backend::{GraphicsBackend, ProgramId, ShaderStage, UniformLocation, UniformValue};
pub use context::RenderContext;
pub use error::{ShaderError, UniformError};
pub use headless::{BackendCall, RecordingBackend};
pub use scene::{EmptyScene, Scene};
pub use shader::{ShaderProgram, TCOORD_ATTRIB, VERTEX_ATTRIB};
pub use uniform::UniformCache;

pub fn crate_info() -> &'static str {
    "cadence-render v0.1.0"
}
