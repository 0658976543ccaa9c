use crate::error::ShaderError;
use glam::{Mat4, Vec2, Vec3};
use std::fmt;
use std::num::NonZeroU32;

/// Handle to a linked program, issued by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(pub NonZeroU32);

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A resolved uniform location. There is no "not found" value; lookups
/// that miss return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// A typed value for a uniform write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Mat4(Mat4),
}

/// Shader stage, used in compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// The graphics API as seen by the loop and the shader abstraction.
///
/// Implementations talk to a single context that is current on the calling
/// thread. Program binding is tracked by [`RenderContext`](crate::RenderContext),
/// not by the backend.
pub trait GraphicsBackend {
    /// Compile a vertex + fragment pair and link them into a program.
    fn compile_and_link(&mut self, vertex: &str, fragment: &str)
    -> Result<ProgramId, ShaderError>;

    /// Look up a uniform by name. `None` if the program has no such uniform.
    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Write a value to a location of the currently bound program.
    fn write_uniform(&mut self, location: UniformLocation, value: UniformValue);

    /// Make `program` the active one, or clear the slot with `None`.
    fn use_program(&mut self, program: Option<ProgramId>);

    /// Clear the colour and depth buffers.
    fn clear(&mut self);

    /// Pop the oldest pending error code, if any.
    fn last_error(&mut self) -> Option<u32>;

    /// Release a program handle.
    fn delete_program(&mut self, program: ProgramId);
}
