use crate::backend::{GraphicsBackend, ProgramId, UniformLocation, UniformValue};
use crate::context::RenderContext;
use crate::error::{ShaderError, UniformError};
use crate::uniform::UniformCache;
use glam::{Mat4, Vec2, Vec3};
use std::path::Path;

/// Attribute slot for vertex positions.
pub const VERTEX_ATTRIB: u32 = 0;
/// Attribute slot for texture coordinates.
pub const TCOORD_ATTRIB: u32 = 1;

/// A linked vertex + fragment program with its own uniform cache.
///
/// Uniform setters only write while this program is the one bound in the
/// [`RenderContext`]; otherwise they return [`UniformError::NotBound`] and
/// leave the backend untouched.
#[derive(Debug)]
pub struct ShaderProgram {
    id: ProgramId,
    label: String,
    uniforms: UniformCache,
}

impl ShaderProgram {
    /// Compile and link a program from in-memory sources.
    pub fn from_sources<B: GraphicsBackend>(
        ctx: &mut RenderContext<B>,
        label: impl Into<String>,
        vertex: &str,
        fragment: &str,
    ) -> Result<Self, ShaderError> {
        let label = label.into();
        let id = ctx.backend_mut().compile_and_link(vertex, fragment)?;
        tracing::debug!(%id, label = %label, "shader program linked");
        Ok(Self {
            id,
            label,
            uniforms: UniformCache::new(id),
        })
    }

    /// Read a vertex and a fragment source file, then compile and link them.
    pub fn load<B: GraphicsBackend>(
        ctx: &mut RenderContext<B>,
        label: impl Into<String>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex = read_source(vertex_path.as_ref())?;
        let fragment = read_source(fragment_path.as_ref())?;
        Self::from_sources(ctx, label, &vertex, &fragment)
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn uniforms(&self) -> &UniformCache {
        &self.uniforms
    }

    /// Location of a uniform, served from the cache when possible.
    pub fn resolve<B: GraphicsBackend>(
        &mut self,
        ctx: &mut RenderContext<B>,
        name: &str,
    ) -> Option<UniformLocation> {
        self.uniforms.resolve(ctx.backend_mut(), name)
    }

    /// Bind this program as the active one.
    pub fn enable<B: GraphicsBackend>(&self, ctx: &mut RenderContext<B>) {
        ctx.bind(self.id);
    }

    /// Clear the active program slot.
    pub fn disable<B: GraphicsBackend>(&self, ctx: &mut RenderContext<B>) {
        if let Some(other) = ctx.unbind().filter(|&p| p != self.id) {
            tracing::debug!(program = %self.id, %other, "disable unbound a different program");
        }
    }

    pub fn is_enabled<B: GraphicsBackend>(&self, ctx: &RenderContext<B>) -> bool {
        ctx.is_bound(self.id)
    }

    /// Write a uniform. A name the program does not have is warned about and
    /// the write is dropped; that is not an error.
    pub fn set_uniform<B: GraphicsBackend>(
        &mut self,
        ctx: &mut RenderContext<B>,
        name: &str,
        value: UniformValue,
    ) -> Result<(), UniformError> {
        if !ctx.is_bound(self.id) {
            return Err(UniformError::NotBound {
                name: name.to_string(),
                program: self.id,
                active: ctx.active_program(),
            });
        }
        if let Some(location) = self.resolve(ctx, name) {
            ctx.write_uniform(location, value);
        }
        Ok(())
    }

    pub fn set_uniform_1i<B: GraphicsBackend>(
        &mut self,
        ctx: &mut RenderContext<B>,
        name: &str,
        value: i32,
    ) -> Result<(), UniformError> {
        self.set_uniform(ctx, name, UniformValue::Int(value))
    }

    pub fn set_uniform_1f<B: GraphicsBackend>(
        &mut self,
        ctx: &mut RenderContext<B>,
        name: &str,
        value: f32,
    ) -> Result<(), UniformError> {
        self.set_uniform(ctx, name, UniformValue::Float(value))
    }

    pub fn set_uniform_2f<B: GraphicsBackend>(
        &mut self,
        ctx: &mut RenderContext<B>,
        name: &str,
        x: f32,
        y: f32,
    ) -> Result<(), UniformError> {
        self.set_uniform(ctx, name, UniformValue::Vec2(Vec2::new(x, y)))
    }

    pub fn set_uniform_3f<B: GraphicsBackend>(
        &mut self,
        ctx: &mut RenderContext<B>,
        name: &str,
        value: Vec3,
    ) -> Result<(), UniformError> {
        self.set_uniform(ctx, name, UniformValue::Vec3(value))
    }

    pub fn set_uniform_mat4<B: GraphicsBackend>(
        &mut self,
        ctx: &mut RenderContext<B>,
        name: &str,
        value: &Mat4,
    ) -> Result<(), UniformError> {
        self.set_uniform(ctx, name, UniformValue::Mat4(*value))
    }

    /// Release the program. Clears the active slot first if it was bound.
    pub fn delete<B: GraphicsBackend>(self, ctx: &mut RenderContext<B>) {
        tracing::debug!(id = %self.id, label = %self.label, "deleting shader program");
        ctx.release_program(self.id);
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
