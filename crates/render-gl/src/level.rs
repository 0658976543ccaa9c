use crate::backend::GlBackend;
use crate::shaders::PR_MATRIX;
use bytemuck::{Pod, Zeroable};
use cadence_render::{
    GraphicsBackend, RenderContext, Scene, ShaderProgram, TCOORD_ATTRIB, UniformError,
    VERTEX_ATTRIB,
};
use glam::Mat4;
use glow::HasContext;

/// Half the visible world width.
pub const VIEW_HALF_WIDTH: f32 = 10.0;
/// Half the visible world height, keeping a 16:9 aspect.
pub const VIEW_HALF_HEIGHT: f32 = VIEW_HALF_WIDTH * 9.0 / 16.0;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to create {what}: {reason}")]
    Resource { what: &'static str, reason: String },
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BgVertex {
    pub position: [f32; 3],
    pub tc: [f32; 2],
}

#[rustfmt::skip]
pub const BG_VERTICES: [BgVertex; 4] = [
    BgVertex { position: [-VIEW_HALF_WIDTH, -VIEW_HALF_HEIGHT, 0.0], tc: [0.0, 1.0] },
    BgVertex { position: [-VIEW_HALF_WIDTH,  VIEW_HALF_HEIGHT, 0.0], tc: [0.0, 0.0] },
    BgVertex { position: [ VIEW_HALF_WIDTH,  VIEW_HALF_HEIGHT, 0.0], tc: [1.0, 0.0] },
    BgVertex { position: [ VIEW_HALF_WIDTH, -VIEW_HALF_HEIGHT, 0.0], tc: [1.0, 1.0] },
];

pub const BG_INDICES: [u8; 6] = [0, 1, 2, 2, 3, 0];

/// Orthographic projection for the background: x in [-10, 10], y in
/// [-10·9/16, 10·9/16], z in [-1, 1].
pub fn background_projection() -> Mat4 {
    Mat4::orthographic_rh_gl(
        -VIEW_HALF_WIDTH,
        VIEW_HALF_WIDTH,
        -VIEW_HALF_HEIGHT,
        VIEW_HALF_HEIGHT,
        -1.0,
        1.0,
    )
}

/// Bind `program`, write the background projection to it and unbind again.
pub fn upload_projection<B: GraphicsBackend>(
    program: &mut ShaderProgram,
    ctx: &mut RenderContext<B>,
) -> Result<(), UniformError> {
    program.enable(ctx);
    let result = program.set_uniform_mat4(ctx, PR_MATRIX, &background_projection());
    program.disable(ctx);
    result
}

fn resource(what: &'static str) -> impl FnOnce(String) -> LevelError {
    move |reason| LevelError::Resource { what, reason }
}

/// Background level: one full-view quad drawn with the background program.
pub struct BgLevel {
    program: ShaderProgram,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
}

impl BgLevel {
    /// Upload the quad. `program` should already carry its projection.
    pub fn new(ctx: &mut RenderContext<GlBackend>, program: ShaderProgram) -> Result<Self, LevelError> {
        let gl = ctx.backend().gl();
        unsafe {
            let vao = gl.create_vertex_array().map_err(resource("vertex array"))?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl.create_buffer().map_err(resource("vertex buffer"))?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&BG_VERTICES),
                glow::STATIC_DRAW,
            );

            let stride = std::mem::size_of::<BgVertex>() as i32;
            gl.enable_vertex_attrib_array(VERTEX_ATTRIB);
            gl.vertex_attrib_pointer_f32(VERTEX_ATTRIB, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(TCOORD_ATTRIB);
            gl.vertex_attrib_pointer_f32(TCOORD_ATTRIB, 2, glow::FLOAT, false, stride, 3 * 4);

            let ibo = gl.create_buffer().map_err(resource("index buffer"))?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, &BG_INDICES, glow::STATIC_DRAW);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            tracing::debug!(program = %program.id(), "background level uploaded");
            Ok(Self {
                program,
                vao,
                vbo,
                ibo,
            })
        }
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Release GL objects and the program.
    pub fn destroy(self, ctx: &mut RenderContext<GlBackend>) {
        let gl = ctx.backend().gl();
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ibo);
        }
        self.program.delete(ctx);
    }
}

impl Scene<GlBackend> for BgLevel {
    fn render(&mut self, ctx: &mut RenderContext<GlBackend>) {
        self.program.enable(ctx);
        let gl = ctx.backend().gl();
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(glow::TRIANGLES, BG_INDICES.len() as i32, glow::UNSIGNED_BYTE, 0);
            gl.bind_vertex_array(None);
        }
        self.program.disable(ctx);
    }
}
