use cadence_render::{
    GraphicsBackend, ProgramId, ShaderError, ShaderStage, UniformLocation, UniformValue,
};
use glow::HasContext;
use std::sync::Arc;

/// Colour the frame buffer is cleared to before each frame.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 0.0];

fn native_program(id: ProgramId) -> glow::Program {
    glow::NativeProgram(id.0)
}

fn native_location(location: UniformLocation) -> glow::UniformLocation {
    glow::NativeUniformLocation(location.0)
}

/// [`GraphicsBackend`] over an OpenGL 3.3 context.
///
/// The context must be current on the calling thread for the lifetime of the
/// backend. The `glow::Context` is shared with the window host, which needs
/// it for viewport updates on resize.
pub struct GlBackend {
    gl: Arc<glow::Context>,
}

impl GlBackend {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self::with_clear_color(gl, DEFAULT_CLEAR_COLOR)
    }

    pub fn with_clear_color(gl: Arc<glow::Context>, clear_color: [f32; 4]) -> Self {
        let [r, g, b, a] = clear_color;
        unsafe { gl.clear_color(r, g, b, a) };
        Self { gl }
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Version and renderer strings reported by the driver.
    pub fn driver_info(&self) -> (String, String) {
        unsafe {
            (
                self.gl.get_parameter_string(glow::VERSION),
                self.gl.get_parameter_string(glow::RENDERER),
            )
        }
    }

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<glow::Shader, ShaderError> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.gl.create_shader(kind).map_err(ShaderError::Backend)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(ShaderError::Compile { stage, log });
            }
            Ok(shader)
        }
    }
}

impl GraphicsBackend for GlBackend {
    fn compile_and_link(&mut self, vertex: &str, fragment: &str) -> Result<ProgramId, ShaderError> {
        let vs = self.compile_stage(ShaderStage::Vertex, vertex)?;
        let fs = match self.compile_stage(ShaderStage::Fragment, fragment) {
            Ok(fs) => fs,
            Err(e) => {
                unsafe { self.gl.delete_shader(vs) };
                return Err(e);
            }
        };

        unsafe {
            let program = match self.gl.create_program() {
                Ok(p) => p,
                Err(e) => {
                    self.gl.delete_shader(vs);
                    self.gl.delete_shader(fs);
                    return Err(ShaderError::Backend(e));
                }
            };
            self.gl.attach_shader(program, vs);
            self.gl.attach_shader(program, fs);
            self.gl.link_program(program);
            let linked = self.gl.get_program_link_status(program);

            self.gl.detach_shader(program, vs);
            self.gl.detach_shader(program, fs);
            self.gl.delete_shader(vs);
            self.gl.delete_shader(fs);

            if !linked {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }
            Ok(ProgramId(program.0))
        }
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(native_program(program), name) }
            .map(|loc| UniformLocation(loc.0))
    }

    fn write_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        let loc = native_location(location);
        let loc = Some(&loc);
        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(loc, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(loc, v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32(loc, v.x, v.y),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(loc, v.x, v.y, v.z),
                UniformValue::Mat4(m) => {
                    self.gl
                        .uniform_matrix_4_f32_slice(loc, false, &m.to_cols_array())
                }
            }
        }
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        unsafe { self.gl.use_program(program.map(native_program)) };
    }

    fn clear(&mut self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) };
    }

    fn last_error(&mut self) -> Option<u32> {
        let code = error_code(unsafe { self.gl.get_error() })?;
        tracing::debug!(code, name = error_name(code), "GL error flag set");
        Some(code)
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { self.gl.delete_program(native_program(program)) };
    }
}

/// `None` for `GL_NO_ERROR`.
fn error_code(raw: u32) -> Option<u32> {
    (raw != glow::NO_ERROR).then_some(raw)
}

/// Readable name for a GL error code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_error_maps_to_none() {
        assert_eq!(error_code(glow::NO_ERROR), None);
        assert_eq!(error_code(glow::INVALID_OPERATION), Some(0x0502));
    }

    #[test]
    fn error_names() {
        assert_eq!(error_name(0x0500), "GL_INVALID_ENUM");
        assert_eq!(error_name(0x0505), "GL_OUT_OF_MEMORY");
        assert_eq!(error_name(0x1234), "unknown GL error");
    }

    #[test]
    fn handles_convert_without_loss() {
        let id = ProgramId(std::num::NonZeroU32::new(7).unwrap());
        assert_eq!(native_program(id).0.get(), 7);
        assert_eq!(native_location(UniformLocation(3)).0, 3);
    }

    #[test]
    fn default_clear_color_is_red() {
        assert_eq!(DEFAULT_CLEAR_COLOR, [1.0, 0.0, 0.0, 0.0]);
    }
}
