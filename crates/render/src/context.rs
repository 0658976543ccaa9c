use crate::backend::{GraphicsBackend, ProgramId, UniformLocation, UniformValue};

/// Owns the graphics backend and the single active-program slot.
///
/// The underlying pipeline has one active program at a time; this type makes
/// that slot explicit so binding state can be inspected and checked instead
/// of living in hidden global state.
#[derive(Debug)]
pub struct RenderContext<B> {
    backend: B,
    active_program: Option<ProgramId>,
}

impl<B: GraphicsBackend> RenderContext<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active_program: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// The program currently bound, if any.
    pub fn active_program(&self) -> Option<ProgramId> {
        self.active_program
    }

    pub fn is_bound(&self, program: ProgramId) -> bool {
        self.active_program == Some(program)
    }

    /// Bind `program`. Returns the previously bound program.
    pub fn bind(&mut self, program: ProgramId) -> Option<ProgramId> {
        let previous = self.active_program;
        if previous != Some(program) {
            self.backend.use_program(Some(program));
            self.active_program = Some(program);
        }
        previous
    }

    /// Clear the active slot. Returns the previously bound program.
    pub fn unbind(&mut self) -> Option<ProgramId> {
        let previous = self.active_program.take();
        self.backend.use_program(None);
        previous
    }

    /// Clear the frame buffer.
    pub fn clear(&mut self) {
        self.backend.clear();
    }

    /// Oldest pending graphics error code, if any.
    pub fn last_error(&mut self) -> Option<u32> {
        self.backend.last_error()
    }

    pub(crate) fn write_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        self.backend.write_uniform(location, value);
    }

    pub(crate) fn release_program(&mut self, program: ProgramId) {
        if self.active_program == Some(program) {
            self.unbind();
        }
        self.backend.delete_program(program);
    }
}
