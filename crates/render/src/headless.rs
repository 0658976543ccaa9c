use crate::backend::{GraphicsBackend, ProgramId, ShaderStage, UniformLocation, UniformValue};
use crate::error::ShaderError;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::num::NonZeroU32;

/// One call made against a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CompileAndLink(ProgramId),
    UniformLocation { program: ProgramId, name: String },
    WriteUniform {
        location: UniformLocation,
        value: UniformValue,
    },
    UseProgram(Option<ProgramId>),
    Clear,
    DeleteProgram(ProgramId),
}

/// In-memory graphics backend.
///
/// Programs "compile" by scanning their sources for `uniform` declarations,
/// which become the program's resolvable uniforms. Every call is recorded so
/// tests can assert on exactly what reached the backend. Also used by the
/// headless CLI in place of a GPU.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    programs: HashMap<ProgramId, BTreeMap<String, UniformLocation>>,
    next_program: u32,
    calls: Vec<BackendCall>,
    pending_errors: VecDeque<u32>,
    link_failure: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an error code to be reported by the next `last_error` call.
    pub fn inject_error(&mut self, code: u32) {
        self.pending_errors.push_back(code);
    }

    /// Make the next `compile_and_link` fail at link time with `log`.
    pub fn fail_next_link(&mut self, log: impl Into<String>) {
        self.link_failure = Some(log.into());
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Number of backend lookups made for a uniform name.
    pub fn uniform_queries(&self, name: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::UniformLocation { name: n, .. } if n == name))
            .count()
    }

    /// Every uniform write so far, oldest first.
    pub fn writes(&self) -> Vec<(UniformLocation, UniformValue)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BackendCall::WriteUniform { location, value } => Some((*location, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::Clear))
            .count()
    }

    /// Uniform names declared by a linked program.
    pub fn declared_uniforms(&self, program: ProgramId) -> Vec<&str> {
        self.programs
            .get(&program)
            .map(|u| u.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Names declared with `uniform <type> <name>;` in a GLSL source.
fn scan_uniforms(source: &str) -> impl Iterator<Item = &str> {
    source.lines().filter_map(|line| {
        let decl = line.trim().strip_prefix("uniform ")?;
        let decl = decl.split(';').next()?.trim();
        let name = decl.split_whitespace().last()?;
        Some(name.split('[').next().unwrap_or(name))
    })
}

fn check_stage(source: &str, stage: ShaderStage) -> Result<(), ShaderError> {
    if source.trim().is_empty() {
        return Err(ShaderError::Compile {
            stage,
            log: "empty shader source".into(),
        });
    }
    if !source.contains("main") {
        return Err(ShaderError::Compile {
            stage,
            log: "no entry point `main`".into(),
        });
    }
    Ok(())
}

impl GraphicsBackend for RecordingBackend {
    fn compile_and_link(
        &mut self,
        vertex: &str,
        fragment: &str,
    ) -> Result<ProgramId, ShaderError> {
        check_stage(vertex, ShaderStage::Vertex)?;
        check_stage(fragment, ShaderStage::Fragment)?;
        if let Some(log) = self.link_failure.take() {
            return Err(ShaderError::Link { log });
        }

        self.next_program += 1;
        let id = NonZeroU32::new(self.next_program)
            .map(ProgramId)
            .ok_or_else(|| ShaderError::Backend("program ids exhausted".into()))?;

        let mut uniforms = BTreeMap::new();
        for name in scan_uniforms(vertex).chain(scan_uniforms(fragment)) {
            let next = UniformLocation(uniforms.len() as u32);
            uniforms.entry(name.to_string()).or_insert(next);
        }
        self.programs.insert(id, uniforms);
        self.calls.push(BackendCall::CompileAndLink(id));
        Ok(id)
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.calls.push(BackendCall::UniformLocation {
            program,
            name: name.to_string(),
        });
        self.programs.get(&program)?.get(name).copied()
    }

    fn write_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        self.calls.push(BackendCall::WriteUniform { location, value });
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.calls.push(BackendCall::UseProgram(program));
    }

    fn clear(&mut self) {
        self.calls.push(BackendCall::Clear);
    }

    fn last_error(&mut self) -> Option<u32> {
        self.pending_errors.pop_front()
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(&program);
        self.calls.push(BackendCall::DeleteProgram(program));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_uniform_declarations() {
        let src = "\
#version 330 core
uniform mat4 pr_matrix;
  uniform   vec3 light_pos ;
uniform float weights[4];
in vec4 position;
void main() {}
";
        let names: Vec<_> = scan_uniforms(src).collect();
        assert_eq!(names, vec!["pr_matrix", "light_pos", "weights"]);
    }

    #[test]
    fn shared_uniform_gets_one_location() {
        let mut backend = RecordingBackend::new();
        let p = backend
            .compile_and_link(
                "uniform mat4 pr_matrix;\nvoid main() {}",
                "uniform mat4 pr_matrix;\nuniform sampler2D tex;\nvoid main() {}",
            )
            .unwrap();
        assert_eq!(backend.declared_uniforms(p), vec!["pr_matrix", "tex"]);
    }

    #[test]
    fn compile_and_link_failures() {
        let mut backend = RecordingBackend::new();
        assert!(matches!(
            backend.compile_and_link("", "void main() {}"),
            Err(ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            })
        ));
        assert!(matches!(
            backend.compile_and_link("void main() {}", "float x;"),
            Err(ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            })
        ));
        backend.fail_next_link("varying mismatch");
        assert!(matches!(
            backend.compile_and_link("void main() {}", "void main() {}"),
            Err(ShaderError::Link { .. })
        ));
        assert!(backend.compile_and_link("void main() {}", "void main() {}").is_ok());
    }

    #[test]
    fn programs_get_distinct_ids() {
        let mut backend = RecordingBackend::new();
        let a = backend.compile_and_link("void main() {}", "void main() {}").unwrap();
        let b = backend.compile_and_link("void main() {}", "void main() {}").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn injected_errors_pop_in_order() {
        let mut backend = RecordingBackend::new();
        backend.inject_error(0x0502);
        backend.inject_error(0x0505);
        assert_eq!(backend.last_error(), Some(0x0502));
        assert_eq!(backend.last_error(), Some(0x0505));
        assert_eq!(backend.last_error(), None);
    }
}
