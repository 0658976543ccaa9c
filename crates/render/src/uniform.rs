use crate::backend::{GraphicsBackend, ProgramId, UniformLocation};
use std::collections::HashMap;

/// Cache from uniform name to resolved location, tied to one program.
///
/// Only successful lookups are stored. A name the program does not have is
/// looked up (and warned about) again on every request, since the uniform may
/// only be missing because the compiler optimised it out of this build.
#[derive(Debug)]
pub struct UniformCache {
    program: ProgramId,
    locations: HashMap<String, UniformLocation>,
}

impl UniformCache {
    pub fn new(program: ProgramId) -> Self {
        Self {
            program,
            locations: HashMap::new(),
        }
    }

    /// The program every cached location belongs to.
    pub fn program(&self) -> ProgramId {
        self.program
    }

    /// Location of `name` in this cache's program, querying the backend on a
    /// cache miss.
    pub fn resolve<B>(&mut self, backend: &mut B, name: &str) -> Option<UniformLocation>
    where
        B: GraphicsBackend + ?Sized,
    {
        if let Some(&location) = self.locations.get(name) {
            return Some(location);
        }

        match backend.uniform_location(self.program, name) {
            Some(location) => {
                self.locations.insert(name.to_string(), location);
                Some(location)
            }
            None => {
                tracing::warn!(program = %self.program, uniform = name, "could not find uniform variable");
                None
            }
        }
    }

    /// Cached location, without touching the backend.
    pub fn get(&self, name: &str) -> Option<UniformLocation> {
        self.locations.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
