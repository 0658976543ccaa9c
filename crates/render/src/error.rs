use crate::backend::{ProgramId, ShaderStage};
use std::path::PathBuf;

/// Errors from building a shader program. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program failed to link: {log}")]
    Link { log: String },
    #[error("graphics backend error: {0}")]
    Backend(String),
}

/// Errors from writing a uniform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniformError {
    #[error("cannot set uniform {name:?} on program {program}: it is not bound (active: {active:?})")]
    NotBound {
        name: String,
        program: ProgramId,
        active: Option<ProgramId>,
    },
}
