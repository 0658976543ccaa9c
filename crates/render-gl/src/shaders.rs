//! Built-in copies of the background program's GLSL sources.
//!
//! The desktop app reads the sources from its shader directory; these copies
//! serve headless runs and tests.

/// Vertex stage of the background program.
pub const BG_VERT: &str = include_str!("../../../shaders/bg.vert");

/// Fragment stage of the background program.
pub const BG_FRAG: &str = include_str!("../../../shaders/bg.frag");

/// Projection uniform written once at startup.
pub const PR_MATRIX: &str = "pr_matrix";
