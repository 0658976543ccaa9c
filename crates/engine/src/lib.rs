//! Game loop: fixed-rate updates and one render per iteration.
//!
//! # Invariants
//! - Host events are pumped only inside a fixed step, and the resulting key
//!   events are applied before anything reads the key table.
//! - Exactly one render per outer iteration, never one per fixed step.
//! - Once should-close is observed, no further fixed steps or renders run.
//! - Graphics errors after a frame are logged and counted, never fatal.

pub mod config;
pub mod game_loop;
pub mod host;

pub use config::{ConfigError, LoopConfig};
pub use game_loop::{GameLoop, LoopStats};
pub use host::{HeadlessHost, HostError, WindowHost};

pub fn crate_info() -> &'static str {
    "cadence-engine v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("engine"));
    }
}
