//! Keyboard input: a fixed-size key-state table and the queue that feeds it.
//!
//! # Invariants
//! - The key table is only mutated by applying key events.
//! - Out-of-range key codes never index the table.
//! - Events are applied in the order the host delivered them, on the loop
//!   thread, so no locking is needed.

pub mod queue;
pub mod state;

pub use queue::EventQueue;
pub use state::InputState;
