//! Loop kernel: monotonic time source and fixed-timestep scheduling.
//!
//! # Invariants
//! - Clock readings are non-decreasing and measured in seconds.
//! - After every completed drain the accumulator satisfies
//!   `0 <= accumulator < step_seconds`.
//! - The number of fixed steps depends only on the total elapsed time, not on
//!   how it was split across iterations.

pub mod clock;
pub mod timestep;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use timestep::{FixedTimestep, TimestepError};
