/// Errors from constructing a fixed timestep.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimestepError {
    #[error("step size must be a positive finite number of seconds, got {0}")]
    InvalidStep(f64),
    #[error("tick rate must be a positive finite number of hertz, got {0}")]
    InvalidRate(f64),
}

/// Fixed-timestep accumulator.
///
/// Elapsed wall time is fed in with [`sample`](Self::sample) and handed back
/// out in constant-size steps with [`consume_step`](Self::consume_step).
/// Rendering happens once per sample, no matter how many steps it yielded.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step_seconds: f64,
    reference_time: f64,
    accumulator: f64,
    total_steps: u64,
}

impl FixedTimestep {
    /// Create a timestep whose first sample is measured from `start_time`.
    pub fn new(step_seconds: f64, start_time: f64) -> Result<Self, TimestepError> {
        if !(step_seconds.is_finite() && step_seconds > 0.0) {
            return Err(TimestepError::InvalidStep(step_seconds));
        }
        Ok(Self {
            step_seconds,
            reference_time: start_time,
            accumulator: 0.0,
            total_steps: 0,
        })
    }

    /// Create a timestep from a tick rate in hertz (60.0 gives 1/60 s steps).
    pub fn from_rate(hz: f64, start_time: f64) -> Result<Self, TimestepError> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(TimestepError::InvalidRate(hz));
        }
        Self::new(1.0 / hz, start_time)
    }

    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    /// Time of the last sample.
    pub fn reference_time(&self) -> f64 {
        self.reference_time
    }

    /// Elapsed time not yet handed out as a step.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Steps handed out since construction.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// How far the accumulator is into the next step, in `[0, 1)` after a
    /// full drain. Useful for interpolating render state between steps.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step_seconds
    }

    /// Take a new clock reading. Returns the elapsed time since the previous
    /// reading, which is also added to the accumulator.
    pub fn sample(&mut self, now: f64) -> f64 {
        let elapsed = now - self.reference_time;
        self.reference_time = now;
        self.accumulate(elapsed)
    }

    /// Add elapsed time directly. Negative or NaN amounts count as zero so the
    /// accumulator never drops below zero. Returns the amount actually added.
    pub fn accumulate(&mut self, elapsed: f64) -> f64 {
        if elapsed.is_nan() || elapsed < 0.0 {
            tracing::warn!(elapsed, "clock went backwards, ignoring sample");
            return 0.0;
        }
        self.accumulator += elapsed;
        elapsed
    }

    /// Hand out one step if a full step has accumulated.
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator >= self.step_seconds {
            self.accumulator -= self.step_seconds;
            self.total_steps += 1;
            true
        } else {
            false
        }
    }

    /// Hand out every accumulated step. Returns how many were taken.
    pub fn drain(&mut self) -> u64 {
        let mut steps = 0;
        while self.consume_step() {
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIXTY_HZ: f64 = 1.0 / 60.0;

    fn run(samples: &[f64]) -> FixedTimestep {
        let mut ts = FixedTimestep::new(SIXTY_HZ, 0.0).unwrap();
        for &dt in samples {
            ts.accumulate(dt);
            ts.drain();
        }
        ts
    }

    #[test]
    fn rejects_bad_step() {
        assert!(FixedTimestep::new(0.0, 0.0).is_err());
        assert!(FixedTimestep::new(-1.0, 0.0).is_err());
        assert!(FixedTimestep::new(f64::NAN, 0.0).is_err());
        assert!(FixedTimestep::new(f64::INFINITY, 0.0).is_err());
        assert!(FixedTimestep::from_rate(0.0, 0.0).is_err());
    }

    #[test]
    fn from_rate_inverts_hz() {
        let ts = FixedTimestep::from_rate(60.0, 0.0).unwrap();
        assert!((ts.step_seconds() - SIXTY_HZ).abs() < 1e-15);
    }

    #[test]
    fn sample_tracks_reference_time() {
        let mut ts = FixedTimestep::new(SIXTY_HZ, 1.0).unwrap();
        let elapsed = ts.sample(1.5);
        assert!((elapsed - 0.5).abs() < 1e-12);
        assert_eq!(ts.reference_time(), 1.5);
        assert!((ts.accumulator() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn literal_scenario_gives_four_steps() {
        let ts = run(&[0.02, 0.01, 0.05]);
        assert_eq!(ts.total_steps(), 4);
        assert!((ts.accumulator() - (0.08 - 4.0 * SIXTY_HZ)).abs() < 1e-9);
    }

    #[test]
    fn step_count_independent_of_split() {
        let one = run(&[0.05]);
        let five = run(&[0.01; 5]);
        let diff = one.total_steps() as i64 - five.total_steps() as i64;
        assert!(diff.abs() <= 1);
    }

    #[test]
    fn accumulator_stays_within_one_step() {
        let mut ts = FixedTimestep::new(SIXTY_HZ, 0.0).unwrap();
        let samples = [0.0, 0.001, 0.5, 0.016, 0.017, 1.0 / 60.0, 0.3333, 0.0001];
        for _ in 0..50 {
            for &dt in &samples {
                ts.accumulate(dt);
                ts.drain();
                assert!(ts.accumulator() >= 0.0);
                assert!(ts.accumulator() < ts.step_seconds());
                assert!(ts.alpha() < 1.0);
            }
        }
    }

    #[test]
    fn total_matches_floor_of_elapsed() {
        let samples = [0.013, 0.027, 0.004, 0.1, 0.0333, 0.009];
        let total: f64 = samples.iter().sum();
        let ts = run(&samples);
        let expected = (total / SIXTY_HZ).floor() as i64;
        assert!((ts.total_steps() as i64 - expected).abs() <= 1);
    }

    #[test]
    fn backwards_time_is_ignored() {
        let mut ts = FixedTimestep::new(SIXTY_HZ, 5.0).unwrap();
        assert_eq!(ts.sample(4.0), 0.0);
        assert_eq!(ts.accumulator(), 0.0);
        assert_eq!(ts.accumulate(f64::NAN), 0.0);
        assert_eq!(ts.accumulator(), 0.0);
    }

    #[test]
    fn consume_step_takes_one_at_a_time() {
        let mut ts = FixedTimestep::new(0.5, 0.0).unwrap();
        ts.accumulate(1.2);
        assert!(ts.consume_step());
        assert!(ts.consume_step());
        assert!(!ts.consume_step());
        assert_eq!(ts.total_steps(), 2);
        assert!((ts.accumulator() - 0.2).abs() < 1e-12);
    }
}
