use crate::config::LoopConfig;
use crate::host::WindowHost;
use cadence_common::Key;
use cadence_input::{EventQueue, InputState};
use cadence_kernel::{Clock, FixedTimestep, TimestepError};
use cadence_render::{GraphicsBackend, RenderContext, Scene};

/// Counters collected while the loop runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Outer iterations started.
    pub iterations: u64,
    pub fixed_steps: u64,
    /// Frames cleared, drawn and presented.
    pub frames: u64,
    pub graphics_errors: u64,
    pub failed_swaps: u64,
}

/// Fixed-update, variable-render loop.
///
/// Each iteration samples the clock, runs as many fixed steps as the
/// accumulated time allows (each one pumping host events into the key table
/// and checking the quit key) and then renders once.
pub struct GameLoop<C, H, B, S> {
    clock: C,
    host: H,
    gfx: RenderContext<B>,
    scene: S,
    input: InputState,
    events: EventQueue,
    timestep: FixedTimestep,
    quit_key: Key,
    stats: LoopStats,
}

impl<C, H, B, S> GameLoop<C, H, B, S>
where
    C: Clock,
    H: WindowHost,
    B: GraphicsBackend,
    S: Scene<B>,
{
    /// Build a loop ticking at `tick_rate_hz`. Time is measured from the
    /// clock's reading at construction.
    pub fn new(
        clock: C,
        host: H,
        gfx: RenderContext<B>,
        scene: S,
        tick_rate_hz: f64,
    ) -> Result<Self, TimestepError> {
        let timestep = FixedTimestep::from_rate(tick_rate_hz, clock.now())?;
        Ok(Self {
            clock,
            host,
            gfx,
            scene,
            input: InputState::new(),
            events: EventQueue::new(),
            timestep,
            quit_key: Key::ESCAPE,
            stats: LoopStats::default(),
        })
    }

    /// Build a loop with the tick rate and quit key from `config`.
    pub fn from_config(
        clock: C,
        host: H,
        gfx: RenderContext<B>,
        scene: S,
        config: &LoopConfig,
    ) -> Result<Self, TimestepError> {
        Ok(Self::new(clock, host, gfx, scene, config.tick_rate_hz)?.with_quit_key(config.quit_key))
    }

    pub fn with_quit_key(mut self, key: Key) -> Self {
        self.quit_key = key;
        self
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn gfx(&self) -> &RenderContext<B> {
        &self.gfx
    }

    pub fn gfx_mut(&mut self) -> &mut RenderContext<B> {
        &mut self.gfx
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Take back the host, render context and scene.
    pub fn into_parts(self) -> (H, RenderContext<B>, S) {
        (self.host, self.gfx, self.scene)
    }

    /// Run until the host should close. Call [`GameLoop::into_parts`]
    /// afterwards to release scene resources while the context is alive.
    pub fn run(&mut self) -> LoopStats {
        tracing::info!(
            step_seconds = self.timestep.step_seconds(),
            quit_key = %self.quit_key,
            "entering game loop"
        );
        while self.iterate() {}
        tracing::info!(
            iterations = self.stats.iterations,
            fixed_steps = self.stats.fixed_steps,
            frames = self.stats.frames,
            graphics_errors = self.stats.graphics_errors,
            "game loop finished"
        );
        self.stats
    }

    /// Run one outer iteration. Returns false once the loop has closed, in
    /// which case nothing was rendered.
    pub fn iterate(&mut self) -> bool {
        if self.host.should_close() {
            return false;
        }
        self.stats.iterations += 1;

        self.timestep.sample(self.clock.now());
        while self.timestep.consume_step() {
            self.stats.fixed_steps += 1;
            self.fixed_update();
            if self.host.should_close() {
                tracing::debug!(
                    unprocessed = self.timestep.accumulator(),
                    "close requested during fixed step"
                );
                return false;
            }
        }

        self.render();
        true
    }

    fn fixed_update(&mut self) {
        self.host.poll_events(&mut self.events);
        self.input.apply(&mut self.events);
        if self.host.take_focus_lost() {
            tracing::debug!(held = self.input.held_count(), "focus lost, releasing keys");
            self.input.clear();
        }

        if self.input.is_down(self.quit_key) {
            tracing::info!(key = %self.quit_key, "quit key held, closing window");
            self.host.set_should_close(true);
            return;
        }

        let (x, y) = self.host.cursor_position();
        tracing::trace!(
            x,
            y,
            held = self.input.held_count(),
            unprocessed = self.timestep.accumulator(),
            step = self.timestep.step_seconds(),
            "fixed step"
        );
    }

    fn render(&mut self) {
        self.gfx.clear();
        self.scene.render(&mut self.gfx);

        if let Some(code) = self.gfx.last_error() {
            self.stats.graphics_errors += 1;
            tracing::warn!(code, "graphics error after frame ({code:#06x})");
        }

        if let Err(e) = self.host.swap_buffers() {
            self.stats.failed_swaps += 1;
            tracing::warn!("present failed: {e}");
        }
        self.stats.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use cadence_common::KeyEvent;
    use cadence_kernel::ManualClock;
    use cadence_render::{EmptyScene, RecordingBackend};

    type TestLoop = GameLoop<ManualClock, HeadlessHost, RecordingBackend, EmptyScene>;

    fn test_loop() -> (ManualClock, TestLoop) {
        let clock = ManualClock::new();
        let lp = GameLoop::new(
            clock.clone(),
            HeadlessHost::new(),
            RenderContext::new(RecordingBackend::new()),
            EmptyScene,
            60.0,
        )
        .unwrap();
        (clock, lp)
    }

    #[test]
    fn rejects_bad_tick_rate() {
        let result = GameLoop::new(
            ManualClock::new(),
            HeadlessHost::new(),
            RenderContext::new(RecordingBackend::new()),
            EmptyScene,
            0.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn renders_even_without_a_step() {
        let (clock, mut lp) = test_loop();
        clock.advance(0.001);
        assert!(lp.iterate());
        let stats = lp.stats();
        assert_eq!(stats.fixed_steps, 0);
        assert_eq!(stats.frames, 1);
        assert_eq!(lp.host().poll_count(), 0);
    }

    #[test]
    fn each_step_polls_once() {
        let (clock, mut lp) = test_loop();
        clock.advance(0.09);
        assert!(lp.iterate());
        assert_eq!(lp.stats().fixed_steps, 5);
        assert_eq!(lp.host().poll_count(), 5);
        assert_eq!(lp.stats().frames, 1);
    }

    #[test]
    fn quit_key_stops_before_render() {
        let (clock, mut lp) = test_loop();
        lp.host_mut().queue_keys([KeyEvent::press(Key::ESCAPE)]);
        clock.advance(0.05);

        assert!(!lp.iterate());
        assert!(lp.host().should_close());
        assert_eq!(lp.stats().fixed_steps, 1);
        assert_eq!(lp.stats().frames, 0);
        assert_eq!(lp.gfx().backend().clear_count(), 0);
    }

    #[test]
    fn custom_quit_key() {
        let (clock, lp) = test_loop();
        let mut lp = lp.with_quit_key(Key::Q);
        lp.host_mut()
            .queue_keys([KeyEvent::press(Key::ESCAPE), KeyEvent::press(Key::Q)]);
        clock.advance(0.02);
        assert!(!lp.iterate());
        assert!(lp.input().is_down(Key::ESCAPE));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let (clock, mut lp) = test_loop();
        lp.host_mut()
            .queue_keys([KeyEvent::press(Key::W), KeyEvent::press(Key::SPACE)]);
        lp.host_mut().queue_focus_loss([KeyEvent::press(Key::ESCAPE)]);

        clock.advance(0.02);
        assert!(lp.iterate());
        assert!(lp.input().is_down(Key::W));
        assert_eq!(lp.input().held_count(), 2);

        clock.advance(0.02);
        assert!(lp.iterate());
        assert_eq!(lp.input().held_count(), 0);
        assert!(!lp.host().should_close());
    }

    #[test]
    fn trailing_accumulator_is_below_one_step() {
        let (clock, mut lp) = test_loop();
        for dt in [0.004, 0.031, 0.016, 0.2, 0.0] {
            clock.advance(dt);
            lp.iterate();
            let acc = lp.timestep().accumulator();
            assert!((0.0..lp.timestep().step_seconds()).contains(&acc));
        }
    }
}
