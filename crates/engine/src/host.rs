use cadence_common::KeyEvent;
use cadence_input::EventQueue;
use std::collections::VecDeque;

/// Errors from the window host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("window creation failed: {0}")]
    WindowCreation(String),
    #[error("graphics context error: {0}")]
    Context(String),
    #[error("buffer swap failed: {0}")]
    Swap(String),
}

/// The window and its event pump, as seen by the loop.
///
/// Creating the window is the concrete host's constructor and is fatal on
/// failure. Everything here runs on the loop thread.
pub trait WindowHost {
    /// Pump pending OS events. Key transitions go into `events`; a close
    /// request sets the should-close flag.
    fn poll_events(&mut self, events: &mut EventQueue);

    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, value: bool);

    /// Present the back buffer. May block on vsync.
    fn swap_buffers(&mut self) -> Result<(), HostError>;

    /// Cursor position in window coordinates.
    fn cursor_position(&self) -> (f64, f64);

    /// Whether the window lost keyboard focus since the last call. Key-ups
    /// for keys held at that moment are delivered elsewhere, if at all.
    fn take_focus_lost(&mut self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct ScriptedPoll {
    keys: Vec<KeyEvent>,
    close: bool,
    focus_lost: bool,
}

/// Window host with no window. Each poll delivers the next scripted batch.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    script: VecDeque<ScriptedPoll>,
    should_close: bool,
    focus_lost: bool,
    cursor: (f64, f64),
    polls: u64,
    swaps: u64,
    fail_swaps: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `events` on a future poll, after any batches already queued.
    pub fn queue_keys(&mut self, events: impl IntoIterator<Item = KeyEvent>) {
        self.script.push_back(ScriptedPoll {
            keys: events.into_iter().collect(),
            ..ScriptedPoll::default()
        });
    }

    /// Deliver a window-close request on a future poll.
    pub fn queue_close_request(&mut self) {
        self.script.push_back(ScriptedPoll {
            close: true,
            ..ScriptedPoll::default()
        });
    }

    /// Deliver `events` and then a focus loss on a future poll.
    pub fn queue_focus_loss(&mut self, events: impl IntoIterator<Item = KeyEvent>) {
        self.script.push_back(ScriptedPoll {
            keys: events.into_iter().collect(),
            focus_lost: true,
            ..ScriptedPoll::default()
        });
    }

    /// Close immediately, as if the user clicked the close button between
    /// iterations.
    pub fn request_close(&mut self) {
        self.should_close = true;
    }

    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
    }

    /// Make every swap fail from now on.
    pub fn fail_swaps(&mut self, fail: bool) {
        self.fail_swaps = fail;
    }

    pub fn poll_count(&self) -> u64 {
        self.polls
    }

    pub fn swap_count(&self) -> u64 {
        self.swaps
    }
}

impl WindowHost for HeadlessHost {
    fn poll_events(&mut self, events: &mut EventQueue) {
        self.polls += 1;
        if let Some(poll) = self.script.pop_front() {
            events.extend(poll.keys);
            if poll.close {
                self.should_close = true;
            }
            self.focus_lost |= poll.focus_lost;
        }
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn swap_buffers(&mut self) -> Result<(), HostError> {
        if self.fail_swaps {
            return Err(HostError::Swap("headless swap failure".into()));
        }
        self.swaps += 1;
        Ok(())
    }

    fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    fn take_focus_lost(&mut self) -> bool {
        std::mem::take(&mut self.focus_lost)
    }
}
