use crate::queue::EventQueue;
use cadence_common::{Key, KeyAction, KEY_COUNT};

/// Which keys are currently held.
///
/// One flag per key slot. Press and repeat set the flag, release clears it.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: [bool; KEY_COUNT],
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys: [false; KEY_COUNT],
        }
    }
}

impl InputState {
    /// Create a table with every key released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Keys outside the table are ignored.
    pub fn on_key_event(&mut self, key: Key, action: KeyAction) {
        match key.index() {
            Some(i) => self.keys[i] = action.is_down(),
            None => tracing::trace!(code = key.0, "ignoring out-of-range key"),
        }
    }

    /// Whether `key` is held. Always false for keys outside the table.
    pub fn is_down(&self, key: Key) -> bool {
        key.index().is_some_and(|i| self.keys[i])
    }

    /// Apply every queued event in order. Returns how many were applied.
    pub fn apply(&mut self, queue: &mut EventQueue) -> usize {
        let mut applied = 0;
        for event in queue.drain() {
            self.on_key_event(event.key, event.action);
            applied += 1;
        }
        applied
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.keys.iter().filter(|&&down| down).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_common::KeyEvent;

    #[test]
    fn starts_with_nothing_held() {
        let input = InputState::new();
        assert_eq!(input.held_count(), 0);
        assert!(!input.is_down(Key::ESCAPE));
    }

    #[test]
    fn press_repeat_release() {
        let mut input = InputState::new();
        input.on_key_event(Key::W, KeyAction::Press);
        assert!(input.is_down(Key::W));
        input.on_key_event(Key::W, KeyAction::Repeat);
        assert!(input.is_down(Key::W));
        input.on_key_event(Key::W, KeyAction::Release);
        assert!(!input.is_down(Key::W));
    }

    #[test]
    fn repeat_without_press_counts_as_held() {
        let mut input = InputState::new();
        input.on_key_event(Key::SPACE, KeyAction::Repeat);
        assert!(input.is_down(Key::SPACE));
    }

    #[test]
    fn out_of_range_keys_are_ignored() {
        let mut input = InputState::new();
        for code in [-1, -1000, KEY_COUNT as i32, 65_535, i32::MAX, i32::MIN] {
            input.on_key_event(Key(code), KeyAction::Press);
            assert!(!input.is_down(Key(code)));
        }
        assert_eq!(input.held_count(), 0);
    }

    #[test]
    fn table_edges_are_addressable() {
        let mut input = InputState::new();
        let first = Key(0);
        let last = Key(KEY_COUNT as i32 - 1);
        input.on_key_event(first, KeyAction::Press);
        input.on_key_event(last, KeyAction::Press);
        assert!(input.is_down(first));
        assert!(input.is_down(last));
        assert_eq!(input.held_count(), 2);
    }

    #[test]
    fn apply_drains_queue_in_order() {
        let mut input = InputState::new();
        let mut queue = EventQueue::new();
        queue.push(KeyEvent::press(Key::A));
        queue.push(KeyEvent::press(Key::D));
        queue.push(KeyEvent::release(Key::A));
        queue.push(KeyEvent::press(Key(-1)));

        assert_eq!(input.apply(&mut queue), 4);
        assert!(queue.is_empty());
        assert!(!input.is_down(Key::A));
        assert!(input.is_down(Key::D));
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::new();
        input.on_key_event(Key::A, KeyAction::Press);
        input.on_key_event(Key::LEFT_SHIFT, KeyAction::Press);
        input.clear();
        assert_eq!(input.held_count(), 0);
    }
}
