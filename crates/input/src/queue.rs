use cadence_common::KeyEvent;
use std::collections::VecDeque;

/// FIFO of key events waiting to be applied.
///
/// The window host pushes into it while pumping OS events; the loop drains it
/// right after, within the same fixed step.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<KeyEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: KeyEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and yield every queued event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = KeyEvent> + '_ {
        self.events.drain(..)
    }
}

impl Extend<KeyEvent> for EventQueue {
    fn extend<T: IntoIterator<Item = KeyEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_common::Key;

    #[test]
    fn drains_in_fifo_order() {
        let mut q = EventQueue::new();
        q.push(KeyEvent::press(Key::A));
        q.push(KeyEvent::release(Key::A));
        q.push(KeyEvent::press(Key::ESCAPE));
        assert_eq!(q.len(), 3);

        let drained: Vec<_> = q.drain().collect();
        assert_eq!(
            drained,
            vec![
                KeyEvent::press(Key::A),
                KeyEvent::release(Key::A),
                KeyEvent::press(Key::ESCAPE),
            ]
        );
        assert!(q.is_empty());
    }
}
