use std::collections::HashSet;

use super::types::{InputEvent, Key, PointerMoveEvent};

/// Input deltas collected between two frames.
///
/// `InputState` holds what is currently down; `InputFrame` holds what changed.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Cursor positions reported this frame, oldest first.
    pub fn pointer_moves(&self) -> impl Iterator<Item = PointerMoveEvent> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::PointerMoved(p) => Some(*p),
            _ => None,
        })
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
