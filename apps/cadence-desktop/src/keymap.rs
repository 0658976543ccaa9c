use cadence_common::{Key, KeyAction};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Key code for a physical winit key. `None` for keys with no code.
pub fn key_from_winit(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key(66),
        KeyCode::KeyC => Key(67),
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key(69),
        KeyCode::KeyF => Key(70),
        KeyCode::KeyG => Key(71),
        KeyCode::KeyH => Key(72),
        KeyCode::KeyI => Key(73),
        KeyCode::KeyJ => Key(74),
        KeyCode::KeyK => Key(75),
        KeyCode::KeyL => Key(76),
        KeyCode::KeyM => Key(77),
        KeyCode::KeyN => Key(78),
        KeyCode::KeyO => Key(79),
        KeyCode::KeyP => Key(80),
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key(82),
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key(84),
        KeyCode::KeyU => Key(85),
        KeyCode::KeyV => Key(86),
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key(88),
        KeyCode::KeyY => Key(89),
        KeyCode::KeyZ => Key::Z,
        KeyCode::Digit0 => Key::DIGIT_0,
        KeyCode::Digit1 => Key(49),
        KeyCode::Digit2 => Key(50),
        KeyCode::Digit3 => Key(51),
        KeyCode::Digit4 => Key(52),
        KeyCode::Digit5 => Key(53),
        KeyCode::Digit6 => Key(54),
        KeyCode::Digit7 => Key(55),
        KeyCode::Digit8 => Key(56),
        KeyCode::Digit9 => Key(57),
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key(291),
        KeyCode::F3 => Key(292),
        KeyCode::F4 => Key(293),
        KeyCode::F5 => Key(294),
        KeyCode::F6 => Key(295),
        KeyCode::F7 => Key(296),
        KeyCode::F8 => Key(297),
        KeyCode::F9 => Key(298),
        KeyCode::F10 => Key(299),
        KeyCode::F11 => Key(300),
        KeyCode::F12 => Key::F12,
        KeyCode::Space => Key::SPACE,
        KeyCode::Quote => Key::APOSTROPHE,
        KeyCode::Comma => Key::COMMA,
        KeyCode::Minus => Key::MINUS,
        KeyCode::Period => Key::PERIOD,
        KeyCode::Slash => Key::SLASH,
        KeyCode::Semicolon => Key::SEMICOLON,
        KeyCode::Equal => Key::EQUAL,
        KeyCode::BracketLeft => Key::LEFT_BRACKET,
        KeyCode::Backslash => Key::BACKSLASH,
        KeyCode::BracketRight => Key::RIGHT_BRACKET,
        KeyCode::Backquote => Key::GRAVE_ACCENT,
        KeyCode::Escape => Key::ESCAPE,
        KeyCode::Enter => Key::ENTER,
        KeyCode::Tab => Key::TAB,
        KeyCode::Backspace => Key::BACKSPACE,
        KeyCode::Insert => Key::INSERT,
        KeyCode::Delete => Key::DELETE,
        KeyCode::ArrowRight => Key::RIGHT,
        KeyCode::ArrowLeft => Key::LEFT,
        KeyCode::ArrowDown => Key::DOWN,
        KeyCode::ArrowUp => Key::UP,
        KeyCode::PageUp => Key::PAGE_UP,
        KeyCode::PageDown => Key::PAGE_DOWN,
        KeyCode::Home => Key::HOME,
        KeyCode::End => Key::END,
        KeyCode::CapsLock => Key::CAPS_LOCK,
        KeyCode::ShiftLeft => Key::LEFT_SHIFT,
        KeyCode::ControlLeft => Key::LEFT_CONTROL,
        KeyCode::AltLeft => Key::LEFT_ALT,
        KeyCode::SuperLeft => Key::LEFT_SUPER,
        KeyCode::ShiftRight => Key::RIGHT_SHIFT,
        KeyCode::ControlRight => Key::RIGHT_CONTROL,
        KeyCode::AltRight => Key::RIGHT_ALT,
        KeyCode::SuperRight => Key::RIGHT_SUPER,
        KeyCode::ContextMenu => Key::MENU,
        _ => return None,
    };
    Some(key)
}

/// Press, repeat or release for a winit key state.
pub fn action_from_winit(state: ElementState, repeat: bool) -> KeyAction {
    match (state, repeat) {
        (ElementState::Released, _) => KeyAction::Release,
        (ElementState::Pressed, true) => KeyAction::Repeat,
        (ElementState::Pressed, false) => KeyAction::Press,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_match_ascii() {
        assert_eq!(key_from_winit(KeyCode::KeyA), Key::letter('a'));
        assert_eq!(key_from_winit(KeyCode::KeyM), Key::letter('m'));
        assert_eq!(key_from_winit(KeyCode::KeyZ), Key::letter('z'));
    }

    #[test]
    fn digits_and_function_keys() {
        assert_eq!(key_from_winit(KeyCode::Digit7), Key::digit(7));
        assert_eq!(key_from_winit(KeyCode::F5), Key::function(5));
        assert_eq!(key_from_winit(KeyCode::F11), Key::function(11));
    }

    #[test]
    fn escape_is_the_default_quit_key() {
        assert_eq!(key_from_winit(KeyCode::Escape), Some(Key::ESCAPE));
    }

    #[test]
    fn unmapped_keys() {
        assert_eq!(key_from_winit(KeyCode::NumpadAdd), None);
    }

    #[test]
    fn every_mapped_key_has_a_slot() {
        for code in [KeyCode::KeyQ, KeyCode::ContextMenu, KeyCode::SuperRight, KeyCode::Backquote] {
            assert!(key_from_winit(code).and_then(Key::index).is_some());
        }
    }

    #[test]
    fn repeat_flag() {
        assert_eq!(action_from_winit(ElementState::Pressed, false), KeyAction::Press);
        assert_eq!(action_from_winit(ElementState::Pressed, true), KeyAction::Repeat);
        assert_eq!(action_from_winit(ElementState::Released, true), KeyAction::Release);
    }
}
