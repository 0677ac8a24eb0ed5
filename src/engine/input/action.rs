// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Logical directions the character controller reads every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    /// Jump
    Up,
    /// Slide (while running)
    Down,
}

/// Represents an input source (a physical keyboard key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    // Future: Add controller support
    // GamepadButton(gilrs::Button),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings: arrow keys and WASD are equivalent aliases
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Arrow keys
        (InputSource::key(KeyCode::ArrowLeft), Action::Left),
        (InputSource::key(KeyCode::ArrowRight), Action::Right),
        (InputSource::key(KeyCode::ArrowUp), Action::Up),
        (InputSource::key(KeyCode::ArrowDown), Action::Down),
        // WASD
        (InputSource::key(KeyCode::KeyA), Action::Left),
        (InputSource::key(KeyCode::KeyD), Action::Right),
        (InputSource::key(KeyCode::KeyW), Action::Up),
        (InputSource::key(KeyCode::KeyS), Action::Down),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyA);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyA));
    }

    #[test]
    fn test_every_action_has_two_aliases() {
        let bindings = default_bindings();
        for action in [Action::Left, Action::Right, Action::Up, Action::Down] {
            let count = bindings.iter().filter(|(_, a)| *a == action).count();
            assert_eq!(count, 2, "{action:?} should be bound to an arrow key and a WASD key");
        }
    }

    #[test]
    fn test_no_duplicate_sources() {
        let bindings = default_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in default bindings"
            );
        }
    }
}
