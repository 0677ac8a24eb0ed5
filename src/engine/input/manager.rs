// Input manager - routes window events into per-frame input state

use super::action::InputSource;
use super::config::InputConfig;
use super::player::PlayerInput;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Coordinates key bindings and the local player's input state
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the given bindings
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    /// Apply a press or release of a single source
    pub fn process_key(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed => {
                // Key repeats never count as a fresh press
                if repeat {
                    return;
                }
                if let Some(action) = self.config.get_action(source) {
                    self.player.press(action, source);
                }
            }
            // Held state is tracked per source, so a key rebound while down
            // still releases the action it pressed
            ElementState::Released => self.player.release(source),
        }
    }

    /// Clear edge state once a simulation tick has consumed it
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Input state of the local player
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Drop every held key, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::with_defaults())
    }
}
