// Input handling system
//
// Keyboard input for the local player, with remappable bindings where several
// physical keys can drive the same logical action.
//
// ## Architecture
//
// - `action`: Logical actions and default key bindings (arrows + WASD)
// - `config`: Binding table and remapping
// - `player`: Held / just-pressed state, and the `InputState` trait the
//   character controller reads
// - `manager`: Routes winit keyboard events into the player state
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // After each simulation tick has read the edges
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use manager::InputManager;
pub use player::InputState;
