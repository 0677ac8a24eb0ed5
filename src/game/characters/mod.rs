// Character system
//
// This module contains everything related to playable characters:
// - Character entity, spawning and management
// - Controller tuning and the clip mix table
// - Facing and animation clip states
// - The per-tick movement and animation controller

pub mod character;
pub mod config;
pub mod controller;
pub mod state;

// Re-export commonly used types
pub use character::{Character, CharacterError, CharacterId, CharacterManager};
pub use config::ControllerConfig;
