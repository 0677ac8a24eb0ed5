// Per-player input state management

use super::action::{Action, InputSource};
use std::collections::{HashMap, HashSet};

/// Read-only view of logical input that the character controller samples each tick.
///
/// Actions without any binding simply report `false`.
pub trait InputState {
    /// The action is currently held by at least one of its sources
    fn is_held(&self, action: Action) -> bool;

    /// The action went from released to held since the last frame update
    fn just_pressed(&self, action: Action) -> bool;
}

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Sources currently holding each action down
    held_sources: HashMap<Action, HashSet<InputSource>>,

    /// Actions that were just pressed since the last update
    just_pressed: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held_sources
            .get(&action)
            .is_some_and(|sources| !sources.is_empty())
    }

    /// Register a press of `source`, which is bound to `action`.
    ///
    /// Pressing a second alias while the first is still down is not a new edge.
    pub(crate) fn press(&mut self, action: Action, source: InputSource) {
        let sources = self.held_sources.entry(action).or_default();
        if sources.is_empty() {
            self.just_pressed.insert(action);
        }
        sources.insert(source);
    }

    /// Register a release of `source`, whichever action it was holding.
    ///
    /// The action stays held while any other alias is still down.
    pub(crate) fn release(&mut self, source: InputSource) {
        for sources in self.held_sources.values_mut() {
            sources.remove(&source);
        }
    }

    /// Advance to a new frame, clearing edge state.
    /// Call this after the simulation has consumed the current edges.
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.held_sources.clear();
        self.just_pressed.clear();
    }
}

impl InputState for PlayerInput {
    fn is_held(&self, action: Action) -> bool {
        self.is_pressed(action)
    }

    fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }
}
