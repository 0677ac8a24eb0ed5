// Character entity and management

use glam::Vec2;
use log::info;

use super::config::ControllerConfig;
use super::controller::CharacterController;
use super::state::Clip;
use crate::engine::animation::{AnimationClip, AnimationError, SkeletonAnimator};
use crate::engine::game_loop::TickTime;
use crate::engine::input::InputState;
use crate::engine::physics::{
    body::presets, to_screen, to_world, ColliderHandle, PhysicsWorld, RigidBodyHandle,
};

/// Unique identifier for a character
pub type CharacterId = u32;

/// Character errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CharacterError {
    #[error("Character {0} has no rigid body with an attached collider")]
    MissingBody(CharacterId),

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Playback rate the skeleton clips were authored at
const CLIP_FPS: f32 = 30.0;

fn clip_frames(clip: Clip) -> usize {
    match clip {
        Clip::Idle => 30,
        Clip::Run => 20,
        Clip::Jump | Clip::Fall => 15,
        Clip::Slide => 12,
    }
}

/// Skeleton clips every character ships with
pub fn standard_clips() -> Vec<AnimationClip> {
    Clip::ALL
        .into_iter()
        .map(|clip| {
            let animation = AnimationClip::from_frames(clip.name(), clip_frames(clip), CLIP_FPS);
            match clip {
                Clip::Run => animation.with_event("footstep", 0.3),
                _ => animation,
            }
        })
        .collect()
}

/// A controlled character: physics handles, movement controller and skeleton
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,

    // Physics
    /// Handle to the character's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the character's hit-box
    pub collider_handle: ColliderHandle,

    controller: CharacterController,
    animation: SkeletonAnimator,
}

impl Character {
    /// Create a character at `spawn` (screen space) and add it to the physics world
    pub fn spawn(
        id: CharacterId,
        name: &str,
        config: ControllerConfig,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
    ) -> Result<Self, CharacterError> {
        let position = to_world(spawn);
        let body_handle = physics.add_rigid_body(presets::player_body(position.x, position.y));

        let size = config.hitbox_size();
        let collider = presets::player_collider(size.x, size.y);
        let collider_handle = physics.add_collider(collider, body_handle);

        Self::attach(id, name, config, physics, body_handle, collider_handle)
    }

    /// Wrap an existing body and hit-box in a character
    pub fn attach(
        id: CharacterId,
        name: &str,
        config: ControllerConfig,
        physics: &mut PhysicsWorld,
        body_handle: RigidBodyHandle,
        collider_handle: ColliderHandle,
    ) -> Result<Self, CharacterError> {
        let mut animation = SkeletonAnimator::with_clips(standard_clips());
        let mut body = physics
            .arcade_body(body_handle, collider_handle)
            .ok_or(CharacterError::MissingBody(id))?;
        let controller = CharacterController::new(config, &mut body, &mut animation);

        info!("Spawned character {} ({})", id, name);

        Ok(Self {
            id,
            name: name.to_string(),
            body_handle,
            collider_handle,
            controller,
            animation,
        })
    }

    /// Run the controller for one tick and advance the skeleton
    pub fn update(
        &mut self,
        time: TickTime,
        physics: &mut PhysicsWorld,
        input: &dyn InputState,
    ) -> Result<(), CharacterError> {
        let mut body = physics
            .arcade_body(self.body_handle, self.collider_handle)
            .ok_or(CharacterError::MissingBody(self.id))?;
        self.controller
            .update(time, &mut body, input, &mut self.animation)?;
        self.animation.update(time.delta_secs());
        Ok(())
    }

    /// Get character's current position in screen space
    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| to_screen(body.translation()))
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn animation(&self) -> &SkeletonAnimator {
        &self.animation
    }
}

/// Manages all characters in the game
#[derive(Debug, Default)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
        }
    }

    /// Spawn a new character
    pub fn spawn_character(
        &mut self,
        name: &str,
        config: ControllerConfig,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
    ) -> Result<CharacterId, CharacterError> {
        let id = self.next_id;
        let character = Character::spawn(id, name, config, physics, spawn)?;
        self.next_id += 1;
        self.characters.push(character);

        Ok(id)
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Update all characters from the same input
    pub fn update(
        &mut self,
        time: TickTime,
        physics: &mut PhysicsWorld,
        input: &dyn InputState,
    ) -> Result<(), CharacterError> {
        for character in &mut self.characters {
            character.update(time, physics, input)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::AnimationSink;
    use crate::engine::input::Action;
    use crate::engine::physics::PhysicsBody;

    struct NoInput;

    impl InputState for NoInput {
        fn is_held(&self, _action: Action) -> bool {
            false
        }
        fn just_pressed(&self, _action: Action) -> bool {
            false
        }
    }

    fn tick(n: u64) -> TickTime {
        TickTime {
            now_ms: n as f64 * 16.0,
            delta_ms: 16.0,
        }
    }

    #[test]
    fn test_standard_clips_cover_every_state() {
        let mut animator = SkeletonAnimator::with_clips(standard_clips());
        for clip in Clip::ALL {
            assert!(
                animator.set_animation(0, clip.name(), clip.loops()).is_ok(),
                "missing {}",
                clip.name()
            );
        }
    }

    #[test]
    fn test_run_clip_keys_a_footstep() {
        let clips = standard_clips();
        let run = clips.iter().find(|c| c.name == "Run").unwrap();

        assert_eq!(run.events.len(), 1);
        assert_eq!(run.events[0].name, "footstep");
        assert!(clips.iter().filter(|c| c.name != "Run").all(|c| c.events.is_empty()));
    }

    #[test]
    fn test_spawn_places_body_in_screen_space() {
        let mut physics = PhysicsWorld::new();
        let character = Character::spawn(
            7,
            "Hero",
            ControllerConfig::standard(),
            &mut physics,
            Vec2::new(200.0, 400.0),
        )
        .unwrap();

        assert_eq!(character.position(&physics), Some(Vec2::new(200.0, 400.0)));
        assert_eq!(character.controller().jump_count(), 0);

        let arcade = physics.arcade_state(character.body_handle);
        assert_eq!(arcade.drag, Vec2::new(600.0, 0.0));
        assert_eq!(arcade.offset, Vec2::new(50.0, -220.0));
    }

    #[test]
    fn test_attach_without_collider_fails() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_rigid_body(presets::player_body(0.0, 0.0));
        let ground = physics.add_rigid_body(presets::platform_body(0.0, -50.0));
        let ground_collider = physics.add_collider(presets::platform_collider(10.0, 10.0), ground);

        let result = Character::attach(
            3,
            "Ghost",
            ControllerConfig::standard(),
            &mut physics,
            body,
            ground_collider,
        );
        assert_eq!(result.err(), Some(CharacterError::MissingBody(3)));
    }

    #[test]
    fn test_first_update_plays_idle() {
        let mut physics = PhysicsWorld::new();
        let mut character = Character::spawn(
            0,
            "Hero",
            ControllerConfig::standard(),
            &mut physics,
            Vec2::ZERO,
        )
        .unwrap();

        character.update(tick(1), &mut physics, &NoInput).unwrap();

        let current = character.animation().current(0).unwrap();
        assert_eq!(current.clip_name(), "Idle");
        assert!(current.track_time() > 0.0);
    }

    #[test]
    fn test_manager_assigns_unique_ids() {
        let mut physics = PhysicsWorld::new();
        let mut manager = CharacterManager::new();

        let a = manager
            .spawn_character("A", ControllerConfig::standard(), &mut physics, Vec2::ZERO)
            .unwrap();
        let b = manager
            .spawn_character("B", ControllerConfig::standard(), &mut physics, Vec2::new(100.0, 0.0))
            .unwrap();
        assert_ne!(a, b);

        assert_eq!(manager.get(a).unwrap().name, "A");
        assert_eq!(
            manager.get(b).unwrap().position(&physics),
            Some(Vec2::new(100.0, 0.0))
        );
        assert!(manager.get(b + 1).is_none());
    }

    #[test]
    fn test_manager_updates_every_character() {
        let mut physics = PhysicsWorld::new();
        let mut manager = CharacterManager::new();
        let ids: Vec<_> = (0..2)
            .map(|i| {
                manager
                    .spawn_character(
                        "Hero",
                        ControllerConfig::standard(),
                        &mut physics,
                        Vec2::new(i as f32 * 200.0, 0.0),
                    )
                    .unwrap()
            })
            .collect();

        manager.update(tick(1), &mut physics, &NoInput).unwrap();

        for id in ids {
            let current = manager.get(id).unwrap().animation().current(0).unwrap();
            assert_eq!(current.clip_name(), "Idle");
        }
    }

    #[test]
    fn test_controller_drives_the_rigid_body() {
        struct RightHeld;
        impl InputState for RightHeld {
            fn is_held(&self, action: Action) -> bool {
                action == Action::Right
            }
            fn just_pressed(&self, _action: Action) -> bool {
                false
            }
        }

        let mut physics = PhysicsWorld::new();
        let mut character = Character::spawn(
            0,
            "Hero",
            ControllerConfig::standard(),
            &mut physics,
            Vec2::ZERO,
        )
        .unwrap();

        character.update(tick(1), &mut physics, &RightHeld).unwrap();

        // Airborne in an empty world, so air speed applies
        let body = physics
            .arcade_body(character.body_handle, character.collider_handle)
            .unwrap();
        assert_eq!(body.velocity().x, 150.0);
    }
}
