// The playable scene: one ground platform, world bounds and the player

use glam::Vec2;
use log::info;

use crate::engine::game_loop::{TickTime, FIXED_TIMESTEP};
use crate::engine::input::InputState;
use crate::engine::physics::{body::presets, to_world, PhysicsWorld};
use crate::game::characters::{
    Character, CharacterError, CharacterId, CharacterManager, ControllerConfig,
};

/// World size in pixels
pub const WORLD_SIZE: Vec2 = Vec2::new(1024.0, 768.0);

/// Ground platform centre and size
const GROUND_CENTER: Vec2 = Vec2::new(500.0, 700.0);
const GROUND_SIZE: Vec2 = Vec2::new(1000.0, 64.0);

/// Where the player appears
pub const PLAYER_SPAWN: Vec2 = Vec2::new(200.0, 400.0);

/// Thickness of the walls that keep bodies inside the world
const BOUNDS_THICKNESS: f32 = 32.0;

/// Owns the physics world and everything simulated in it
pub struct Scene {
    physics: PhysicsWorld,
    characters: CharacterManager,
    player: CharacterId,
}

impl Scene {
    /// Build the level and spawn the player
    pub fn new(config: ControllerConfig) -> Result<Self, CharacterError> {
        let mut physics = PhysicsWorld::with_gravity(to_world(Vec2::new(0.0, config.gravity)));
        physics.set_timestep(FIXED_TIMESTEP);

        add_platform(&mut physics, GROUND_CENTER, GROUND_SIZE);
        add_world_bounds(&mut physics);

        let mut characters = CharacterManager::new();
        let player = characters.spawn_character("Player", config, &mut physics, PLAYER_SPAWN)?;

        info!(
            "Scene ready: {}x{} world, player at {:?}",
            WORLD_SIZE.x, WORLD_SIZE.y, PLAYER_SPAWN
        );

        Ok(Self {
            physics,
            characters,
            player,
        })
    }

    /// Run the characters' controllers, then step the physics
    pub fn tick(&mut self, time: TickTime, input: &dyn InputState) -> Result<(), CharacterError> {
        self.characters.update(time, &mut self.physics, input)?;
        self.physics.step();
        Ok(())
    }

    pub fn player(&self) -> Option<&Character> {
        self.characters.get(self.player)
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }
}

/// Add a fixed box centred at `center` (screen space)
fn add_platform(physics: &mut PhysicsWorld, center: Vec2, size: Vec2) {
    let position = to_world(center);
    let body = physics.add_rigid_body(presets::platform_body(position.x, position.y));
    physics.add_collider(presets::platform_collider(size.x, size.y), body);
}

/// Walls on the left, right, top and bottom edges of the world
fn add_world_bounds(physics: &mut PhysicsWorld) {
    let half = BOUNDS_THICKNESS / 2.0;
    let width = WORLD_SIZE.x + 2.0 * BOUNDS_THICKNESS;
    let height = WORLD_SIZE.y + 2.0 * BOUNDS_THICKNESS;

    let walls = [
        (Vec2::new(-half, WORLD_SIZE.y / 2.0), Vec2::new(BOUNDS_THICKNESS, height)),
        (
            Vec2::new(WORLD_SIZE.x + half, WORLD_SIZE.y / 2.0),
            Vec2::new(BOUNDS_THICKNESS, height),
        ),
        (Vec2::new(WORLD_SIZE.x / 2.0, -half), Vec2::new(width, BOUNDS_THICKNESS)),
        (
            Vec2::new(WORLD_SIZE.x / 2.0, WORLD_SIZE.y + half),
            Vec2::new(width, BOUNDS_THICKNESS),
        ),
    ];

    for (center, size) in walls {
        add_platform(physics, center, size);
    }
}
