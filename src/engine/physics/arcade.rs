// Arcade-style body view over a rapier rigid body
//
// Game code works in screen space: +x right, +y down, so a negative vertical
// velocity means moving up. Rapier is y-up; the conversion lives here only.

use glam::Vec2;
use rapier2d::prelude::*;

use super::world::PhysicsWorld;
use crate::core::math::snap_to_zero;

/// How far below the hit-box a surface still counts as ground
const GROUND_RAY_LENGTH: Real = 1.0;

/// Ray origin inset above the bottom edge of the hit-box
const GROUND_RAY_INSET: Real = 0.5;

/// Velocities smaller than this are reported as zero so a resting body
/// does not flicker between rising and falling
const RESTING_VELOCITY_EPSILON: f32 = 0.5;

/// The physics operations the character controller needs from its body
pub trait PhysicsBody {
    /// Whether the body is resting on something directly below it
    fn touching_ground_below(&self) -> bool;

    /// Current velocity in screen space
    fn velocity(&self) -> Vec2;

    fn set_velocity_x(&mut self, vx: f32);

    fn set_velocity_y(&mut self, vy: f32);

    /// Arcade drag: each component decays toward zero by `drag * dt`
    fn set_drag(&mut self, x: f32, y: f32);

    /// Hit-box offset, mirrored with facing
    fn set_offset(&mut self, offset: Vec2);
}

/// Per-body arcade settings kept by the world between steps
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcadeState {
    pub drag: Vec2,
    pub offset: Vec2,
}

/// Convert a screen-space point or vector to rapier world space
pub fn to_world(v: Vec2) -> Vector<Real> {
    vector![v.x, -v.y]
}

/// Convert a rapier world-space vector to screen space
pub fn to_screen(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

/// A rigid body and its hit-box, borrowed from the world for one tick
pub struct ArcadeBody<'a> {
    world: &'a mut PhysicsWorld,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl<'a> ArcadeBody<'a> {
    pub(super) fn new(
        world: &'a mut PhysicsWorld,
        body: RigidBodyHandle,
        collider: ColliderHandle,
    ) -> Self {
        Self {
            world,
            body,
            collider,
        }
    }

    fn update_linvel(&mut self, f: impl FnOnce(&mut Vector<Real>)) {
        if let Some(body) = self.world.get_rigid_body_mut(self.body) {
            let mut linvel = *body.linvel();
            f(&mut linvel);
            body.set_linvel(linvel, true);
        }
    }
}

impl PhysicsBody for ArcadeBody<'_> {
    fn touching_ground_below(&self) -> bool {
        let Some(collider) = self.world.get_collider(self.collider) else {
            return false;
        };

        // Cast a short ray down from the bottom edge of the hit-box
        let aabb = collider.compute_aabb();
        let ray_origin = vector![aabb.center().x, aabb.mins.y + GROUND_RAY_INSET];
        let ray_direction = vector![0.0, -1.0];

        self.world
            .raycast(
                ray_origin,
                ray_direction,
                GROUND_RAY_INSET + GROUND_RAY_LENGTH,
                true,
                QueryFilter::default().exclude_rigid_body(self.body),
            )
            .is_some()
    }

    fn velocity(&self) -> Vec2 {
        let velocity = self
            .world
            .get_rigid_body(self.body)
            .map(|body| to_screen(body.linvel()))
            .unwrap_or_default();

        Vec2::new(
            snap_to_zero(velocity.x, RESTING_VELOCITY_EPSILON),
            snap_to_zero(velocity.y, RESTING_VELOCITY_EPSILON),
        )
    }

    fn set_velocity_x(&mut self, vx: f32) {
        self.update_linvel(|linvel| linvel.x = vx);
    }

    fn set_velocity_y(&mut self, vy: f32) {
        self.update_linvel(|linvel| linvel.y = -vy);
    }

    fn set_drag(&mut self, x: f32, y: f32) {
        self.world.arcade_state_mut(self.body).drag = Vec2::new(x.abs(), y.abs());
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.world.arcade_state_mut(self.body).offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;

    fn world_with_player(y_screen: f32) -> (PhysicsWorld, RigidBodyHandle, ColliderHandle) {
        let mut world = PhysicsWorld::new();

        // Ground whose top edge sits at screen y = 100
        let ground_center = to_world(Vec2::new(0.0, 110.0));
        let ground = world.add_rigid_body(presets::platform_body(ground_center.x, ground_center.y));
        world.add_collider(presets::platform_collider(200.0, 20.0), ground);

        let center = to_world(Vec2::new(0.0, y_screen));
        let body = world.add_rigid_body(presets::player_body(center.x, center.y));
        let collider = world.add_collider(presets::player_collider(10.0, 20.0), body);
        (world, body, collider)
    }

    #[test]
    fn test_screen_world_conversion_flips_y() {
        let world = to_world(Vec2::new(3.0, 4.0));
        assert_eq!(world, vector![3.0, -4.0]);
        assert_eq!(to_screen(&world), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_upward_velocity_is_negative_in_screen_space() {
        let (mut world, body, collider) = world_with_player(0.0);
        let mut arcade = world.arcade_body(body, collider).unwrap();
        arcade.set_velocity_y(-300.0);

        assert_eq!(arcade.velocity().y, -300.0);
        drop(arcade);
        assert_eq!(world.get_rigid_body(body).unwrap().linvel().y, 300.0);
    }

    #[test]
    fn test_set_velocity_x_keeps_vertical_component() {
        let (mut world, body, collider) = world_with_player(0.0);
        let mut arcade = world.arcade_body(body, collider).unwrap();
        arcade.set_velocity_y(50.0);
        arcade.set_velocity_x(200.0);

        assert_eq!(arcade.velocity(), Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_touching_ground_below() {
        // Player bottom edge at screen y = 100, exactly on the ground
        let (mut world, body, collider) = world_with_player(90.0);
        world.step();

        let arcade = world.arcade_body(body, collider).unwrap();
        assert!(arcade.touching_ground_below());
    }

    #[test]
    fn test_not_touching_ground_in_the_air() {
        let (mut world, body, collider) = world_with_player(0.0);
        world.step();

        let arcade = world.arcade_body(body, collider).unwrap();
        assert!(!arcade.touching_ground_below());
    }

    #[test]
    fn test_drag_and_offset_are_stored() {
        let (mut world, body, collider) = world_with_player(0.0);
        let mut arcade = world.arcade_body(body, collider).unwrap();
        arcade.set_drag(-600.0, 0.0);
        arcade.set_offset(Vec2::new(50.0, -220.0));

        let state = world.arcade_state(body);
        assert_eq!(state.drag, Vec2::new(600.0, 0.0));
        assert_eq!(state.offset, Vec2::new(50.0, -220.0));
    }
}
