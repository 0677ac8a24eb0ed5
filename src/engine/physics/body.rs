use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for the two kinds of rigid body the game uses
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// A body moved by gravity, contacts and velocity commands
    pub fn new_dynamic() -> Self {
        Self::new(RigidBodyType::Dynamic)
    }

    /// An immovable body (ground, walls)
    pub fn new_fixed() -> Self {
        Self::new(RigidBodyType::Fixed)
    }

    fn new(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Initial position (rapier y-up coordinates)
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Keep the body awake; controlled bodies get velocity commands every tick
    pub fn never_sleep(mut self) -> Self {
        self.can_sleep = false;
        self
    }

    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body.
    ///
    /// No linear damping is applied: horizontal slow-down comes from the
    /// arcade drag that [`super::PhysicsWorld`] applies before each step.
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Axis-aligned box hit-box of `width` x `height`, frictionless and without bounce
pub fn hit_box(width: Real, height: Real, groups: CollisionGroups) -> Collider {
    ColliderBuilder::cuboid(width / 2.0, height / 2.0)
        .collision_groups(groups.to_interaction_groups())
        .friction(0.0)
        .friction_combine_rule(CoefficientCombineRule::Min)
        .restitution(0.0)
        .build()
}

/// Body and hit-box configurations for game objects
pub mod presets {
    use super::*;

    /// Player character body (dynamic, rotation locked, never sleeps)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .never_sleep()
            .build()
    }

    pub fn player_collider(width: Real, height: Real) -> Collider {
        hit_box(width, height, CollisionGroups::Player)
    }

    /// Platform body (ground and world bounds)
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    pub fn platform_collider(width: Real, height: Real) -> Collider {
        hit_box(width, height, CollisionGroups::Platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic().position(10.0, 20.0).build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
        assert_eq!(body.linear_damping(), 0.0);
        assert_eq!(body.gravity_scale(), 1.0);
    }

    #[test]
    fn test_player_preset() {
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(75.0, 150.0);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(
            collider.collision_groups(),
            CollisionGroups::Player.to_interaction_groups()
        );
    }

    #[test]
    fn test_hit_box_size() {
        let collider = presets::platform_collider(1000.0, 64.0);
        let aabb = collider.compute_aabb();

        assert_eq!(aabb.maxs.x - aabb.mins.x, 1000.0);
        assert_eq!(aabb.maxs.y - aabb.mins.y, 64.0);
    }

    #[test]
    fn test_platform_preset_is_fixed() {
        let body = presets::platform_body(0.0, 0.0);
        assert!(body.is_fixed());
    }
}
