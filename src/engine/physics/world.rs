use rapier2d::prelude::*;
use std::collections::HashMap;

use super::arcade::{ArcadeBody, ArcadeState};
use crate::core::math::move_toward;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (rapier y-up)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Arcade drag and facing offset per controlled body
    arcade: HashMap<RigidBodyHandle, ArcadeState>,
}

impl PhysicsWorld {
    /// Create a physics world with no gravity
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, 0.0])
    }

    /// Create a new physics world with custom gravity (rapier y-up)
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            arcade: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.apply_arcade_drag();

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Decay each arcade body's velocity toward zero by `drag * dt`
    fn apply_arcade_drag(&mut self) {
        let dt = self.integration_parameters.dt;
        for (handle, state) in &self.arcade {
            if state.drag.x == 0.0 && state.drag.y == 0.0 {
                continue;
            }
            let Some(body) = self.rigid_body_set.get_mut(*handle) else {
                continue;
            };

            let velocity = *body.linvel();
            let damped = vector![
                move_toward(velocity.x, 0.0, state.drag.x * dt),
                move_toward(velocity.y, 0.0, state.drag.y * dt)
            ];
            if damped != velocity {
                body.set_linvel(damped, true);
            }
        }
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Borrow a body and its hit-box as an arcade body.
    ///
    /// Returns `None` if either handle is no longer in the world.
    pub fn arcade_body(
        &mut self,
        body: RigidBodyHandle,
        collider: ColliderHandle,
    ) -> Option<ArcadeBody<'_>> {
        let attached = self
            .collider_set
            .get(collider)
            .is_some_and(|c| c.parent() == Some(body));
        if !attached || !self.rigid_body_set.contains(body) {
            return None;
        }

        Some(ArcadeBody::new(self, body, collider))
    }

    /// Drag and hit-box offset last set through the body's arcade view
    pub fn arcade_state(&self, handle: RigidBodyHandle) -> ArcadeState {
        self.arcade.get(&handle).copied().unwrap_or_default()
    }

    pub(super) fn arcade_state_mut(&mut self, handle: RigidBodyHandle) -> &mut ArcadeState {
        self.arcade.entry(handle).or_default()
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], ray_dir);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use approx::assert_relative_eq;

    #[test]
    fn test_arcade_drag_decays_velocity_linearly() {
        let mut world = PhysicsWorld::new();
        world.set_timestep(0.1);
        let handle = world.add_rigid_body(presets::player_body(0.0, 0.0));
        world.add_collider(presets::player_collider(1.0, 1.0), handle);
        world
            .get_rigid_body_mut(handle)
            .unwrap()
            .set_linvel(vector![100.0, 0.0], true);
        world.arcade_state_mut(handle).drag.x = 600.0;

        world.step();
        assert_relative_eq!(world.get_rigid_body(handle).unwrap().linvel().x, 40.0, epsilon = 1e-3);

        // Never overshoots past zero
        world.step();
        assert_eq!(world.get_rigid_body(handle).unwrap().linvel().x, 0.0);
    }

    #[test]
    fn test_arcade_body_requires_attached_collider() {
        let mut world = PhysicsWorld::new();
        let player = world.add_rigid_body(presets::player_body(0.0, 0.0));
        let ground = world.add_rigid_body(presets::platform_body(0.0, -10.0));
        let ground_collider = world.add_collider(presets::platform_collider(10.0, 1.0), ground);

        assert!(world.arcade_body(player, ground_collider).is_none());
    }

    #[test]
    fn test_untouched_body_has_no_arcade_state() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 0.0));

        assert_eq!(world.arcade_state(handle), ArcadeState::default());
    }
}
