// Physics system using rapier2d
//
// Rapier does the simulation; `ArcadeBody` presents a body the way a 2D arcade
// engine would (screen-space velocities, linear drag, ground-contact flag).

mod arcade;
pub mod body;
mod collision;
mod world;

pub use arcade::{to_screen, to_world, PhysicsBody};
pub use body::{ColliderHandle, RigidBodyHandle};
pub use world::PhysicsWorld;
