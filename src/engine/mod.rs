// Engine modules: input, physics, animation, timing

pub mod animation;
pub mod game_loop;
pub mod input;
pub mod physics;
