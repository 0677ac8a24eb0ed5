// Game layer: characters and the scene they live in

pub mod characters;
pub mod scene;
