// Character controller tuning
//
// Speeds are in pixels per second, times in milliseconds unless noted.

use glam::Vec2;

use super::state::{Clip, ClipMix};

/// Cross-fades declared on the animation state every tick
pub const CLIP_MIXES: [ClipMix; 6] = [
    ClipMix::new(Clip::Run, Clip::Idle, 0.3),
    ClipMix::new(Clip::Run, Clip::Jump, 0.3),
    ClipMix::new(Clip::Fall, Clip::Jump, 0.1),
    ClipMix::new(Clip::Jump, Clip::Jump, 2.0),
    ClipMix::new(Clip::Fall, Clip::Run, 0.1),
    ClipMix::new(Clip::Slide, Clip::Run, 0.1),
];

/// Movement, jump, slide and animation tuning for one character
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    // Movement
    /// Horizontal speed while grounded
    pub run_speed: f32,
    /// Base horizontal speed while airborne, before `air_speed_factor`
    pub base_air_speed: f32,
    /// Air control multiplier applied to `base_air_speed`
    pub air_speed_factor: f32,
    /// Horizontal arcade drag (velocity decay per second)
    pub drag_x: f32,

    // Jumping
    /// Upward speed given by a ground or air jump
    pub jump_velocity: f32,
    /// Downward acceleration of the world the character lives in
    pub gravity: f32,

    // Sliding
    /// Minimum time between the end of one slide and the start of the next
    pub slide_cooldown_ms: f64,
    /// Longest a single slide may last
    pub slide_max_duration_ms: f64,

    // Animation
    /// Playback rate of the Run clip
    pub run_playback_rate: f32,
    /// Track the controller plays its clips on
    pub animation_track: usize,
    pub mixes: &'static [ClipMix],

    // Dimensions
    /// Display scale of the skeleton
    pub scale: f32,
    /// Unscaled hit-box size
    pub body_size: Vec2,
    /// Hit-box offset while facing right
    pub offset_right: Vec2,
    /// Hit-box offset while facing left
    pub offset_left: Vec2,
}

/// Default tuning for the player character
pub const DEFAULT_CONFIG: ControllerConfig = ControllerConfig {
    run_speed: 200.0,
    base_air_speed: 300.0,
    air_speed_factor: 0.5,
    drag_x: 600.0,

    jump_velocity: 300.0,
    gravity: 300.0,

    slide_cooldown_ms: 500.0,
    slide_max_duration_ms: 500.0,

    run_playback_rate: 1.5,
    animation_track: 0,
    mixes: &CLIP_MIXES,

    scale: 0.3,
    body_size: Vec2::new(250.0, 500.0),
    offset_right: Vec2::new(50.0, -220.0),
    offset_left: Vec2::new(320.0, -220.0),
};

impl Default for ControllerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl ControllerConfig {
    /// Get the standard player tuning
    pub fn standard() -> Self {
        DEFAULT_CONFIG
    }

    /// Horizontal speed while airborne
    pub fn air_speed(&self) -> f32 {
        self.base_air_speed * self.air_speed_factor
    }

    /// Hit-box size in world pixels
    pub fn hitbox_size(&self) -> Vec2 {
        self.body_size * self.scale
    }
}
