// Character facing and animation clip states

/// Which way the character is looking; drives sprite mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The skeletal animation clips a character can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Clip {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground
    Run,
    /// Moving upward
    Jump,
    /// Moving downward
    Fall,
    /// Short burst slide while running
    Slide,
}

impl Clip {
    pub const ALL: [Clip; 5] = [Clip::Idle, Clip::Run, Clip::Jump, Clip::Fall, Clip::Slide];

    /// Name of the animation in the skeleton data
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Run => "Run",
            Self::Jump => "Jump",
            Self::Fall => "Fall",
            Self::Slide => "Slide",
        }
    }

    /// Check if the clip is a locomotion loop
    pub fn loops(&self) -> bool {
        matches!(self, Self::Idle | Self::Run)
    }
}

/// Cross-fade time used when the animation switches from one clip to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipMix {
    pub from: Clip,
    pub to: Clip,
    /// Seconds
    pub duration: f32,
}

impl ClipMix {
    pub const fn new(from: Clip, to: Clip, duration: f32) -> Self {
        Self { from, to, duration }
    }
}
