// Skeletal animation playback
//
// A small animation-state player in the style of the Spine runtime: clips are
// played on numbered tracks, switching clips cross-fades using a mix table,
// and every entry reports its lifecycle to registered listeners.

mod animator;
mod clip;
mod event;

pub use animator::SkeletonAnimator;
pub use clip::AnimationClip;
pub use event::{AnimationEvent, AnimationEventKind, AnimationListener, LoggingListener};

/// Identifies one playback of a clip on a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackEntryId(pub u64);

/// Animation errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnimationError {
    #[error("Animation not found: {0}")]
    UnknownClip(String),
}

/// The animation operations the character controller drives
pub trait AnimationSink {
    /// Declare the cross-fade time used when switching from `from` to `to`
    fn set_mix(&mut self, from: &str, to: &str, duration: f32);

    /// Global playback rate (1.0 = normal speed)
    fn set_time_scale(&mut self, scale: f32);

    /// Make `clip` the current animation of `track`
    fn set_animation(
        &mut self,
        track: usize,
        clip: &str,
        looping: bool,
    ) -> Result<TrackEntryId, AnimationError>;

    /// Register a lifecycle listener
    fn add_listener(&mut self, listener: Box<dyn AnimationListener>);
}
