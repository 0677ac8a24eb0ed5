// Animation lifecycle events and listeners

use std::fmt;

use log::debug;

use super::TrackEntryId;

/// What happened to a track entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEventKind {
    /// The entry became the current animation of its track
    Start,
    /// Another animation was set on the track while this one was current
    Interrupt,
    /// The entry will no longer be applied
    End,
    /// The entry is being released
    Dispose,
    /// One playthrough finished (fires every loop for looping entries)
    Complete,
    /// A keyed clip event was crossed
    Event(String),
}

impl fmt::Display for AnimationEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Started"),
            Self::Interrupt => write!(f, "Interrupted"),
            Self::End => write!(f, "Ended"),
            Self::Dispose => write!(f, "Disposed"),
            Self::Complete => write!(f, "Completed"),
            Self::Event(name) => write!(f, "Custom event {name} for"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationEvent {
    pub track: usize,
    pub entry: TrackEntryId,
    pub clip: String,
    pub kind: AnimationEventKind,
}

/// Receives animation lifecycle events
pub trait AnimationListener {
    fn on_event(&mut self, event: &AnimationEvent);
}

impl<F> AnimationListener for F
where
    F: FnMut(&AnimationEvent),
{
    fn on_event(&mut self, event: &AnimationEvent) {
        self(event)
    }
}

/// Writes every event to the log at debug level
#[derive(Debug, Default)]
pub struct LoggingListener;

impl AnimationListener for LoggingListener {
    fn on_event(&mut self, event: &AnimationEvent) {
        debug!(
            "{} animation {} (track {}, entry {})",
            event.kind, event.clip, event.track, event.entry.0
        );
    }
}
