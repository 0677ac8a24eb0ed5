// Track-based skeletal animation player

use std::collections::HashMap;
use std::fmt;

use super::{
    AnimationClip, AnimationError, AnimationEvent, AnimationEventKind, AnimationListener,
    AnimationSink, TrackEntryId,
};

/// One playback of a clip on a track
#[derive(Debug, Clone)]
pub struct TrackEntry {
    id: TrackEntryId,
    track: usize,
    clip: AnimationClip,
    looping: bool,
    /// Seconds played, already scaled by the animator's time scale
    track_time: f32,
    mix_time: f32,
    mix_duration: f32,
    /// The entry being faded out while this one fades in
    mixing_from: Option<Box<TrackEntry>>,
}

impl TrackEntry {
    pub fn clip_name(&self) -> &str {
        &self.clip.name
    }

    pub fn track_time(&self) -> f32 {
        self.track_time
    }

    /// Blend weight of this entry against the one it is mixing from (0..=1)
    pub fn mix_alpha(&self) -> f32 {
        if self.mix_duration <= 0.0 {
            1.0
        } else {
            (self.mix_time / self.mix_duration).min(1.0)
        }
    }

    fn event(&self, kind: AnimationEventKind) -> AnimationEvent {
        AnimationEvent {
            track: self.track,
            entry: self.id,
            clip: self.clip.name.clone(),
            kind,
        }
    }

    /// Advance playback, queueing keyed events and completions that were crossed
    fn advance(&mut self, delta: f32, events: &mut Vec<AnimationEvent>) {
        let previous = self.track_time;
        self.track_time += delta;
        let duration = self.clip.duration;

        if duration <= 0.0 {
            if previous <= 0.0 && self.track_time > 0.0 {
                events.push(self.event(AnimationEventKind::Complete));
            }
        } else {
            let (first_cycle, last_cycle) = if self.looping {
                (
                    (previous / duration).floor() as u64,
                    (self.track_time / duration).floor() as u64,
                )
            } else {
                (0, 0)
            };

            for cycle in first_cycle..=last_cycle {
                let base = cycle as f32 * duration;
                for keyed in &self.clip.events {
                    let at = base + keyed.time;
                    if at > previous && at <= self.track_time {
                        events.push(self.event(AnimationEventKind::Event(keyed.name.clone())));
                    }
                }

                let end = base + duration;
                if end > previous && end <= self.track_time {
                    events.push(self.event(AnimationEventKind::Complete));
                }
            }
        }

        if self.mixing_from.is_some() {
            self.mix_time += delta;
            if let Some(from) = self.mixing_from.as_mut() {
                from.track_time += delta;
            }
            if self.mix_time >= self.mix_duration {
                if let Some(from) = self.mixing_from.take() {
                    from.finish(events);
                }
            }
        }
    }

    /// End and dispose this entry and anything it was still mixing from
    fn finish(mut self: Box<Self>, events: &mut Vec<AnimationEvent>) {
        if let Some(from) = self.mixing_from.take() {
            from.finish(events);
        }
        events.push(self.event(AnimationEventKind::End));
        events.push(self.event(AnimationEventKind::Dispose));
    }
}

/// Plays skeletal animation clips on numbered tracks with cross-fade mixing
pub struct SkeletonAnimator {
    clips: HashMap<String, AnimationClip>,
    /// Cross-fade durations keyed by (from, to)
    mixes: HashMap<(String, String), f32>,
    time_scale: f32,
    tracks: Vec<Option<Box<TrackEntry>>>,
    listeners: Vec<Box<dyn AnimationListener>>,
    next_entry_id: u64,
}

impl Default for SkeletonAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SkeletonAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkeletonAnimator")
            .field("clips", &self.clips.len())
            .field("mixes", &self.mixes)
            .field("time_scale", &self.time_scale)
            .field("tracks", &self.tracks)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SkeletonAnimator {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            mixes: HashMap::new(),
            time_scale: 1.0,
            tracks: Vec::new(),
            listeners: Vec::new(),
            next_entry_id: 0,
        }
    }

    /// Create an animator that knows the given clips
    pub fn with_clips(clips: impl IntoIterator<Item = AnimationClip>) -> Self {
        let mut animator = Self::new();
        for clip in clips {
            animator.add_clip(clip);
        }
        animator
    }

    /// Register an animation clip, replacing any clip with the same name
    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.clips.insert(clip.name.clone(), clip);
    }

    /// Cross-fade time from `from` to `to`; pairs without an entry cut instantly
    pub fn mix(&self, from: &str, to: &str) -> f32 {
        self.mixes
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Current entry of a track
    pub fn current(&self, track: usize) -> Option<&TrackEntry> {
        self.tracks.get(track).and_then(|entry| entry.as_deref())
    }

    /// Advance all tracks by `dt` seconds (scaled by the time scale)
    pub fn update(&mut self, dt: f32) {
        let delta = dt * self.time_scale;
        let mut events = Vec::new();

        for entry in self.tracks.iter_mut().flatten() {
            entry.advance(delta, &mut events);
        }

        self.dispatch(&events);
    }

    fn dispatch(&mut self, events: &[AnimationEvent]) {
        for event in events {
            for listener in &mut self.listeners {
                listener.on_event(event);
            }
        }
    }
}

impl AnimationSink for SkeletonAnimator {
    fn set_mix(&mut self, from: &str, to: &str, duration: f32) {
        self.mixes
            .insert((from.to_string(), to.to_string()), duration.max(0.0));
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    fn set_animation(
        &mut self,
        track: usize,
        clip: &str,
        looping: bool,
    ) -> Result<TrackEntryId, AnimationError> {
        let clip = self
            .clips
            .get(clip)
            .cloned()
            .ok_or_else(|| AnimationError::UnknownClip(clip.to_string()))?;

        if self.tracks.len() <= track {
            self.tracks.resize_with(track + 1, || None);
        }

        let id = TrackEntryId(self.next_entry_id);
        self.next_entry_id += 1;

        let mut events = Vec::new();
        let previous = self.tracks[track].take();
        let mix_duration = previous
            .as_ref()
            .map(|prev| self.mix(prev.clip_name(), &clip.name))
            .unwrap_or(0.0);

        let mut entry = Box::new(TrackEntry {
            id,
            track,
            clip,
            looping,
            track_time: 0.0,
            mix_time: 0.0,
            mix_duration,
            mixing_from: None,
        });

        let mut finished = None;
        if let Some(mut prev) = previous {
            events.push(prev.event(AnimationEventKind::Interrupt));
            // Only one level of cross-fade is kept
            if let Some(older) = prev.mixing_from.take() {
                older.finish(&mut events);
            }
            if mix_duration > 0.0 {
                entry.mixing_from = Some(prev);
            } else {
                finished = Some(prev);
            }
        }

        events.push(entry.event(AnimationEventKind::Start));
        if let Some(prev) = finished {
            prev.finish(&mut events);
        }

        self.tracks[track] = Some(entry);
        self.dispatch(&events);
        Ok(id)
    }

    fn add_listener(&mut self, listener: Box<dyn AnimationListener>) {
        self.listeners.push(listener);
    }
}
