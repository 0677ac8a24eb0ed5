// Skeletal animation clip definitions

/// A named event keyed at a point in a clip's timeline (e.g. "footstep")
#[derive(Debug, Clone, PartialEq)]
pub struct ClipEvent {
    pub name: String,
    /// Time of the event in seconds from the start of the clip
    pub time: f32,
}

/// A single skeletal animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "Idle", "Run", "Jump")
    pub name: String,
    /// Length of one playthrough in seconds
    pub duration: f32,
    /// Keyed events, sorted by time
    pub events: Vec<ClipEvent>,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration: duration.max(0.0),
            events: Vec::new(),
        }
    }

    /// Create a clip from a frame count and playback rate
    pub fn from_frames(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count as f32 / fps)
    }

    /// Key a named event at `time` seconds, clamped to the clip
    pub fn with_event(mut self, name: &str, time: f32) -> Self {
        let time = time.clamp(0.0, self.duration);
        let index = self.events.partition_point(|e| e.time <= time);
        self.events.insert(
            index,
            ClipEvent {
                name: name.to_string(),
                time,
            },
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_from_frames() {
        let clip = AnimationClip::from_frames("Run", 6, 10.0);
        assert_eq!(clip.name, "Run");
        assert_relative_eq!(clip.duration, 0.6);
    }

    #[test]
    fn test_negative_duration_clamped() {
        let clip = AnimationClip::new("Broken", -1.0);
        assert_eq!(clip.duration, 0.0);
    }

    #[test]
    fn test_events_sorted_and_clamped() {
        let clip = AnimationClip::new("Run", 1.0)
            .with_event("step_right", 0.75)
            .with_event("step_left", 0.25)
            .with_event("late", 5.0);

        let names: Vec<_> = clip.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["step_left", "step_right", "late"]);
        assert_eq!(clip.events[2].time, 1.0);
    }
}
