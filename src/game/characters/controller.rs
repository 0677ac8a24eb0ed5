// Character movement and animation-state controller

use log::{debug, trace};

use super::config::ControllerConfig;
use super::state::{Clip, Facing};
use crate::engine::animation::{AnimationError, AnimationSink, LoggingListener};
use crate::engine::game_loop::TickTime;
use crate::engine::input::{Action, InputState};
use crate::engine::physics::PhysicsBody;

/// Turns input into velocity commands and picks the animation clip, once per tick.
///
/// The controller owns no engine objects. The body, input and animation sink are
/// lent to [`CharacterController::update`] for the duration of a tick.
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: ControllerConfig,

    facing: Facing,
    grounded: bool,
    /// 0 = may ground jump, 1 = may air jump, 2 = air jump spent
    jump_count: u8,

    /// Clip selected this tick
    active_clip: Clip,
    /// Clip last submitted to the animation sink
    committed_clip: Option<Clip>,
    looping: bool,
    playback_rate: f32,

    slide_timer_ms: f64,
    last_slide_end_ms: f64,
    slide_eligible: bool,
}

impl CharacterController {
    /// Create a controller and prepare its body and animation state
    pub fn new<B, A>(config: ControllerConfig, body: &mut B, animation: &mut A) -> Self
    where
        B: PhysicsBody + ?Sized,
        A: AnimationSink + ?Sized,
    {
        let facing = Facing::default();
        body.set_drag(config.drag_x, 0.0);
        body.set_offset(offset_for(&config, facing));
        animation.add_listener(Box::new(LoggingListener));

        Self {
            config,
            facing,
            grounded: false,
            jump_count: 0,
            active_clip: Clip::Idle,
            committed_clip: None,
            looping: true,
            playback_rate: 1.0,
            slide_timer_ms: 0.0,
            last_slide_end_ms: 0.0,
            slide_eligible: false,
        }
    }

    /// Run one simulation tick
    pub fn update<B, I, A>(
        &mut self,
        time: TickTime,
        body: &mut B,
        input: &I,
        animation: &mut A,
    ) -> Result<(), AnimationError>
    where
        B: PhysicsBody + ?Sized,
        I: InputState + ?Sized,
        A: AnimationSink + ?Sized,
    {
        self.sense_ground(body);
        self.move_body(body, input);
        self.select_clip(time, body, input);
        self.submit(animation)
    }

    fn sense_ground<B: PhysicsBody + ?Sized>(&mut self, body: &B) {
        let grounded = body.touching_ground_below();
        if grounded && !self.grounded {
            trace!("Landed, jump count reset from {}", self.jump_count);
            self.jump_count = 0;
        }
        self.grounded = grounded;
    }

    fn move_body<B, I>(&mut self, body: &mut B, input: &I)
    where
        B: PhysicsBody + ?Sized,
        I: InputState + ?Sized,
    {
        body.set_drag(self.config.drag_x, 0.0);

        let speed = if self.grounded {
            self.config.run_speed
        } else {
            self.config.air_speed()
        };

        if input.is_held(Action::Right) {
            self.face(Facing::Right, body);
            body.set_velocity_x(speed);
        } else if input.is_held(Action::Left) {
            self.face(Facing::Left, body);
            body.set_velocity_x(-speed);
        } else if self.grounded {
            body.set_velocity_x(0.0);
        }
        // Airborne without input: drag decays the current velocity

        if input.is_held(Action::Up) && self.grounded && self.jump_count == 0 {
            body.set_velocity_y(-self.config.jump_velocity);
            self.jump_count = 1;
            trace!("Ground jump");
        }

        if input.just_pressed(Action::Up) && !self.grounded && self.jump_count == 1 {
            body.set_velocity_y(-self.config.jump_velocity);
            self.jump_count = 2;
            trace!("Air jump");
        }
    }

    fn face<B: PhysicsBody + ?Sized>(&mut self, facing: Facing, body: &mut B) {
        self.facing = facing;
        body.set_offset(offset_for(&self.config, facing));
    }

    /// Later rules override earlier ones
    fn select_clip<B, I>(&mut self, time: TickTime, body: &B, input: &I)
    where
        B: PhysicsBody + ?Sized,
        I: InputState + ?Sized,
    {
        let horizontal = input.is_held(Action::Left) || input.is_held(Action::Right);

        // Locomotion
        if self.grounded && horizontal {
            self.set_clip(Clip::Run);
            self.playback_rate = self.config.run_playback_rate;
            self.slide_eligible = true;
        } else {
            self.set_clip(Clip::Idle);
            self.slide_eligible = false;
        }

        // Vertical motion
        let vy = body.velocity().y;
        if vy < 0.0 {
            self.set_clip(Clip::Jump);
        } else if vy > 0.0 {
            self.set_clip(Clip::Fall);
        }

        // Slide
        if self.grounded && self.slide_eligible {
            if input.is_held(Action::Down) && horizontal {
                if time.now_ms - self.last_slide_end_ms >= self.config.slide_cooldown_ms {
                    if self.slide_timer_ms == 0.0 {
                        debug!("Slide started at {:.0}ms", time.now_ms);
                    }
                    self.slide_timer_ms += time.delta_ms;

                    if self.slide_timer_ms <= self.config.slide_max_duration_ms {
                        self.set_clip(Clip::Slide);
                        self.playback_rate = 1.0;
                    } else {
                        self.end_slide(time.now_ms);
                        self.slide_eligible = false;
                    }
                }
            } else {
                // Plain running plays at normal speed
                self.playback_rate = 1.0;
                if self.slide_timer_ms > 0.0 {
                    self.end_slide(time.now_ms);
                }
            }
        } else {
            self.playback_rate = 1.0;
            if self.slide_timer_ms > 0.0 {
                self.end_slide(time.now_ms);
            }
        }
    }

    fn set_clip(&mut self, clip: Clip) {
        self.active_clip = clip;
        self.looping = clip.loops();
    }

    /// Cooldown runs from the moment a slide stops, whether it timed out or was cut short
    fn end_slide(&mut self, now_ms: f64) {
        debug!(
            "Slide ended at {:.0}ms after {:.0}ms",
            now_ms, self.slide_timer_ms
        );
        self.slide_timer_ms = 0.0;
        self.last_slide_end_ms = now_ms;
    }

    fn submit<A: AnimationSink + ?Sized>(&mut self, animation: &mut A) -> Result<(), AnimationError> {
        for mix in self.config.mixes {
            animation.set_mix(mix.from.name(), mix.to.name(), mix.duration);
        }
        animation.set_time_scale(self.playback_rate);

        if self.committed_clip != Some(self.active_clip) {
            debug!(
                "Clip {:?} -> {:?} (loop: {})",
                self.committed_clip, self.active_clip, self.looping
            );
            animation.set_animation(
                self.config.animation_track,
                self.active_clip.name(),
                self.looping,
            )?;
            self.committed_clip = Some(self.active_clip);
        }

        Ok(())
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    pub fn active_clip(&self) -> Clip {
        self.active_clip
    }
}

fn offset_for(config: &ControllerConfig, facing: Facing) -> glam::Vec2 {
    match facing {
        Facing::Right => config.offset_right,
        Facing::Left => config.offset_left,
    }
}
