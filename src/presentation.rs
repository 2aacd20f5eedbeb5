//! Cosmetic values derived from the simulation after each tick.
//!
//! `PresentationState` is read by rendering and HUD code only. It is a
//! passive observer of [`ActorState`]: nothing here feeds back into the
//! controller, so the simulation can be tested without it.

use std::f32::consts::TAU;

use crate::actor::ActorState;
use crate::constants::{
    BOB_AIR_SCALE, BOB_RATE_GROUND, VISUAL_TURN_RATE, VISUAL_YAW_MIN_SPEED,
};
use crate::numeric::{safe_ratio, wrap_angle};
use crate::vector_math::horizontal_length;

/// Facing, bob and speed diagnostics for one actor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresentationState {
    /// Smoothed facing angle about +Y, radians in `(-PI, PI]`. Zero faces +Z.
    pub visual_yaw: f32,
    /// Walk-cycle bob phase, radians in `[0, 2 PI)`.
    pub bob_phase: f32,
    /// Horizontal speed after the most recent tick.
    pub last_speed: f32,
    /// Magnitude of the change in horizontal speed per second.
    pub accel_magnitude: f32,
}

impl PresentationState {
    /// Updates the derived values from `actor` after a tick of `dt` seconds.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use locomotion::{ActorState, PresentationState};
    ///
    /// let mut actor = ActorState::default();
    /// actor.grounded = true;
    /// actor.velocity = Vec3::new(3.0, 0.0, 0.0);
    /// let mut presentation = PresentationState::default();
    /// presentation.observe(&actor, 0.5);
    /// assert!((presentation.last_speed - 3.0).abs() < 1e-6);
    /// assert!((presentation.accel_magnitude - 6.0).abs() < 1e-5);
    /// ```
    pub fn observe(&mut self, actor: &ActorState, dt: f32) {
        let speed = horizontal_length(actor.velocity);
        self.accel_magnitude = safe_ratio((speed - self.last_speed).abs(), dt, 0.0);
        self.last_speed = speed;

        if speed > VISUAL_YAW_MIN_SPEED {
            let target = actor.velocity.x.atan2(actor.velocity.z);
            let delta = wrap_angle(target - self.visual_yaw);
            let max_step = (VISUAL_TURN_RATE * dt).min(TAU);
            self.visual_yaw = wrap_angle(self.visual_yaw + delta.clamp(-max_step, max_step));
        }

        let rate = if actor.grounded {
            BOB_RATE_GROUND
        } else {
            BOB_RATE_GROUND * BOB_AIR_SCALE
        };
        self.bob_phase = (self.bob_phase + speed * rate * dt).rem_euclid(TAU);
    }
}
