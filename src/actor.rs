//! Authoritative per-actor simulation state.
//!
//! [`ActorState`] is a plain value owned by the caller. Only
//! [`crate::LocomotionController::tick`] and the collision resolver mutate
//! it; rendering and HUD code read it.

use std::fmt;

use glam::Vec3;

use crate::tunables::Tunables;

/// Discrete locomotion state, derived every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LocomotionState {
    /// Grounded without movement input.
    #[default]
    Idle,
    /// Grounded with movement input.
    Move,
    /// Airborne and rising, or a jump fired this tick.
    Jump,
    /// Airborne and not rising.
    Fall,
    /// A dash is in progress.
    Dash,
}

impl LocomotionState {
    /// Whether the state implies contact with the ground.
    #[must_use]
    pub const fn is_grounded_state(self) -> bool {
        matches!(self, Self::Idle | Self::Move)
    }

    /// Airborne state matching the sign of `vertical_velocity`.
    #[must_use]
    pub fn airborne(vertical_velocity: f32) -> Self {
        if vertical_velocity > 0.0 {
            Self::Jump
        } else {
            Self::Fall
        }
    }
}

impl fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Dash => "dash",
        };
        f.write_str(label)
    }
}

/// Position, velocity, grounding, ability timers and discrete state of the
/// controlled actor.
///
/// `position` is the capsule centre; the capsule base sits
/// [`Tunables::capsule_half_height`] below it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorState {
    /// World-space capsule centre (metres).
    pub position: Vec3,
    /// World-space velocity (metres per second).
    pub velocity: Vec3,
    /// Recomputed from geometry every tick.
    pub grounded: bool,
    /// Current discrete state.
    pub state: LocomotionState,
    /// Seconds spent continuously grounded.
    pub on_ground_time: f32,
    /// Seconds spent continuously airborne.
    pub off_ground_time: f32,
    /// Remaining dash duration; zero when no dash is active.
    pub dash_timer: f32,
    /// Remaining time before another dash may start.
    pub dash_cooldown_timer: f32,
    /// Remaining lifetime of a buffered jump press.
    pub jump_buffer_timer: f32,
    /// Remaining lifetime of a buffered dash press.
    pub dash_buffer_timer: f32,
    /// True while inside the dash i-frame window.
    pub invulnerable: bool,
    /// Set when a jump fires; cleared on the next grounded tick. While set,
    /// coyote time no longer applies.
    pub jumped_since_grounded: bool,
}

impl Default for ActorState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl ActorState {
    /// Creates an idle actor at rest at `spawn`.
    #[must_use]
    pub const fn at(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            grounded: false,
            state: LocomotionState::Idle,
            on_ground_time: 0.0,
            off_ground_time: 0.0,
            dash_timer: 0.0,
            dash_cooldown_timer: 0.0,
            jump_buffer_timer: 0.0,
            dash_buffer_timer: 0.0,
            invulnerable: false,
            jumped_since_grounded: false,
        }
    }

    /// Creates an idle actor standing on flat ground at the configured
    /// fallback height, horizontally at `(x, z)`.
    #[must_use]
    pub fn standing(tunables: &Tunables, x: f32, z: f32) -> Self {
        let mut actor = Self::at(Vec3::new(x, tunables.rest_height(tunables.ground_height), z));
        actor.grounded = true;
        actor
    }

    /// Whether a dash is in progress.
    #[must_use]
    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }

    /// Fraction of the active dash already elapsed, in `[0, 1]`.
    ///
    /// Returns `1.0` when no dash is active.
    #[must_use]
    pub fn dash_fraction(&self, tunables: &Tunables) -> f32 {
        if !self.is_dashing() {
            return 1.0;
        }
        let remaining = crate::numeric::safe_ratio(self.dash_timer, tunables.dash_time, 0.0);
        (1.0 - remaining).clamp(0.0, 1.0)
    }

    /// Height of the capsule base.
    #[must_use]
    pub fn base_height(&self, tunables: &Tunables) -> f32 {
        self.position.y - tunables.capsule_half_height
    }

    /// Checks the state invariants, returning a description of the first
    /// violation.
    ///
    /// # Errors
    /// Returns a static description of the violated invariant.
    pub fn check_invariants(&self, tunables: &Tunables) -> Result<(), &'static str> {
        if !(0.0..=tunables.dash_time).contains(&self.dash_timer) {
            return Err("dash timer outside [0, dash_time]");
        }
        if self.dash_cooldown_timer < 0.0 {
            return Err("negative dash cooldown");
        }
        if self.jump_buffer_timer < 0.0 || self.dash_buffer_timer < 0.0 {
            return Err("negative input buffer");
        }
        if self.invulnerable && !self.is_dashing() {
            return Err("invulnerable without an active dash");
        }
        if self.grounded && !self.state.is_grounded_state() && !self.is_dashing() {
            return Err("grounded while in an airborne state");
        }
        if !(self.position.is_finite() && self.velocity.is_finite()) {
            return Err("non-finite position or velocity");
        }
        Ok(())
    }
}
