//! Session-wide locomotion configuration.
//!
//! [`Tunables`] is a flat record read by the controller and resolver but
//! never mutated by them. Defaults come from [`crate::constants`]; a TOML
//! file may override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_ACCEL_AIR, DEFAULT_ACCEL_GROUND, DEFAULT_BRAKE_DECEL, DEFAULT_BUFFER_WINDOW,
    DEFAULT_CAPSULE_HALF_HEIGHT, DEFAULT_CAPSULE_RADIUS, DEFAULT_COYOTE_TIME,
    DEFAULT_DASH_COOLDOWN, DEFAULT_DASH_IFRAME_BEGIN, DEFAULT_DASH_IFRAME_END,
    DEFAULT_DASH_SPEED, DEFAULT_DASH_TIME, DEFAULT_FRICTION, DEFAULT_GRAVITY,
    DEFAULT_GROUND_HEIGHT, DEFAULT_GROUND_SNAP, DEFAULT_JUMP_SPEED, DEFAULT_MAX_SLOPE_DEGREES,
    DEFAULT_MAX_SPEED_AIR, DEFAULT_MAX_SPEED_GROUND, DEFAULT_STEP_OFFSET,
    DEFAULT_STOP_SPEED_EPSILON,
};
use crate::numeric::slope_limit_cosine;

/// Errors raised while loading a tunables file.
#[derive(Debug, Error)]
pub enum TunablesError {
    /// The file could not be read.
    #[error("failed to read tunables from {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid TOML for [`Tunables`].
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field held a value outside its permitted range.
    #[error("invalid tunable `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
}

/// Movement, jump, dash and capsule parameters.
///
/// All values use metres and seconds. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Horizontal speed cap while grounded.
    pub max_speed_ground: f32,
    /// Horizontal speed cap while airborne.
    pub max_speed_air: f32,
    /// Acceleration toward the wish velocity while grounded.
    pub accel_ground: f32,
    /// Acceleration toward the wish velocity while airborne.
    pub accel_air: f32,
    /// Base friction rate; airborne drag uses a fraction of it.
    pub friction: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Vertical velocity applied when a jump fires.
    pub jump_speed: f32,
    /// Grace period after leaving the ground during which a jump still fires.
    pub coyote_time: f32,
    /// How long a jump or dash press stays pending.
    pub buffer_window: f32,
    /// Horizontal speed set when a dash starts.
    pub dash_speed: f32,
    /// Dash duration.
    pub dash_time: f32,
    /// Cooldown after a dash ends before another may start.
    pub dash_cooldown: f32,
    /// Start of the invulnerability window as a fraction of `dash_time`.
    pub dash_iframe_begin: f32,
    /// End of the invulnerability window as a fraction of `dash_time`.
    pub dash_iframe_end: f32,
    /// Deceleration applied when grounded without input.
    pub brake_decel: f32,
    /// Speed below which braking stops the actor outright.
    pub stop_speed_epsilon: f32,
    /// Radius of the capsule footprint used by the collision resolver.
    pub capsule_radius: f32,
    /// Distance from the capsule centre to its base.
    pub capsule_half_height: f32,
    /// Tolerance within which the capsule base snaps onto the ground.
    pub ground_snap: f32,
    /// Largest rise the actor climbs without jumping.
    pub step_offset: f32,
    /// Steepest walkable slope.
    pub max_slope_degrees: f32,
    /// Height of the flat fallback ground and the hard floor clamp.
    pub ground_height: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            max_speed_ground: DEFAULT_MAX_SPEED_GROUND,
            max_speed_air: DEFAULT_MAX_SPEED_AIR,
            accel_ground: DEFAULT_ACCEL_GROUND,
            accel_air: DEFAULT_ACCEL_AIR,
            friction: DEFAULT_FRICTION,
            gravity: DEFAULT_GRAVITY,
            jump_speed: DEFAULT_JUMP_SPEED,
            coyote_time: DEFAULT_COYOTE_TIME,
            buffer_window: DEFAULT_BUFFER_WINDOW,
            dash_speed: DEFAULT_DASH_SPEED,
            dash_time: DEFAULT_DASH_TIME,
            dash_cooldown: DEFAULT_DASH_COOLDOWN,
            dash_iframe_begin: DEFAULT_DASH_IFRAME_BEGIN,
            dash_iframe_end: DEFAULT_DASH_IFRAME_END,
            brake_decel: DEFAULT_BRAKE_DECEL,
            stop_speed_epsilon: DEFAULT_STOP_SPEED_EPSILON,
            capsule_radius: DEFAULT_CAPSULE_RADIUS,
            capsule_half_height: DEFAULT_CAPSULE_HALF_HEIGHT,
            ground_snap: DEFAULT_GROUND_SNAP,
            step_offset: DEFAULT_STEP_OFFSET,
            max_slope_degrees: DEFAULT_MAX_SLOPE_DEGREES,
            ground_height: DEFAULT_GROUND_HEIGHT,
        }
    }
}

impl Tunables {
    /// Parses tunables from TOML text and validates them.
    ///
    /// Fields absent from the document keep their default values.
    ///
    /// # Errors
    /// Returns [`TunablesError::Parse`] for malformed TOML and
    /// [`TunablesError::Invalid`] when a value is out of range.
    ///
    /// # Examples
    /// ```
    /// use locomotion::Tunables;
    /// let tunables = Tunables::from_toml_str("jump_speed = 8.0").unwrap();
    /// assert_eq!(tunables.jump_speed, 8.0);
    /// assert_eq!(tunables.gravity, Tunables::default().gravity);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, TunablesError> {
        let tunables: Self = toml::from_str(text)?;
        tunables.validate()?;
        Ok(tunables)
    }

    /// Reads and validates a TOML tunables file.
    ///
    /// # Errors
    /// Returns [`TunablesError::Read`] if the file cannot be read, otherwise
    /// the errors of [`Tunables::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TunablesError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| TunablesError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every field against its permitted range.
    ///
    /// # Errors
    /// Returns the first [`TunablesError::Invalid`] encountered.
    pub fn validate(&self) -> Result<(), TunablesError> {
        let non_negative = [
            ("max_speed_ground", self.max_speed_ground),
            ("max_speed_air", self.max_speed_air),
            ("accel_ground", self.accel_ground),
            ("accel_air", self.accel_air),
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("jump_speed", self.jump_speed),
            ("coyote_time", self.coyote_time),
            ("buffer_window", self.buffer_window),
            ("dash_speed", self.dash_speed),
            ("dash_cooldown", self.dash_cooldown),
            ("brake_decel", self.brake_decel),
            ("stop_speed_epsilon", self.stop_speed_epsilon),
            ("ground_snap", self.ground_snap),
            ("step_offset", self.step_offset),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TunablesError::Invalid {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }

        let positive = [
            ("dash_time", self.dash_time),
            ("capsule_radius", self.capsule_radius),
            ("capsule_half_height", self.capsule_half_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TunablesError::Invalid {
                    field,
                    reason: "must be finite and positive",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.dash_iframe_begin) {
            return Err(TunablesError::Invalid {
                field: "dash_iframe_begin",
                reason: "must lie within 0..=1",
            });
        }
        if !(self.dash_iframe_begin..=1.0).contains(&self.dash_iframe_end) {
            return Err(TunablesError::Invalid {
                field: "dash_iframe_end",
                reason: "must lie within dash_iframe_begin..=1",
            });
        }
        if !(0.0..=90.0).contains(&self.max_slope_degrees) {
            return Err(TunablesError::Invalid {
                field: "max_slope_degrees",
                reason: "must lie within 0..=90",
            });
        }
        if !self.ground_height.is_finite() {
            return Err(TunablesError::Invalid {
                field: "ground_height",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Minimum vertical normal component of a walkable surface.
    #[must_use]
    pub fn walkable_normal_y(&self) -> f32 {
        slope_limit_cosine(self.max_slope_degrees)
    }

    /// Whether `fraction` of the dash (0 at start, 1 at end) lies inside the
    /// invulnerability window.
    #[must_use]
    pub fn in_iframe_window(&self, fraction: f32) -> bool {
        (self.dash_iframe_begin..=self.dash_iframe_end).contains(&fraction)
    }

    /// Vertical position of the capsule centre when resting on `surface`.
    #[must_use]
    pub fn rest_height(&self, surface: f32) -> f32 {
        surface + self.capsule_half_height
    }
}
