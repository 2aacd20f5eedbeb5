//! Locomotion constants shared by the controller, presentation and loaders.
//!
//! The `DEFAULT_*` values seed [`crate::Tunables::default`]. The remaining
//! constants are fixed thresholds of the controller and are not exposed for
//! tuning.

/// Grounded horizontal speed cap (m/s).
pub const DEFAULT_MAX_SPEED_GROUND: f32 = 7.5;
/// Airborne horizontal speed cap (m/s).
pub const DEFAULT_MAX_SPEED_AIR: f32 = 7.5;
/// Grounded acceleration toward the wish velocity (m/s²).
pub const DEFAULT_ACCEL_GROUND: f32 = 38.0;
/// Airborne acceleration toward the wish velocity (m/s²).
pub const DEFAULT_ACCEL_AIR: f32 = 12.0;
/// Exponential ground friction rate (1/s).
pub const DEFAULT_FRICTION: f32 = 10.0;
/// Vertical launch speed of a jump (m/s).
pub const DEFAULT_JUMP_SPEED: f32 = 6.5;
/// Downward acceleration (m/s²).
pub const DEFAULT_GRAVITY: f32 = 22.0;
/// Grace period after leaving the ground during which a jump still fires (s).
pub const DEFAULT_COYOTE_TIME: f32 = 0.10;
/// How long a jump or dash press stays pending (s).
pub const DEFAULT_BUFFER_WINDOW: f32 = 0.15;
/// Horizontal dash speed (m/s).
pub const DEFAULT_DASH_SPEED: f32 = 24.0;
/// Dash duration (s).
pub const DEFAULT_DASH_TIME: f32 = 0.14;
/// Delay after a dash ends before the next may start (s).
pub const DEFAULT_DASH_COOLDOWN: f32 = 0.35;
/// Start of the invulnerability window as a fraction of the dash.
pub const DEFAULT_DASH_IFRAME_BEGIN: f32 = 0.0;
/// End of the invulnerability window as a fraction of the dash.
pub const DEFAULT_DASH_IFRAME_END: f32 = 0.80;
/// Deceleration applied when grounded with no input (m/s²).
pub const DEFAULT_BRAKE_DECEL: f32 = 20.0;
/// Grounded speeds below this snap to rest (m/s).
pub const DEFAULT_STOP_SPEED_EPSILON: f32 = 0.06;
/// Collision footprint radius (m).
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.35;
/// Distance from the capsule centre to its base (m).
pub const DEFAULT_CAPSULE_HALF_HEIGHT: f32 = 0.90;
/// Height of the flat floor (m).
pub const DEFAULT_GROUND_HEIGHT: f32 = 0.0;
/// Tallest ledge the actor climbs without jumping (m).
pub const DEFAULT_STEP_OFFSET: f32 = 0.40;
/// Steepest walkable slope (degrees).
pub const DEFAULT_MAX_SLOPE_DEGREES: f32 = 40.0;
/// Distance within which the actor snaps to the ground (m).
pub const DEFAULT_GROUND_SNAP: f32 = 0.02;

/// Lengths below this are treated as zero when normalising directions.
pub const DIRECTION_EPSILON: f32 = 1e-6;
/// Wish magnitudes at or below this count as "no input".
pub const WISH_EPSILON: f32 = 0.01;
/// A wish direction must exceed this magnitude to steer a dash.
pub const DASH_WISH_DEADZONE: f32 = 0.1;
/// Fraction of gravity applied while a dash is active.
pub const DASH_GRAVITY_SCALE: f32 = 0.25;
/// Horizontal velocity multiplier applied on the tick a dash expires.
pub const DASH_EXIT_DAMPING: f32 = 0.35;
/// Fraction of [`crate::Tunables::friction`] used as drag while airborne
/// without input.
pub const AIR_DRAG_SCALE: f32 = 0.1;
/// Friction decay snaps horizontal speed to zero below this value.
pub const FRICTION_STOP_EPSILON: f32 = 1e-3;
/// Minimum horizontal speed before the step-up probe runs.
pub const STEP_PROBE_MIN_SPEED: f32 = 0.1;

/// Facing turn rate for the presentation yaw (radians per second).
pub const VISUAL_TURN_RATE: f32 = 12.0;
/// Horizontal speed required before the presentation yaw follows velocity.
pub const VISUAL_YAW_MIN_SPEED: f32 = 0.2;
/// Bob phase advance per metre travelled on the ground (radians).
pub const BOB_RATE_GROUND: f32 = 1.6;
/// Fraction of the ground bob rate used while airborne.
pub const BOB_AIR_SCALE: f32 = 0.3;
