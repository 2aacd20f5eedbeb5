//! The per-frame locomotion transition function.
//!
//! [`LocomotionController::tick`] advances an [`ActorState`] by `dt` seconds
//! given the frame's input, the camera basis and a [`GroundQuery`]. A tick
//! runs, in order: input buffering, wish direction, grounding, one of the
//! dash-active / dash-start / normal-movement branches, integration, the
//! step-up assist and the floor clamp.
//!
//! `dt` is whatever elapsed time the caller measured. There is no fixed-step
//! accumulator, so results depend on frame timing.

use glam::Vec3;
use log::debug;

use crate::actor::{ActorState, LocomotionState};
use crate::constants::{
    AIR_DRAG_SCALE, DASH_EXIT_DAMPING, DASH_GRAVITY_SCALE, DASH_WISH_DEADZONE,
    STEP_PROBE_MIN_SPEED, WISH_EPSILON,
};
use crate::ground::{is_walkable, GroundQuery};
use crate::input::{CameraBasis, InputFrame};
use crate::kinematics::{accelerate_toward, apply_braking, apply_friction};
use crate::tunables::Tunables;
use crate::vector_math::{
    flatten, horizontal, horizontal_length, planar_direction, safe_normalize, with_horizontal,
};

/// Discrete transitions that happened during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// A jump fired.
    pub jumped: bool,
    /// A dash started.
    pub dash_started: bool,
    /// An active dash ran out.
    pub dash_ended: bool,
    /// The step-up assist lifted the actor onto higher ground.
    pub stepped_up: bool,
    /// The actor sank below the fallback floor and was clamped onto it.
    pub floor_clamped: bool,
}

/// Applies the locomotion rules for one actor.
///
/// # Example
///
/// ```
/// use locomotion::{ActorState, CameraBasis, FlatGround, InputFrame, LocomotionController,
///     LocomotionState, Tunables};
///
/// let controller = LocomotionController::new(Tunables::default());
/// let mut actor = ActorState::standing(controller.tunables(), 0.0, 0.0);
/// let input = InputFrame::movement(0.0, 1.0);
/// let camera = CameraBasis::default();
/// controller.tick(&mut actor, &input, &camera, &FlatGround::default(), 1.0 / 60.0);
/// assert_eq!(actor.state, LocomotionState::Move);
/// assert!(actor.velocity.z > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    tunables: Tunables,
}

impl LocomotionController {
    /// Creates a controller using `tunables` for every tick.
    #[must_use]
    pub const fn new(tunables: Tunables) -> Self {
        Self { tunables }
    }

    /// The tunables this controller applies.
    #[must_use]
    pub const fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    /// Advances `actor` by `elapsed` seconds.
    ///
    /// Negative or non-finite `elapsed` is treated as zero.
    pub fn tick<G>(
        &self,
        actor: &mut ActorState,
        input: &InputFrame,
        camera: &CameraBasis,
        ground: &G,
        elapsed: f32,
    ) -> TickEvents
    where
        G: GroundQuery + ?Sized,
    {
        let dt = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            0.0
        };
        let mut events = TickEvents::default();

        self.update_buffers(actor, input, dt);
        let wish = camera.wish_direction(input);
        let wish_strength = wish.length();
        self.update_grounding(actor, ground, dt);

        if actor.is_dashing() {
            self.continue_dash(actor, dt, &mut events);
        } else if actor.dash_buffer_timer > 0.0 && actor.dash_cooldown_timer <= 0.0 {
            self.start_dash(actor, wish, camera, &mut events);
        } else {
            self.move_normally(actor, wish, dt, &mut events);
        }

        actor.position += actor.velocity * dt;

        self.step_up(actor, ground, wish_strength, &mut events);
        self.clamp_to_floor(actor, wish_strength, &mut events);
        events
    }

    // ------------------------------------------------------------------
    // Buffers and grounding
    // ------------------------------------------------------------------

    fn update_buffers(&self, actor: &mut ActorState, input: &InputFrame, dt: f32) {
        actor.dash_cooldown_timer = (actor.dash_cooldown_timer - dt).max(0.0);
        actor.jump_buffer_timer = (actor.jump_buffer_timer - dt).max(0.0);
        actor.dash_buffer_timer = (actor.dash_buffer_timer - dt).max(0.0);

        // Arm after decaying so a press is always pending on its own frame.
        if input.jump {
            actor.jump_buffer_timer = self.tunables.buffer_window;
        }
        if input.dash {
            actor.dash_buffer_timer = self.tunables.buffer_window;
        }
    }

    fn update_grounding<G>(&self, actor: &mut ActorState, ground: &G, dt: f32)
    where
        G: GroundQuery + ?Sized,
    {
        let t = &self.tunables;
        let (x, z) = (actor.position.x, actor.position.z);
        let height = ground.height_at(x, z);
        let normal = safe_normalize(ground.normal_at(x, z)).unwrap_or(Vec3::Y);

        let within_snap = actor.base_height(t) <= height + t.ground_snap;
        let walkable = is_walkable(normal, t.walkable_normal_y());
        actor.grounded = within_snap && actor.velocity.y <= 0.0 && walkable;

        if actor.grounded {
            actor.jumped_since_grounded = false;
            actor.position.y = t.rest_height(height);
            actor.velocity = onto_ground_plane(actor.velocity, normal);
            actor.on_ground_time += dt;
            actor.off_ground_time = 0.0;
        } else {
            actor.off_ground_time += dt;
            actor.on_ground_time = 0.0;
        }
    }

    // ------------------------------------------------------------------
    // Dash
    // ------------------------------------------------------------------

    fn continue_dash(&self, actor: &mut ActorState, dt: f32, events: &mut TickEvents) {
        let t = &self.tunables;
        actor.dash_timer = (actor.dash_timer - dt).max(0.0);
        actor.velocity.y -= t.gravity * DASH_GRAVITY_SCALE * dt;

        if actor.is_dashing() {
            actor.invulnerable = t.in_iframe_window(actor.dash_fraction(t));
            actor.state = LocomotionState::Dash;
            return;
        }

        actor.invulnerable = false;
        actor.velocity.x *= DASH_EXIT_DAMPING;
        actor.velocity.z *= DASH_EXIT_DAMPING;
        actor.state = if actor.grounded {
            LocomotionState::Idle
        } else {
            LocomotionState::Fall
        };
        events.dash_ended = true;
        debug!("dash ended at {:?}, now {}", actor.position, actor.state);
    }

    fn start_dash(
        &self,
        actor: &mut ActorState,
        wish: Vec3,
        camera: &CameraBasis,
        events: &mut TickEvents,
    ) {
        let t = &self.tunables;
        let steer = if wish.length() > DASH_WISH_DEADZONE {
            wish
        } else {
            camera.planar_forward()
        };
        let direction = safe_normalize(flatten(steer)).unwrap_or(Vec3::Z);

        actor.velocity.x = direction.x * t.dash_speed;
        actor.velocity.z = direction.z * t.dash_speed;
        actor.dash_timer = t.dash_time;
        actor.dash_cooldown_timer = t.dash_cooldown + t.dash_time;
        actor.invulnerable = t.in_iframe_window(0.0);
        actor.state = LocomotionState::Dash;
        actor.dash_buffer_timer = 0.0;

        events.dash_started = true;
        debug!("dash started toward {direction:?}");
    }

    // ------------------------------------------------------------------
    // Ground and air movement
    // ------------------------------------------------------------------

    fn move_normally(&self, actor: &mut ActorState, wish: Vec3, dt: f32, events: &mut TickEvents) {
        let t = &self.tunables;
        actor.invulnerable = false;
        actor.velocity.y -= t.gravity * dt;

        let coyote = !actor.jumped_since_grounded && actor.off_ground_time <= t.coyote_time;
        if actor.jump_buffer_timer > 0.0 && (actor.grounded || coyote) {
            actor.velocity.y = t.jump_speed;
            actor.grounded = false;
            actor.jumped_since_grounded = true;
            actor.jump_buffer_timer = 0.0;
            actor.state = LocomotionState::Jump;
            events.jumped = true;
            debug!("jump fired at {:?}", actor.position);
        }

        let (max_speed, accel) = if actor.grounded {
            (t.max_speed_ground, t.accel_ground)
        } else {
            (t.max_speed_air, t.accel_air)
        };

        let wish_strength = wish.length();
        if wish_strength > WISH_EPSILON {
            let direction = wish / wish_strength;
            let accelerated = accelerate_toward(
                actor.velocity,
                direction,
                max_speed * wish_strength,
                accel,
                dt,
            );
            let capped = horizontal(accelerated).clamp_length_max(max_speed);
            actor.velocity = with_horizontal(accelerated, capped);
            actor.state = self.moving_state(actor, events.jumped, LocomotionState::Move);
        } else if actor.grounded {
            actor.velocity = apply_braking(actor.velocity, t.brake_decel, dt, t.stop_speed_epsilon);
            actor.state = LocomotionState::Idle;
        } else {
            actor.velocity = apply_friction(actor.velocity, t.friction * AIR_DRAG_SCALE, dt);
            actor.state = self.moving_state(actor, events.jumped, LocomotionState::Idle);
        }
    }

    fn moving_state(
        &self,
        actor: &ActorState,
        jumped: bool,
        grounded_state: LocomotionState,
    ) -> LocomotionState {
        if actor.grounded {
            grounded_state
        } else if jumped {
            LocomotionState::Jump
        } else {
            LocomotionState::airborne(actor.velocity.y)
        }
    }

    // ------------------------------------------------------------------
    // Post-integration corrections
    // ------------------------------------------------------------------

    fn step_up<G>(
        &self,
        actor: &mut ActorState,
        ground: &G,
        wish_strength: f32,
        events: &mut TickEvents,
    ) where
        G: GroundQuery + ?Sized,
    {
        let t = &self.tunables;
        if horizontal_length(actor.velocity) <= STEP_PROBE_MIN_SPEED || actor.velocity.y > 0.0 {
            return;
        }

        let base = actor.base_height(t);
        let ahead = actor.position + planar_direction(actor.velocity) * t.capsule_radius;
        let probes = [
            (actor.position.x, actor.position.z),
            (ahead.x, ahead.z),
        ];
        let Some(height) = probes.into_iter().find_map(|(x, z)| {
            let height = ground.height_at(x, z);
            let rise = height - base;
            let normal = safe_normalize(ground.normal_at(x, z)).unwrap_or(Vec3::Y);
            let climbable = rise > t.ground_snap && rise <= t.step_offset;
            (climbable && is_walkable(normal, t.walkable_normal_y())).then_some(height)
        }) else {
            return;
        };

        actor.position.y = t.rest_height(height);
        actor.velocity.y = actor.velocity.y.max(0.0);
        land(actor, wish_strength);
        events.stepped_up = true;
    }

    fn clamp_to_floor(&self, actor: &mut ActorState, wish_strength: f32, events: &mut TickEvents) {
        let floor = self.tunables.rest_height(self.tunables.ground_height);
        if actor.position.y < floor {
            actor.position.y = floor;
            actor.velocity.y = actor.velocity.y.max(0.0);
            land(actor, wish_strength);
            events.floor_clamped = true;
        }
    }
}

/// Marks the actor grounded after a post-integration correction. The state
/// follows the same rule as grounded movement; an active dash keeps `Dash`.
fn land(actor: &mut ActorState, wish_strength: f32) {
    actor.grounded = true;
    actor.jumped_since_grounded = false;
    if actor.is_dashing() {
        return;
    }
    actor.state = if wish_strength > WISH_EPSILON {
        LocomotionState::Move
    } else {
        LocomotionState::Idle
    };
}

/// Removes the vertical component of `velocity` and any horizontal part that
/// points into the surface with `normal`.
fn onto_ground_plane(velocity: Vec3, normal: Vec3) -> Vec3 {
    let mut settled = velocity;
    settled.y = settled.y.max(0.0);
    let into = settled.dot(normal);
    if into < 0.0 {
        settled -= normal * into;
    }
    settled.y = 0.0;
    settled
}
