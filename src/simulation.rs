//! Frame pipeline without the ECS.
//!
//! [`Simulation`] runs one frame in the same order as the plugin systems:
//! controller tick, collision resolution, presentation update.

use crate::actor::ActorState;
use crate::collision::{resolve_all, StaticCollider};
use crate::controller::{LocomotionController, TickEvents};
use crate::ground::GroundQuery;
use crate::input::{CameraBasis, InputFrame};
use crate::presentation::PresentationState;
use crate::tunables::Tunables;

/// Outcome of one [`Simulation::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Transitions reported by the controller.
    pub events: TickEvents,
    /// Number of colliders that corrected the footprint.
    pub corrections: usize,
}

/// A controller paired with the static colliders of a level.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    controller: LocomotionController,
    colliders: Vec<StaticCollider>,
}

impl Simulation {
    /// Creates a simulation over `colliders`.
    #[must_use]
    pub fn new(tunables: Tunables, colliders: Vec<StaticCollider>) -> Self {
        Self {
            controller: LocomotionController::new(tunables),
            colliders,
        }
    }

    /// The wrapped controller.
    #[must_use]
    pub const fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    /// Level colliders in resolution order.
    #[must_use]
    pub fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }

    /// Advances `actor` by one frame and refreshes `presentation`.
    pub fn step<G>(
        &self,
        actor: &mut ActorState,
        presentation: &mut PresentationState,
        input: &InputFrame,
        camera: &CameraBasis,
        ground: &G,
        dt: f32,
    ) -> FrameReport
    where
        G: GroundQuery + ?Sized,
    {
        let events = self.controller.tick(actor, input, camera, ground, dt);
        let radius = self.controller.tunables().capsule_radius;
        let corrections = resolve_all(
            &self.colliders,
            radius,
            &mut actor.position,
            &mut actor.velocity,
        );
        presentation.observe(actor, dt);
        FrameReport {
            events,
            corrections,
        }
    }
}
