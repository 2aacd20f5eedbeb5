//! Bevy plugin driving the locomotion controller from the ECS.
//!
//! [`LocomotionPlugin`] inserts the controller, level colliders, ground and
//! per-frame input as resources and registers a chained set of `Update`
//! systems: poll input, tick every [`ControlledActor`], resolve collisions,
//! refresh presentation and finally copy the result into `Transform`.

use std::path::PathBuf;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, warn};
use thiserror::Error;

use crate::actor::ActorState;
use crate::collision::{resolve_all, StaticCollider};
use crate::controller::{LocomotionController, TickEvents};
use crate::ground::{FlatGround, GroundQuery};
use crate::input::{CameraBasis, InputContext, InputFrame, InputSource};
use crate::level::{fallback_layout, load_level};
use crate::presentation::PresentationState;
use crate::tunables::Tunables;

/// Why a level could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFailure {
    /// The file could not be read.
    Unreadable,
    /// The file parsed but produced no colliders.
    Empty,
}

/// Event raised when the configured level is unusable and the fallback
/// layout is installed instead.
#[derive(Event, Debug, Clone, Error)]
#[error("{kind:?}: {detail}")]
pub struct LevelLoadFailed {
    /// Failure category.
    pub kind: LevelFailure,
    /// Description of the underlying problem.
    pub detail: String,
}

impl LevelLoadFailed {
    /// Convenience constructor.
    #[must_use]
    pub fn new(kind: LevelFailure, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_level_failure(event: On<LevelLoadFailed>) {
    let LevelLoadFailed { kind, detail } = event.event();
    match kind {
        LevelFailure::Unreadable => error!("level unreadable, using fallback layout: {detail}"),
        LevelFailure::Empty => warn!("level empty, using fallback layout: {detail}"),
    }
}

/// The controller shared by every actor.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveController(pub LocomotionController);

/// Static colliders of the loaded level.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LevelColliders(pub Vec<StaticCollider>);

/// Input consumed by the next tick. Triggers are cleared once consumed.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameInput(pub InputFrame);

/// Camera basis used to map input axes onto the ground plane.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CameraRig(pub CameraBasis);

/// Terrain queried for floor height and normal.
#[derive(Resource)]
pub struct GroundSource(pub Box<dyn GroundQuery + Send + Sync>);

impl GroundSource {
    /// Flat ground at `height`.
    #[must_use]
    pub fn flat(height: f32) -> Self {
        Self(Box::new(FlatGround::new(height)))
    }
}

/// Optional input supplier polled at the start of each frame.
///
/// Without this resource, [`FrameInput`] is expected to be written by other
/// systems.
#[derive(Resource)]
pub struct InputDriver {
    /// The source to poll.
    pub source: Box<dyn InputSource + Send + Sync>,
    /// Context passed to every poll.
    pub context: InputContext,
}

impl InputDriver {
    /// Wraps `source` with an active context.
    #[must_use]
    pub fn new(source: impl InputSource + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
            context: InputContext::default(),
        }
    }
}

/// An actor driven by the controller.
#[derive(Component, Debug, Clone, Default)]
pub struct ControlledActor {
    /// Authoritative simulation state.
    pub state: ActorState,
    /// Cosmetic values derived after each frame.
    pub presentation: PresentationState,
    /// What happened during the most recent tick.
    pub last_events: TickEvents,
}

impl ControlledActor {
    /// Wraps an initial simulation state.
    #[must_use]
    pub fn new(state: ActorState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }
}

/// Bevy plugin installing the locomotion resources and systems.
///
/// With no `level_path` the level is an open field without colliders. When a
/// path is given but cannot be used, [`LevelLoadFailed`] is triggered and
/// [`fallback_layout`] is installed.
#[derive(Debug, Clone, Default)]
pub struct LocomotionPlugin {
    /// Controller parameters.
    pub tunables: Tunables,
    /// Level file to load during `build`.
    pub level_path: Option<PathBuf>,
}

impl LocomotionPlugin {
    fn level_colliders(&self, world: &mut World) -> Vec<StaticCollider> {
        let Some(path) = &self.level_path else {
            return Vec::new();
        };
        match load_level(path) {
            Ok(load) if !load.is_failure() => load.colliders,
            Ok(load) => {
                world.trigger(LevelLoadFailed::new(
                    LevelFailure::Empty,
                    format!(
                        "{} contained no colliders ({} malformed lines)",
                        path.display(),
                        load.skipped.len()
                    ),
                ));
                fallback_layout()
            }
            Err(e) => {
                world.trigger(LevelLoadFailed::new(LevelFailure::Unreadable, e.to_string()));
                fallback_layout()
            }
        }
    }
}

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_level_failure);

        let colliders = self.level_colliders(app.world_mut());
        app.insert_resource(LevelColliders(colliders));
        app.insert_resource(ActiveController(LocomotionController::new(
            self.tunables.clone(),
        )));
        if !app.world().contains_resource::<GroundSource>() {
            app.insert_resource(GroundSource::flat(self.tunables.ground_height));
        }
        app.init_resource::<FrameInput>();
        app.init_resource::<CameraRig>();

        app.add_systems(
            Update,
            (
                poll_input_system,
                locomotion_tick_system,
                collision_resolve_system,
                presentation_system,
                sync_transform_system,
            )
                .chain(),
        );
    }
}

/// Fills [`FrameInput`] from the [`InputDriver`], when one is installed.
pub fn poll_input_system(driver: Option<ResMut<InputDriver>>, mut input: ResMut<FrameInput>) {
    if let Some(mut installed) = driver {
        let InputDriver { source, context } = &mut *installed;
        input.0 = source.poll(context);
    }
}

/// Advances every [`ControlledActor`] by the frame delta, then clears the
/// consumed input triggers.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters are passed by value."
)]
pub fn locomotion_tick_system(
    time: Res<Time>,
    controller: Res<ActiveController>,
    ground: Res<GroundSource>,
    camera: Res<CameraRig>,
    mut input: ResMut<FrameInput>,
    mut actors: Query<&mut ControlledActor>,
) {
    let dt = time.delta_secs();
    for mut actor in &mut actors {
        let events = controller
            .0
            .tick(&mut actor.state, &input.0, &camera.0, &*ground.0, dt);
        actor.last_events = events;
    }
    input.0.clear_triggers();
}

/// Pushes every actor's footprint out of the level colliders.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters are passed by value."
)]
pub fn collision_resolve_system(
    controller: Res<ActiveController>,
    colliders: Res<LevelColliders>,
    mut actors: Query<&mut ControlledActor>,
) {
    let radius = controller.0.tunables().capsule_radius;
    for mut actor in &mut actors {
        let ActorState {
            position, velocity, ..
        } = &mut actor.state;
        resolve_all(&colliders.0, radius, position, velocity);
    }
}

/// Refreshes the cosmetic state from the settled simulation state.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters are passed by value."
)]
pub fn presentation_system(time: Res<Time>, mut actors: Query<&mut ControlledActor>) {
    let dt = time.delta_secs();
    for mut actor in &mut actors {
        let ControlledActor {
            state,
            presentation,
            ..
        } = &mut *actor;
        presentation.observe(state, dt);
    }
}

/// Copies position and smoothed facing into the entity's `Transform`.
pub fn sync_transform_system(mut actors: Query<(&ControlledActor, &mut Transform)>) {
    for (actor, mut transform) in &mut actors {
        transform.translation = actor.state.position;
        transform.rotation = Quat::from_rotation_y(actor.presentation.visual_yaw);
    }
}
