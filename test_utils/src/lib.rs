//! Utility helpers for tests.
//!
//! Ground shapes the library does not ship, plus drivers that run the
//! controller for a number of fixed frames.

pub mod ground;

use glam::Vec3;
use locomotion::{
    ActorState, CameraBasis, GroundQuery, InputFrame, LocomotionController, TickEvents,
};

/// Fixed 60 Hz frame duration used by most tests.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Ticks `controller` `frames` times with the same input and the default
/// camera, returning the events of every tick.
pub fn run_frames<G>(
    controller: &LocomotionController,
    actor: &mut ActorState,
    ground: &G,
    input: InputFrame,
    frames: usize,
) -> Vec<TickEvents>
where
    G: GroundQuery + ?Sized,
{
    let camera = CameraBasis::default();
    let mut held = input;
    (0..frames)
        .map(|_| {
            let events = controller.tick(actor, &held, &camera, ground, FRAME_DT);
            held.clear_triggers();
            events
        })
        .collect()
}

/// Assert that two vectors agree component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors when any component differs by more than
/// `epsilon`.
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, epsilon: f32) {
    assert!(
        actual.abs_diff_eq(expected, epsilon),
        "expected {expected:?} within {epsilon}, got {actual:?}"
    );
}
