//! Stepping onto low ledges.

use approx::assert_abs_diff_eq;
use glam::Vec3;
use locomotion::{
    ActorState, CameraBasis, InputFrame, LocomotionController, LocomotionState, Tunables,
};
use rstest::{fixture, rstest};
use test_utils::ground::Ledge;
use test_utils::FRAME_DT;

#[fixture]
fn tunables() -> Tunables {
    Tunables::default()
}

#[rstest]
fn walking_onto_a_low_ledge_steps_up(tunables: Tunables) {
    let controller = LocomotionController::new(tunables.clone());
    let ledge = Ledge::rising(0.3, 1.0);
    let mut actor = ActorState::standing(&tunables, 0.0, 0.0);
    let input = InputFrame::movement(1.0, 0.0);
    let camera = CameraBasis::default();

    let mut stepped = false;
    for _ in 0..60 {
        let events = controller.tick(&mut actor, &input, &camera, &ledge, FRAME_DT);
        stepped |= events.stepped_up;
    }

    assert!(stepped);
    assert!(actor.position.x > 1.0);
    assert!(actor.grounded);
    assert_abs_diff_eq!(actor.position.y, tunables.rest_height(0.3), epsilon = 0.01);
}

#[rstest]
fn ledge_above_step_offset_is_not_climbed_early(tunables: Tunables) {
    let controller = LocomotionController::new(tunables.clone());
    let ledge = Ledge::rising(tunables.step_offset + 0.2, 1.0);
    let mut actor = ActorState::standing(&tunables, 0.0, 0.0);
    let input = InputFrame::movement(1.0, 0.0);
    let camera = CameraBasis::default();

    while actor.position.x < 1.0 {
        let events = controller.tick(&mut actor, &input, &camera, &ledge, FRAME_DT);
        if actor.position.x < 1.0 {
            assert!(!events.stepped_up);
            assert!(actor.position.y < tunables.rest_height(0.1));
        }
    }
}

#[rstest]
fn drifting_onto_a_ledge_without_input_lands_idle(tunables: Tunables) {
    let controller = LocomotionController::new(tunables.clone());
    let ledge = Ledge::rising(0.3, 1.0);
    let mut actor = ActorState::at(Vec3::new(0.8, tunables.rest_height(0.0) + 0.1, 0.0));
    actor.velocity = Vec3::new(5.0, 0.0, 0.0);
    actor.off_ground_time = 1.0;
    let camera = CameraBasis::default();

    let events = controller.tick(&mut actor, &InputFrame::default(), &camera, &ledge, FRAME_DT);

    assert!(events.stepped_up);
    assert!(actor.grounded);
    assert_eq!(actor.state, LocomotionState::Idle);
    assert!(actor.check_invariants(&tunables).is_ok());
}
