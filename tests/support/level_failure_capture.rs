//! Records `LevelLoadFailed` events raised while a plugin builds.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use locomotion::plugin::{LevelFailure, LevelLoadFailed};

/// Failures observed so far, in trigger order.
#[derive(Resource, Default, Debug)]
pub struct CapturedFailures(pub Vec<LevelFailure>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_failure(event: On<LevelLoadFailed>, mut failures: ResMut<CapturedFailures>) {
    failures.0.push(event.event().kind);
}

/// Installs the capturing observer; call before adding the plugin.
pub fn install_failure_capture(app: &mut App) {
    app.insert_resource(CapturedFailures::default());
    app.world_mut().add_observer(record_failure);
}
