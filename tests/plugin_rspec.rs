//! Behaviour of the Bevy plugin inside a headless app.

#[path = "support/shared_app.rs"]
mod shared_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/level_failure_capture.rs"]
mod level_failure_capture;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use level_failure_capture::{install_failure_capture, CapturedFailures};
use locomotion::plugin::{InputDriver, LevelFailure};
use locomotion::{
    fallback_layout, ActorState, ControlledActor, InputFrame, LevelColliders, LocomotionPlugin,
    ScriptedInput, StaticCollider, Tunables,
};
use rspec_runner::run_serial;
use shared_app::{lock, share, SharedApp};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
struct PluginFixture {
    app: SharedApp,
    actor: Entity,
    // Keeps the level file alive for the duration of the suite.
    _level: Option<Arc<NamedTempFile>>,
}

impl PluginFixture {
    fn with_level(contents: Option<&str>, missing_path: bool) -> Self {
        let level = contents.map(|text| {
            let mut file = NamedTempFile::new().expect("create temp level");
            file.write_all(text.as_bytes()).expect("write temp level");
            Arc::new(file)
        });
        let level_path = if missing_path {
            Some(PathBuf::from("/definitely/not/here.level"))
        } else {
            level.as_ref().map(|file| file.path().to_path_buf())
        };

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)));
        install_failure_capture(&mut app);
        app.add_plugins(LocomotionPlugin {
            tunables: Tunables::default(),
            level_path,
        });
        let spawn = ActorState::standing(&Tunables::default(), 0.0, 0.0);
        let actor = app
            .world_mut()
            .spawn((
                ControlledActor::new(spawn.clone()),
                Transform::from_translation(spawn.position),
            ))
            .id();
        Self {
            app: share(app),
            actor,
            _level: level,
        }
    }

    fn tick(&self, frames: usize) {
        let mut app = lock(&self.app);
        for _ in 0..frames {
            app.0.update();
        }
    }

    fn colliders(&self) -> Vec<StaticCollider> {
        lock(&self.app).0.world().resource::<LevelColliders>().0.clone()
    }

    fn failures(&self) -> Vec<LevelFailure> {
        lock(&self.app).0.world().resource::<CapturedFailures>().0.clone()
    }

    fn actor(&self) -> ControlledActor {
        lock(&self.app)
            .0
            .world()
            .get::<ControlledActor>(self.actor)
            .cloned()
            .expect("actor should exist")
    }
}

#[test]
fn level_loading_through_the_plugin() {
    run_serial(&rspec::given(
        "a level file with one wall and one malformed line",
        PluginFixture::with_level(Some("3 -5 4 5\nnot numbers\n"), false),
        |ctx| {
            ctx.then("the wall is installed without failures", |fixture| {
                assert_eq!(fixture.colliders(), vec![StaticCollider::new(3.0, -5.0, 4.0, 5.0)]);
                assert!(fixture.failures().is_empty());
            });
        },
    ));

    run_serial(&rspec::given(
        "a level file with no usable lines",
        PluginFixture::with_level(Some("# only a comment\n"), false),
        |ctx| {
            ctx.then("the fallback layout is installed", |fixture| {
                assert_eq!(fixture.colliders(), fallback_layout());
                assert_eq!(fixture.failures(), vec![LevelFailure::Empty]);
            });
        },
    ));

    run_serial(&rspec::given(
        "a level path that does not exist",
        PluginFixture::with_level(None, true),
        |ctx| {
            ctx.then("the failure is reported as unreadable", |fixture| {
                assert_eq!(fixture.colliders(), fallback_layout());
                assert_eq!(fixture.failures(), vec![LevelFailure::Unreadable]);
            });
        },
    ));
}

#[test]
fn walking_into_a_level_wall() {
    run_serial(&rspec::given(
        "an actor facing a wall two metres away",
        PluginFixture::with_level(Some("2 -5 3 5\n"), false),
        |ctx| {
            ctx.when("scripted input walks toward the wall for two seconds", |ctx| {
                ctx.before_each(|fixture| {
                    {
                        let mut app = lock(&fixture.app);
                        app.0.insert_resource(InputDriver::new(ScriptedInput::new(vec![(
                            0,
                            InputFrame::movement(1.0, 0.0),
                        )])));
                    }
                    fixture.tick(120);
                });

                ctx.then("the footprint rests against the wall face", |fixture| {
                    let actor = fixture.actor();
                    let radius = Tunables::default().capsule_radius;
                    assert!(actor.state.position.x <= 2.0 - radius + 1e-3);
                    assert!(actor.state.position.x > 1.0);
                });
            });
        },
    ));
}
