//! Headless runner replaying a scripted input sequence through the plugin.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use locomotion::plugin::InputDriver;
use locomotion::{
    init_logging, ActorState, ControlledActor, InputFrame, LocomotionPlugin, ScriptedInput,
    Tunables,
};
use log::{debug, info};

/// Headless third-person locomotion runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Level file listing one `minX minZ maxX maxZ` collider per line
    #[arg(long)]
    level: Option<PathBuf>,
    /// TOML file overriding the default tunables
    #[arg(long)]
    tunables: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 240)]
    frames: u64,
    /// Fixed frame duration in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

/// Walk forward, jump, dash, strafe, stop, then dash from standing.
fn demo_script() -> ScriptedInput {
    ScriptedInput::new(vec![
        (0, InputFrame::movement(0.0, 1.0)),
        (40, InputFrame::movement(0.0, 1.0).with_jump()),
        (90, InputFrame::movement(0.0, 1.0).with_dash()),
        (130, InputFrame::movement(1.0, 0.0)),
        (170, InputFrame::default()),
        (200, InputFrame::default().with_dash()),
    ])
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tunables = match &args.tunables {
        Some(path) => Tunables::load(path)
            .with_context(|| format!("loading tunables from {}", path.display()))?,
        None => Tunables::default(),
    };

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
            args.frame_ms,
        )))
        .add_plugins(LocomotionPlugin {
            tunables: tunables.clone(),
            level_path: args.level.clone(),
        })
        .insert_resource(InputDriver::new(demo_script()));
    app.finish();
    app.cleanup();

    let spawn = ActorState::standing(&tunables, 0.0, 0.0);
    let entity = app
        .world_mut()
        .spawn((
            ControlledActor::new(spawn.clone()),
            Transform::from_translation(spawn.position),
        ))
        .id();

    for frame in 0..args.frames {
        app.update();
        let actor = app
            .world()
            .get::<ControlledActor>(entity)
            .context("controlled actor despawned")?;
        let events = actor.last_events;
        if events.jumped || events.dash_started || events.dash_ended || events.stepped_up {
            debug!("frame {frame}: {events:?}");
        }
        if frame % 60 == 0 {
            let state = &actor.state;
            info!(
                "frame {frame}: {} at ({:.2}, {:.2}, {:.2}) speed {:.2}",
                state.state,
                state.position.x,
                state.position.y,
                state.position.z,
                actor.presentation.last_speed
            );
        }
    }

    let finished = app
        .world()
        .get::<ControlledActor>(entity)
        .context("controlled actor despawned")?;
    info!(
        "finished {} frames in state {} at {:?}",
        args.frames, finished.state.state, finished.state.position
    );
    Ok(())
}
