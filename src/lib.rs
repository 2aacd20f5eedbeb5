#![cfg_attr(docsrs, feature(doc_cfg))]
//! Third-person character locomotion.
//!
//! The crate simulates a single capsule actor on a Y-up world: ground and air
//! acceleration, coyote time and buffered jumps, a timed dash with an
//! invulnerability window, step-up onto low ledges and footprint collision
//! against axis-aligned static colliders loaded from flat-text level files.
//!
//! [`LocomotionController::tick`] is a pure step over [`ActorState`];
//! [`Simulation`] adds collision and presentation, and [`LocomotionPlugin`]
//! drives the same pipeline from Bevy.
pub mod actor;
pub mod collision;
pub mod constants;
pub mod controller;
pub mod ground;
pub mod input;
pub mod kinematics;
pub mod level;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod presentation;
pub mod simulation;
pub mod tunables;
pub mod vector_math;

pub use actor::{ActorState, LocomotionState};
pub use collision::{resolve_all, resolve_collider, StaticCollider};
pub use controller::{LocomotionController, TickEvents};
pub use ground::{FlatGround, GroundQuery, SlopedPlane};
pub use input::{CameraBasis, InputContext, InputFrame, InputSource, ScriptedInput};
pub use level::{fallback_layout, load_level, parse_level, LevelError, LevelLoad, SkippedLine};
pub use logging::init as init_logging;
pub use plugin::{
    ControlledActor, FrameInput, LevelColliders, LevelLoadFailed, LocomotionPlugin,
};
pub use presentation::PresentationState;
pub use simulation::{FrameReport, Simulation};
pub use tunables::{Tunables, TunablesError};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use locomotion::prelude::*;
    //! ```

    pub use crate::ActorState;
    pub use crate::CameraBasis;
    pub use crate::FlatGround;
    pub use crate::GroundQuery;
    pub use crate::InputFrame;
    pub use crate::LocomotionController;
    pub use crate::LocomotionState;
    pub use crate::StaticCollider;
    pub use crate::Tunables;
}
