//! Per-frame input and the camera basis used to interpret it.
//!
//! The core never reads device state. An [`InputSource`] supplies a fresh
//! [`InputFrame`] each tick; the camera collaborator supplies a
//! [`CameraBasis`] whose horizontal projection maps stick axes into a world
//! space wish direction.

use glam::Vec3;

use crate::vector_math::planar_direction;

/// One frame of locomotion input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Strafe axis, positive to the camera's right. Conceptually in `[-1, 1]`.
    pub move_x: f32,
    /// Forward axis, positive along the camera's forward. Conceptually in
    /// `[-1, 1]`.
    pub move_z: f32,
    /// Jump was pressed this frame.
    pub jump: bool,
    /// Dash was pressed this frame.
    pub dash: bool,
}

impl InputFrame {
    /// A frame holding only movement axes.
    #[must_use]
    pub const fn movement(move_x: f32, move_z: f32) -> Self {
        Self {
            move_x,
            move_z,
            jump: false,
            dash: false,
        }
    }

    /// Returns a copy with the jump trigger set.
    #[must_use]
    pub const fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Returns a copy with the dash trigger set.
    #[must_use]
    pub const fn with_dash(mut self) -> Self {
        self.dash = true;
        self
    }

    /// Clears the edge-triggered flags, keeping held axes.
    pub fn clear_triggers(&mut self) {
        self.jump = false;
        self.dash = false;
    }
}

/// World-space forward/right vectors of the active camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Camera forward; pitch is ignored.
    pub forward: Vec3,
    /// Camera right; roll and pitch are ignored.
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

impl CameraBasis {
    /// Creates a basis from explicit vectors.
    #[must_use]
    pub const fn new(forward: Vec3, right: Vec3) -> Self {
        Self { forward, right }
    }

    /// Basis of a camera rotated `yaw` radians about +Y, looking down +Z at
    /// zero yaw.
    #[must_use]
    pub fn from_yaw(yaw: f32) -> Self {
        let (sin, cos) = yaw.sin_cos();
        Self {
            forward: Vec3::new(sin, 0.0, cos),
            right: Vec3::new(cos, 0.0, -sin),
        }
    }

    /// Forward flattened to the horizontal plane, or zero if degenerate.
    #[must_use]
    pub fn planar_forward(&self) -> Vec3 {
        planar_direction(self.forward)
    }

    /// Right flattened to the horizontal plane, or zero if degenerate.
    #[must_use]
    pub fn planar_right(&self) -> Vec3 {
        planar_direction(self.right)
    }

    /// Maps stick axes into a horizontal wish vector of length at most one.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use locomotion::input::{CameraBasis, InputFrame};
    /// let camera = CameraBasis::new(Vec3::X, Vec3::NEG_Z);
    /// let wish = camera.wish_direction(&InputFrame::movement(1.0, 1.0));
    /// assert!((wish.length() - 1.0).abs() < 1e-6);
    /// assert_eq!(wish.y, 0.0);
    /// ```
    #[must_use]
    pub fn wish_direction(&self, input: &InputFrame) -> Vec3 {
        let wish = self.planar_forward() * input.move_z + self.planar_right() * input.move_x;
        if wish.is_finite() {
            wish.clamp_length_max(1.0)
        } else {
            Vec3::ZERO
        }
    }
}

/// Explicit input context replacing process-wide "input active" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    /// When false, sources report a neutral frame.
    pub active: bool,
}

impl Default for InputContext {
    fn default() -> Self {
        Self { active: true }
    }
}

/// Supplier of per-frame input.
pub trait InputSource {
    /// Produces the input for the next frame.
    fn poll(&mut self, context: &InputContext) -> InputFrame;
}

/// Replays keyed input frames.
///
/// Each key takes effect on its frame index. Movement axes are held until the
/// next key; jump and dash fire only on the exact frame they are keyed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    keys: Vec<(u64, InputFrame)>,
    frame: u64,
    held: InputFrame,
}

impl ScriptedInput {
    /// Creates a script from `(frame, input)` keys. Keys are sorted by frame;
    /// later keys on the same frame win.
    #[must_use]
    pub fn new(mut keys: Vec<(u64, InputFrame)>) -> Self {
        keys.sort_by_key(|(frame, _)| *frame);
        Self {
            keys,
            frame: 0,
            held: InputFrame::default(),
        }
    }

    /// Index of the next frame to be polled.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, context: &InputContext) -> InputFrame {
        let current = self.frame;
        self.frame += 1;

        let mut triggered = self.held;
        triggered.clear_triggers();
        for (_, key) in self.keys.iter().filter(|(frame, _)| *frame == current) {
            triggered = *key;
        }
        self.held = triggered;
        self.held.clear_triggers();

        if context.active {
            triggered
        } else {
            InputFrame::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::forward(InputFrame::movement(0.0, 1.0), Vec3::Z)]
    #[case::right(InputFrame::movement(1.0, 0.0), Vec3::X)]
    #[case::back(InputFrame::movement(0.0, -0.5), Vec3::new(0.0, 0.0, -0.5))]
    fn wish_follows_default_camera(#[case] input: InputFrame, #[case] expected: Vec3) {
        let wish = CameraBasis::default().wish_direction(&input);
        assert_relative_eq!(wish.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(wish.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn wish_ignores_camera_pitch() {
        let camera = CameraBasis::new(Vec3::new(0.0, -0.9, 0.1), Vec3::X);
        let wish = camera.wish_direction(&InputFrame::movement(0.0, 1.0));
        assert_relative_eq!(wish.z, 1.0, epsilon = 1e-6);
        assert_eq!(wish.y, 0.0);
    }

    #[test]
    fn degenerate_camera_yields_no_wish() {
        let camera = CameraBasis::new(Vec3::Y, Vec3::ZERO);
        let wish = camera.wish_direction(&InputFrame::movement(1.0, 1.0));
        assert_eq!(wish, Vec3::ZERO);
    }

    #[test]
    fn script_holds_axes_and_pulses_triggers() {
        let mut script = ScriptedInput::new(vec![
            (0, InputFrame::movement(0.0, 1.0)),
            (2, InputFrame::movement(0.0, 1.0).with_jump()),
        ]);
        let context = InputContext::default();
        let frames: Vec<_> = (0..4).map(|_| script.poll(&context)).collect();
        assert!(frames.iter().all(|f| (f.move_z - 1.0).abs() < f32::EPSILON));
        let jumps: Vec<_> = frames.iter().map(|f| f.jump).collect();
        assert_eq!(jumps, vec![false, false, true, false]);
        assert_eq!(script.frame(), 4);
    }

    #[test]
    fn inactive_context_is_neutral() {
        let mut script = ScriptedInput::new(vec![(0, InputFrame::movement(1.0, 0.0).with_dash())]);
        let frame = script.poll(&InputContext { active: false });
        assert_eq!(frame, InputFrame::default());
    }
}
