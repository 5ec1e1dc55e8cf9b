use crate::pointer::PointerEvent;
use cubeview_common::{DragMode, InputConfig};
use glam::{Mat4, Vec2, Vec3};

/// Deltas shorter than this (after scaling) produce no rotation.
const MIN_DRAG_DEGREES: f32 = 1e-6;

/// Rotation derived from one drag measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRotation {
    /// Unit rotation axis.
    pub axis: Vec3,
    /// Signed angle in degrees.
    pub angle_degrees: f32,
}

impl DragRotation {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_axis_angle(self.axis, self.angle_degrees.to_radians())
    }
}

/// Map a screen-space drag to a rotation.
///
/// The delta is divided by `divisor`; its components are swapped into the
/// axis `(dy, dx, 0)` so horizontal motion turns about the vertical axis,
/// and its length becomes the angle in degrees, negated. Returns `None`
/// when the pointer has not moved away from `anchor` or the scaled delta
/// is not finite.
pub fn drag_rotation(anchor: Vec2, current: Vec2, divisor: f32) -> Option<DragRotation> {
    let delta = (current - anchor) / divisor;
    let degrees = delta.length();
    if !degrees.is_finite() || degrees < MIN_DRAG_DEGREES {
        return None;
    }
    Some(DragRotation {
        axis: Vec3::new(delta.y, delta.x, 0.0) / degrees,
        angle_degrees: -degrees,
    })
}

/// Drag state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { anchor: Vec2 },
}

/// Owns the accumulated orientation of the whole assembly.
///
/// Only pointer events mutate it; renderers read it once per frame.
#[derive(Debug, Clone)]
pub struct OrientationController {
    state: DragState,
    orientation: Mat4,
    divisor: f32,
    mode: DragMode,
}

impl Default for OrientationController {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl OrientationController {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            state: DragState::Idle,
            orientation: Mat4::IDENTITY,
            divisor: config.drag_divisor,
            mode: config.drag_mode,
        }
    }

    /// Current accumulated rotation.
    pub fn orientation(&self) -> Mat4 {
        self.orientation
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Apply one pointer event. Returns the rotation composed into the
    /// orientation, if any.
    pub fn handle(&mut self, event: PointerEvent) -> Option<DragRotation> {
        match (self.state, event) {
            (_, PointerEvent::Down(anchor)) => {
                tracing::debug!("drag start at ({}, {})", anchor.x, anchor.y);
                self.state = DragState::Dragging { anchor };
                None
            }
            (DragState::Dragging { anchor }, PointerEvent::Move(current)) => {
                // Anchored mode keeps measuring from the press point, so the
                // rotation per move grows with the total drag distance.
                let rotation = drag_rotation(anchor, current, self.divisor)?;
                self.orientation = rotation.matrix() * self.orientation;
                if self.mode == DragMode::Incremental {
                    self.state = DragState::Dragging { anchor: current };
                }
                Some(rotation)
            }
            (DragState::Dragging { .. }, PointerEvent::Up(_)) => {
                tracing::debug!("drag end");
                self.state = DragState::Idle;
                None
            }
            (DragState::Idle, PointerEvent::Move(_) | PointerEvent::Up(_)) => None,
        }
    }

    /// Apply a batch of events in order.
    pub fn handle_all(&mut self, events: impl IntoIterator<Item = PointerEvent>) -> usize {
        events
            .into_iter()
            .filter_map(|event| self.handle(event))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn starts_idle_with_identity() {
        let ctl = OrientationController::default();
        assert_eq!(ctl.state(), DragState::Idle);
        assert_eq!(ctl.orientation(), Mat4::IDENTITY);
    }

    #[test]
    fn horizontal_drag_axis_and_angle() {
        let rot = drag_rotation(Vec2::ZERO, Vec2::new(10.0, 0.0), 10.0).unwrap();
        assert!(rot.axis.abs_diff_eq(Vec3::Y, 1e-6));
        assert!((rot.angle_degrees - -1.0).abs() < 1e-6);
        assert_mat_eq(rot.matrix(), Mat4::from_rotation_y(-1.0_f32.to_radians()));
    }

    #[test]
    fn vertical_drag_turns_about_x() {
        let rot = drag_rotation(Vec2::ZERO, Vec2::new(0.0, 30.0), 10.0).unwrap();
        assert!(rot.axis.abs_diff_eq(Vec3::X, 1e-6));
        assert!((rot.angle_degrees - -3.0).abs() < 1e-6);
    }

    #[test]
    fn diagonal_drag_magnitude() {
        let rot = drag_rotation(Vec2::new(5.0, 5.0), Vec2::new(35.0, 45.0), 10.0).unwrap();
        // delta = (3, 4) -> |delta| = 5
        assert!((rot.angle_degrees - -5.0).abs() < 1e-5);
        assert!(rot.axis.abs_diff_eq(Vec3::new(0.8, 0.6, 0.0), 1e-6));
    }

    #[test]
    fn no_motion_no_rotation() {
        assert!(drag_rotation(Vec2::ONE, Vec2::ONE, 10.0).is_none());
    }

    #[test]
    fn non_finite_delta_no_rotation() {
        assert!(drag_rotation(Vec2::ZERO, Vec2::new(10.0, 0.0), f32::NAN).is_none());

        let mut ctl = OrientationController::new(&InputConfig {
            drag_divisor: f32::NAN,
            ..InputConfig::default()
        });
        ctl.handle(PointerEvent::Down(Vec2::ZERO));
        assert!(ctl.handle(PointerEvent::Move(Vec2::new(10.0, 0.0))).is_none());
        assert_eq!(ctl.orientation(), Mat4::IDENTITY);
    }

    #[test]
    fn state_transitions() {
        let mut ctl = OrientationController::default();
        ctl.handle(PointerEvent::Down(Vec2::new(4.0, 2.0)));
        assert_eq!(
            ctl.state(),
            DragState::Dragging {
                anchor: Vec2::new(4.0, 2.0)
            }
        );
        ctl.handle(PointerEvent::Up(Vec2::new(4.0, 2.0)));
        assert_eq!(ctl.state(), DragState::Idle);
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut ctl = OrientationController::default();
        assert!(ctl.handle(PointerEvent::Move(Vec2::new(50.0, 50.0))).is_none());
        assert!(ctl.handle(PointerEvent::Up(Vec2::ZERO)).is_none());
        assert_eq!(ctl.orientation(), Mat4::IDENTITY);
    }

    #[test]
    fn drag_composes_on_the_left() {
        let mut ctl = OrientationController::default();
        ctl.handle(PointerEvent::Down(Vec2::ZERO));
        ctl.handle(PointerEvent::Move(Vec2::new(10.0, 0.0)));
        ctl.handle(PointerEvent::Up(Vec2::new(10.0, 0.0)));
        ctl.handle(PointerEvent::Down(Vec2::ZERO));
        ctl.handle(PointerEvent::Move(Vec2::new(0.0, 20.0)));

        let first = Mat4::from_rotation_y(-1.0_f32.to_radians());
        let second = Mat4::from_rotation_x(-2.0_f32.to_radians());
        assert_mat_eq(ctl.orientation(), second * first);
    }

    #[test]
    fn anchored_moves_remeasure_from_press_point() {
        let mut ctl = OrientationController::default();
        ctl.handle(PointerEvent::Down(Vec2::ZERO));
        let a = ctl.handle(PointerEvent::Move(Vec2::new(10.0, 0.0))).unwrap();
        let b = ctl.handle(PointerEvent::Move(Vec2::new(10.0, 0.0))).unwrap();
        assert_eq!(a, b);
        assert_mat_eq(
            ctl.orientation(),
            Mat4::from_rotation_y(-2.0_f32.to_radians()),
        );
    }

    #[test]
    fn incremental_mode_reanchors() {
        let mut ctl = OrientationController::new(&InputConfig {
            drag_mode: DragMode::Incremental,
            ..InputConfig::default()
        });
        ctl.handle(PointerEvent::Down(Vec2::ZERO));
        assert!(ctl.handle(PointerEvent::Move(Vec2::new(10.0, 0.0))).is_some());
        assert!(ctl.handle(PointerEvent::Move(Vec2::new(10.0, 0.0))).is_none());
        assert_mat_eq(
            ctl.orientation(),
            Mat4::from_rotation_y(-1.0_f32.to_radians()),
        );
    }

    #[test]
    fn release_freezes_orientation() {
        let mut ctl = OrientationController::default();
        ctl.handle(PointerEvent::Down(Vec2::ZERO));
        ctl.handle(PointerEvent::Move(Vec2::new(25.0, -5.0)));
        ctl.handle(PointerEvent::Up(Vec2::new(25.0, -5.0)));
        let frozen = ctl.orientation();

        ctl.handle(PointerEvent::Move(Vec2::new(400.0, 300.0)));
        assert_eq!(ctl.orientation(), frozen);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn press_while_dragging_moves_anchor() {
        let mut ctl = OrientationController::default();
        ctl.handle(PointerEvent::Down(Vec2::ZERO));
        ctl.handle(PointerEvent::Down(Vec2::new(10.0, 0.0)));
        assert!(ctl.handle(PointerEvent::Move(Vec2::new(10.0, 0.0))).is_none());
    }

    #[test]
    fn handle_all_counts_applied_rotations() {
        let mut ctl = OrientationController::default();
        let applied = ctl.handle_all([
            PointerEvent::Move(Vec2::new(1.0, 1.0)),
            PointerEvent::Down(Vec2::ZERO),
            PointerEvent::Move(Vec2::new(10.0, 0.0)),
            PointerEvent::Move(Vec2::new(20.0, 0.0)),
            PointerEvent::Up(Vec2::new(20.0, 0.0)),
        ]);
        assert_eq!(applied, 2);
    }
}
