//! Drag, momentum and idle auto-rotation of the marker group.
//!
//! The controller has two modes over one continuous state. While dragging,
//! pointer deltas are applied directly to the angles and remembered as the
//! velocity. Once released, every tick adds the auto-rotate bias plus the
//! remaining velocity and then decays the velocity geometrically. The update
//! is per tick, not per second.

use crate::config::RotationParams;
use glam::Mat4;

/// Orientation and angular velocity of the marker group, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub angle_x: f32,
    pub angle_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub dragging: bool,
}

/// Last pointer position seen during a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDragSample {
    pub last_x: f32,
    pub last_y: f32,
}

#[derive(Clone, Debug)]
pub struct RotationController {
    state: RotationState,
    drag: Option<PointerDragSample>,
    params: RotationParams,
}

impl RotationController {
    pub fn new(params: RotationParams) -> Self {
        Self {
            state: RotationState::default(),
            drag: None,
            params,
        }
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    pub fn drag_sample(&self) -> Option<PointerDragSample> {
        self.drag
    }

    /// Enter drag mode at pointer `(x, y)`. Velocity is kept until the first move.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag = Some(PointerDragSample {
            last_x: x,
            last_y: y,
        });
        self.state.dragging = true;
    }

    /// Apply a pointer move. Ignored unless a drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some(sample) = self.drag.as_mut() else {
            return;
        };
        let k = self.params.sensitivity;
        let dx = (x - sample.last_x) * k;
        let dy = (y - sample.last_y) * k;
        // horizontal motion spins around Y, vertical motion tilts around X
        self.state.angle_y += dx;
        self.state.angle_x += dy;
        self.state.velocity_x = dx;
        self.state.velocity_y = dy;
        sample.last_x = x;
        sample.last_y = y;
    }

    /// Leave drag mode; the last drag velocity carries on as momentum.
    pub fn end_drag(&mut self) {
        self.drag = None;
        self.state.dragging = false;
    }

    /// Advance one frame. Does nothing while dragging.
    pub fn tick(&mut self) {
        if self.state.dragging {
            return;
        }
        let s = &mut self.state;
        s.angle_y += self.params.auto_rotate_speed + s.velocity_x;
        s.angle_x += s.velocity_y;
        s.velocity_x *= self.params.decay;
        s.velocity_y *= self.params.decay;
    }

    /// Group transform in XYZ Euler order (X applied last).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.state.angle_x) * Mat4::from_rotation_y(self.state.angle_y)
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(RotationParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still() -> RotationController {
        RotationController::new(RotationParams {
            auto_rotate_speed: 0.0,
            ..RotationParams::default()
        })
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut rc = still();
        rc.drag_to(50.0, 50.0);
        assert_eq!(*rc.state(), RotationState::default());
    }

    #[test]
    fn tick_is_frozen_while_dragging() {
        let mut rc = RotationController::default();
        rc.begin_drag(0.0, 0.0);
        rc.drag_to(10.0, 0.0);
        let before = *rc.state();
        rc.tick();
        rc.tick();
        assert_eq!(*rc.state(), before);
    }

    #[test]
    fn begin_drag_keeps_momentum_until_first_move() {
        let mut rc = still();
        rc.begin_drag(0.0, 0.0);
        rc.drag_to(20.0, 0.0);
        rc.end_drag();
        let v = rc.state().velocity_x;
        rc.begin_drag(5.0, 5.0);
        assert_eq!(rc.state().velocity_x, v);
        rc.drag_to(5.0, 5.0);
        assert_eq!(rc.state().velocity_x, 0.0);
    }

    #[test]
    fn end_drag_clears_sample() {
        let mut rc = still();
        rc.begin_drag(1.0, 2.0);
        assert_eq!(
            rc.drag_sample(),
            Some(PointerDragSample {
                last_x: 1.0,
                last_y: 2.0
            })
        );
        rc.end_drag();
        assert!(rc.drag_sample().is_none());
        assert!(!rc.is_dragging());
    }

    #[test]
    fn model_matrix_is_identity_at_rest() {
        let rc = still();
        assert!(rc.model_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }
}
