use super::Camera;

/// Turns absolute cursor positions into camera rotation.
///
/// The first position after construction or `reset` only establishes the
/// baseline, so grabbing the cursor does not jerk the view.
#[derive(Debug, Default, Clone)]
pub struct MouseLook {
    last: Option<(f32, f32)>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the baseline, e.g. after the cursor was released.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Feeds one cursor position. Returns the applied `(dx, dy)`.
    pub fn cursor_moved(&mut self, camera: &mut Camera, x: f32, y: f32) -> (f32, f32) {
        let (last_x, last_y) = self.last.replace((x, y)).unwrap_or((x, y));
        let (dx, dy) = (x - last_x, y - last_y);
        if dx != 0.0 || dy != 0.0 {
            camera.process_mouse_movement(dx, dy);
        }
        (dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn first_event_only_sets_the_baseline() {
        let mut camera = Camera::new(Vec3::ZERO);
        let mut look = MouseLook::new();

        assert_eq!(look.cursor_moved(&mut camera, 680.0, 384.0), (0.0, 0.0));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn later_events_apply_deltas() {
        let mut camera = Camera::new(Vec3::ZERO);
        let mut look = MouseLook::new();

        look.cursor_moved(&mut camera, 100.0, 100.0);
        assert_eq!(look.cursor_moved(&mut camera, 110.0, 80.0), (10.0, -20.0));

        assert!((camera.yaw() - (-89.0)).abs() < 1e-5);
        assert!((camera.pitch() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn reset_rearms_the_latch() {
        let mut camera = Camera::new(Vec3::ZERO);
        let mut look = MouseLook::new();

        look.cursor_moved(&mut camera, 0.0, 0.0);
        look.reset();
        assert_eq!(look.cursor_moved(&mut camera, 500.0, 500.0), (0.0, 0.0));
    }
}
