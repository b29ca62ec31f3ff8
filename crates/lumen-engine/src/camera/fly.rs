use glam::{Mat4, Vec3};

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch is kept within `[-PITCH_LIMIT, PITCH_LIMIT]` degrees so the view
/// never flips over the vertical.
pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Yaw/pitch fly camera.
///
/// Angles are in degrees. `front`, `right` and `up` are derived from the
/// angles and always unit length.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,

    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Camera {
    /// Camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        };
        camera.update_vectors();
        camera
    }

    /// Right-handed look-at from `position` toward `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Moves along the view plane by `movement_speed * dt`.
    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.movement_speed * dt;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Applies a cursor delta. Screen y grows downward, so a positive `dy`
    /// tilts the view down.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch - dy * self.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    #[inline]
    pub fn front(&self) -> Vec3 {
        self.front
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 7.0));

        assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(camera.right().abs_diff_eq(Vec3::X, EPS));
        assert!(camera.up().abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn forward_for_one_second_moves_speed_units() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 7.0));
        camera.process_keyboard(CameraMovement::Forward, 1.0);

        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 4.5), EPS));
    }

    #[test]
    fn strafing_follows_the_right_vector() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_keyboard(CameraMovement::Left, 0.4);

        assert!(camera.position.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO);

        camera.process_mouse_movement(0.0, -10_000.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);

        camera.process_mouse_movement(0.0, 20_000.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        assert!((camera.front().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn mouse_delta_scales_by_sensitivity() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_movement(100.0, 50.0);

        assert!((camera.yaw() - (-80.0)).abs() < EPS);
        assert!((camera.pitch() - (-5.0)).abs() < EPS);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let eye = camera.view_matrix().transform_point3(camera.position);

        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
    }
}
