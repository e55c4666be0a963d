use glam::{Mat4, Vec3};
use prism_common::Transform;
use prism_input::{FrameInput, Key, MouseButton};

/// Construction parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub position: Vec3,
    pub move_speed: f32,
    pub look_speed: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraSettings {
    pub fn new(position: Vec3, fov: f32, aspect_ratio: f32) -> Self {
        Self {
            position,
            move_speed: 5.0,
            look_speed: 10.0,
            fov,
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
        }
    }

    pub fn with_speeds(mut self, move_speed: f32, look_speed: f32) -> Self {
        self.move_speed = move_speed;
        self.look_speed = look_speed;
        self
    }
}

/// Free-fly camera driven by WASD/QE and left-drag mouse look.
///
/// Both matrices are valid from construction on. The view matrix reflects
/// the transform as of the last [`update`](Camera::update) or
/// [`update_view_matrix`](Camera::update_view_matrix); the projection only
/// changes through [`update_projection_matrix`](Camera::update_projection_matrix).
#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,
    fov: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
    move_speed: f32,
    look_speed: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            transform: Transform::from_position(settings.position),
            fov: settings.fov,
            aspect_ratio: settings.aspect_ratio,
            near: settings.near,
            far: settings.far,
            move_speed: settings.move_speed,
            look_speed: settings.look_speed,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix(settings.aspect_ratio);
        camera
    }

    /// Apply this frame's movement and look input, then rebuild the view.
    ///
    /// Movement is in camera-local space. Mouse look crosses the axes:
    /// vertical motion feeds pitch (rotation about X) and horizontal motion
    /// feeds yaw (rotation about Y), both with the motion's own sign, so a
    /// drag down tilts the view down and a drag right turns right.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        let step = self.move_speed * dt;
        if input.key_down(Key::W) {
            self.transform.move_relative(Vec3::new(0.0, 0.0, step));
        }
        if input.key_down(Key::A) {
            self.transform.move_relative(Vec3::new(-step, 0.0, 0.0));
        }
        if input.key_down(Key::S) {
            self.transform.move_relative(Vec3::new(0.0, 0.0, -step));
        }
        if input.key_down(Key::D) {
            self.transform.move_relative(Vec3::new(step, 0.0, 0.0));
        }
        if input.key_down(Key::Q) {
            self.transform.move_relative(Vec3::new(0.0, step, 0.0));
        }
        if input.key_down(Key::E) {
            self.transform.move_relative(Vec3::new(0.0, -step, 0.0));
        }

        if input.mouse_down(MouseButton::Left) {
            let look = input.mouse_delta() * self.look_speed * dt;
            self.transform.rotate(Vec3::new(look.y, look.x, 0.0));
        }

        self.update_view_matrix();
    }

    pub fn update_view_matrix(&mut self) {
        let eye = self.transform.position();
        self.view = Mat4::look_to_lh(eye, self.transform.forward(), Vec3::Y);
    }

    pub fn update_projection_matrix(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.projection = Mat4::perspective_lh(self.fov, aspect_ratio, self.near, self.far);
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutations are not reflected in [`view`](Camera::view) until the
    /// next update.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_input::InputState;
    use std::f32::consts::FRAC_PI_3;

    const EPS: f32 = 1e-4;

    fn camera() -> Camera {
        let settings = CameraSettings::new(Vec3::new(0.0, 0.0, -10.0), FRAC_PI_3, 16.0 / 9.0);
        Camera::new(settings)
    }

    fn frame(keys: &[Key]) -> FrameInput {
        let mut state = InputState::new();
        for k in keys {
            state.handle_key(*k, true);
        }
        state.snapshot()
    }

    #[test]
    fn draw_ready_after_construction() {
        let cam = camera();
        let eye = cam.view().transform_point3(Vec3::new(0.0, 0.0, -10.0));
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
        assert_ne!(cam.projection(), Mat4::IDENTITY);
    }

    #[test]
    fn origin_is_in_front_of_camera() {
        let cam = camera();
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert!((p.z - 10.0).abs() < EPS);
        let clip = cam.projection() * p.extend(1.0);
        let ndc_z = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&ndc_z));
    }

    #[test]
    fn forward_key_moves_along_facing() {
        let mut cam = camera();
        cam.update(0.5, &frame(&[Key::W]));
        let p = cam.transform().position();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -7.5), EPS));
    }

    #[test]
    fn strafe_and_vertical_keys() {
        let mut cam = camera();
        cam.update(1.0, &frame(&[Key::D, Key::Q]));
        let p = cam.transform().position();
        assert!(p.abs_diff_eq(Vec3::new(5.0, 5.0, -10.0), EPS));

        let mut cam = camera();
        cam.update(1.0, &frame(&[Key::A, Key::E, Key::S]));
        let p = cam.transform().position();
        assert!(p.abs_diff_eq(Vec3::new(-5.0, -5.0, -15.0), EPS));
    }

    #[test]
    fn mouse_look_requires_left_button() {
        let mut state = InputState::new();
        state.handle_mouse_motion(4.0, 2.0);
        let mut cam = camera();
        cam.update(0.1, &state.snapshot());
        assert_eq!(cam.transform().rotation(), Vec3::ZERO);

        state.handle_mouse_button(MouseButton::Left, true);
        state.handle_mouse_motion(4.0, 2.0);
        cam.update(0.1, &state.snapshot());
        // pitch from vertical motion, yaw from horizontal, both look * delta * dt
        let rotation = cam.transform().rotation();
        assert!(rotation.abs_diff_eq(Vec3::new(2.0, 4.0, 0.0), EPS));
    }

    #[test]
    fn captured_input_does_not_move_camera() {
        let mut input = frame(&[Key::W]);
        input.set_keyboard_capture(true);
        let mut cam = camera();
        cam.update(1.0, &input);
        let p = cam.transform().position();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), EPS));
    }

    #[test]
    fn projection_only_changes_with_aspect() {
        let mut cam = camera();
        let before = cam.projection();
        cam.update(1.0, &frame(&[Key::W, Key::D]));
        cam.update(1.0, &FrameInput::new());
        assert_eq!(cam.projection(), before);

        cam.update_projection_matrix(16.0 / 9.0);
        assert_eq!(cam.projection(), before);

        cam.update_projection_matrix(4.0 / 3.0);
        assert_ne!(cam.projection(), before);
        assert_eq!(cam.aspect_ratio(), 4.0 / 3.0);
    }

    #[test]
    fn view_tracks_transform_after_update() {
        let mut cam = camera();
        cam.transform_mut().move_absolute(Vec3::X);
        let stale = cam.view();
        cam.update(0.0, &FrameInput::new());
        assert_ne!(cam.view(), stale);
        let eye = cam.view().transform_point3(Vec3::new(1.0, 0.0, -10.0));
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
    }
}
