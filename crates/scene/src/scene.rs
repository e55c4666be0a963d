use crate::animation::{Phase, Shuttle, Spin};
use crate::camera::{Camera, CameraSettings};
use crate::roster::{ShapeRecord, build_roster};
use crate::ui::{DebugPanel, DebugUi};
use glam::Vec3;
use prism_input::{FrameInput, Key};
use prism_render::{
    BufferHandle, GraphicsContext, ObjectConstants, RenderError, constant_buffer_size,
};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

/// Back buffer clear color.
pub const CLEAR_COLOR: [f32; 4] = [0.4, 0.6, 0.75, 1.0];
pub const CLEAR_DEPTH: f32 = 1.0;
pub const CAMERA_COUNT: usize = 3;

/// What the host should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

/// The demo scene and its per-frame pipeline.
///
/// The host calls [`init`](Scene::init) once, then [`update`](Scene::update)
/// and [`draw`](Scene::draw) once per frame in that order, and
/// [`on_resize`](Scene::on_resize) whenever the window size changes.
pub struct Scene {
    roster: Vec<ShapeRecord>,
    cameras: [Camera; CAMERA_COUNT],
    active_camera: usize,
    shuttle: Shuttle,
    spinners: Vec<Spin>,
    constant_buffer: BufferHandle,
    viewport: (u32, u32),
    fps: f32,
    elapsed: f32,
    quit_requested: bool,
}

impl Scene {
    /// Upload the roster's geometry, allocate the per-object constant buffer
    /// and place the cameras. Any device rejection aborts setup, as does a
    /// zero-sized viewport.
    pub fn init<G: GraphicsContext>(
        gfx: &mut G,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        check_viewport(width, height)?;
        let roster = build_roster(gfx)?;
        let constant_buffer =
            gfx.create_constant_buffer(constant_buffer_size::<ObjectConstants>())?;

        let aspect = aspect_ratio(width, height);
        let cameras = [
            (Vec3::new(10.0, 0.0, -10.0), FRAC_PI_2),
            (Vec3::new(0.0, 0.0, -10.0), FRAC_PI_3),
            (Vec3::new(-10.0, 0.0, -10.0), FRAC_PI_4),
        ]
        .map(|(position, fov)| {
            let settings = CameraSettings::new(position, fov, aspect).with_speeds(5.0, 10.0);
            Camera::new(settings)
        });

        tracing::info!(
            shapes = roster.len(),
            cameras = CAMERA_COUNT,
            width,
            height,
            "scene initialized"
        );

        Ok(Self {
            roster,
            cameras,
            active_camera: 0,
            shuttle: Shuttle::new(0, 4, 2),
            spinners: vec![Spin::roll(3, 10.0), Spin::roll(1, 10.0)],
            constant_buffer,
            viewport: (width, height),
            fps: 0.0,
            elapsed: 0.0,
            quit_requested: false,
        })
    }

    /// Refresh every camera's projection for the new aspect ratio, then
    /// resize the back buffers. A zero extent is rejected before anything
    /// changes.
    pub fn on_resize<G: GraphicsContext>(
        &mut self,
        gfx: &mut G,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        check_viewport(width, height)?;
        let aspect = aspect_ratio(width, height);
        for camera in &mut self.cameras {
            camera.update_projection_matrix(aspect);
        }
        self.viewport = (width, height);
        tracing::debug!(width, height, aspect, "viewport resized");
        gfx.resize(width, height)
    }

    /// Advance one frame: UI capture, parameter panel, scripted animation,
    /// camera switching, active camera movement, exit check.
    pub fn update(
        &mut self,
        dt: f32,
        total_time: f32,
        input: &mut FrameInput,
        ui: &mut dyn DebugUi,
    ) -> FrameControl {
        self.track_fps(dt);
        self.elapsed = total_time;

        input.set_keyboard_capture(ui.wants_keyboard());
        input.set_mouse_capture(ui.wants_mouse());

        let change_camera = self.build_panel(ui);

        self.shuttle.tick(&mut self.roster);
        for spin in &self.spinners {
            spin.tick(dt, &mut self.roster);
        }

        if change_camera {
            self.next_camera();
        }
        if input.key_pressed(Key::C) {
            self.next_camera();
        }

        self.cameras[self.active_camera].update(dt, input);

        if input.key_down(Key::Escape) && !self.quit_requested {
            tracing::info!("exit requested");
            self.quit_requested = true;
        }
        if self.quit_requested {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    }

    /// Clear, draw the roster in order through the active camera, draw the
    /// UI overlay, present, then re-bind the targets the present unbound.
    /// Targets are re-bound even when the present reports a fault.
    pub fn draw<G: GraphicsContext>(
        &self,
        gfx: &mut G,
        overlay: G::Overlay,
    ) -> Result<(), RenderError> {
        gfx.clear_targets(CLEAR_COLOR, CLEAR_DEPTH);

        let camera = self.active_camera();
        for shape in &self.roster {
            shape.entity.draw(gfx, self.constant_buffer, camera)?;
        }

        gfx.draw_overlay(overlay);
        let presented = gfx.present();
        gfx.bind_render_targets();
        presented
    }

    /// Cycle to the next camera.
    pub fn next_camera(&mut self) {
        self.active_camera = (self.active_camera + 1) % CAMERA_COUNT;
        tracing::debug!(camera = self.active_camera, "active camera changed");
    }

    pub fn roster(&self) -> &[ShapeRecord] {
        &self.roster
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn active_camera_index(&self) -> usize {
        self.active_camera
    }

    pub fn active_camera(&self) -> &Camera {
        &self.cameras[self.active_camera]
    }

    pub fn shuttle_phase(&self) -> Phase {
        self.shuttle.phase()
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn track_fps(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let instant = 1.0 / dt;
        self.fps = if self.fps == 0.0 {
            instant
        } else {
            self.fps * 0.9 + instant * 0.1
        };
    }

    /// Declare the parameter panel. Returns whether "Change Camera" was
    /// clicked.
    fn build_panel(&mut self, ui: &mut dyn DebugUi) -> bool {
        let mut change_camera = false;
        let (fps, elapsed) = (self.fps, self.elapsed);
        let (width, height) = self.viewport;
        let active = self.active_camera;
        let camera = &self.cameras[active];
        let roster = &mut self.roster;
        let camera_section = roster.len();

        ui.window("Window", &mut |panel: &mut dyn DebugPanel| {
            panel.text(&format!("FPS: {fps:.1}"));
            panel.text(&format!("Window dimensions: {width} x {height}"));
            panel.text(&format!("Elapsed: {elapsed:.1}s"));

            for (id, shape) in roster.iter_mut().enumerate() {
                let label = shape.label.clone();
                panel.collapsing(&label, id, &mut |panel: &mut dyn DebugPanel| {
                    shape.edit(panel)
                });
            }

            panel.collapsing(
                "Camera Settings",
                camera_section,
                &mut |panel: &mut dyn DebugPanel| {
                    let p = camera.transform().position();
                    panel.text(&format!(
                        "Camera {} x: {:.3} y: {:.3} z: {:.3}",
                        active + 1,
                        p.x,
                        p.y,
                        p.z
                    ));
                    panel.text(&format!("FOV: {:.4} Radians", camera.fov()));
                    if panel.button("Change Camera") {
                        change_camera = true;
                    }
                },
            );
        });

        change_camera
    }
}

fn check_viewport(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::Surface(format!(
            "viewport must be non-empty, got {width}x{height}"
        )));
    }
    Ok(())
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{HeadlessUi, UiEdit};
    use glam::{Mat4, Vec4};
    use prism_input::InputState;
    use prism_render::{Command, RecordingContext};

    const DT: f32 = 1.0 / 60.0;

    fn scene() -> (Scene, RecordingContext) {
        let mut gfx = RecordingContext::new(1280, 720);
        let scene = Scene::init(&mut gfx, 1280, 720).unwrap();
        (scene, gfx)
    }

    fn tick(scene: &mut Scene, state: &mut InputState, ui: &mut HeadlessUi) -> FrameControl {
        let mut input = state.snapshot();
        scene.update(DT, 0.0, &mut input, ui)
    }

    fn near(actual: f32, expected: f32) -> bool {
        (actual - expected).abs() < 1e-5
    }

    #[test]
    fn init_builds_roster_and_cameras() {
        let (scene, gfx) = scene();
        assert_eq!(scene.roster().len(), 5);
        assert_eq!(scene.cameras().len(), CAMERA_COUNT);
        assert_eq!(scene.active_camera_index(), 0);
        assert_eq!(
            scene.active_camera().transform().position(),
            Vec3::new(10.0, 0.0, -10.0)
        );
        // 5 meshes * (vertex + index) + 1 constant buffer
        assert_eq!(gfx.buffer_count(), 11);
    }

    #[test]
    fn init_fails_when_device_is_out_of_memory() {
        let mut gfx = RecordingContext::new(1280, 720).with_memory_budget(256);
        assert!(matches!(
            Scene::init(&mut gfx, 1280, 720),
            Err(RenderError::BufferCreation { .. })
        ));
    }

    #[test]
    fn init_rejects_empty_viewport() {
        let mut gfx = RecordingContext::new(0, 720);
        assert!(matches!(
            Scene::init(&mut gfx, 0, 720),
            Err(RenderError::Surface(_))
        ));
        assert_eq!(gfx.buffer_count(), 0);
    }

    #[test]
    fn zero_resize_leaves_scene_untouched() {
        let (mut scene, mut gfx) = scene();
        let before: Vec<Mat4> = scene.cameras().iter().map(|c| c.projection()).collect();
        assert!(matches!(
            scene.on_resize(&mut gfx, 1280, 0),
            Err(RenderError::Surface(_))
        ));
        let after: Vec<Mat4> = scene.cameras().iter().map(|c| c.projection()).collect();
        assert_eq!(before, after);
        assert!(after.iter().all(|m| m.is_finite()));
        assert_eq!(scene.viewport(), (1280, 720));
        assert_eq!(gfx.size(), (1280, 720));
    }

    #[test]
    fn key_press_cycles_cameras_once_per_press() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();

        let mut seen = vec![scene.active_camera_index()];
        for _ in 0..3 {
            state.handle_key(Key::C, true);
            tick(&mut scene, &mut state, &mut ui);
            seen.push(scene.active_camera_index());
            // Held for a few frames: no further switching.
            for _ in 0..3 {
                tick(&mut scene, &mut state, &mut ui);
            }
            assert_eq!(*seen.last().unwrap(), scene.active_camera_index());
            state.handle_key(Key::C, false);
        }
        assert_eq!(seen, vec![0, 1, 2, 0]);
    }

    #[test]
    fn change_camera_button_cycles() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        ui.script("Window/Camera Settings#5/Change Camera", UiEdit::Click);
        tick(&mut scene, &mut state, &mut ui);
        assert_eq!(scene.active_camera_index(), 1);
        tick(&mut scene, &mut state, &mut ui);
        assert_eq!(scene.active_camera_index(), 1);
    }

    #[test]
    fn only_active_camera_moves() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        state.handle_key(Key::W, true);
        tick(&mut scene, &mut state, &mut ui);

        let cams = scene.cameras();
        assert!(cams[0].transform().position().z > -10.0);
        assert_eq!(cams[1].transform().position(), Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(cams[2].transform().position(), Vec3::new(-10.0, 0.0, -10.0));
    }

    #[test]
    fn ui_keyboard_capture_blocks_scene_keys() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        ui.capture_keyboard(true);
        state.handle_key(Key::C, true);
        state.handle_key(Key::Escape, true);
        assert_eq!(
            tick(&mut scene, &mut state, &mut ui),
            FrameControl::Continue
        );
        assert_eq!(scene.active_camera_index(), 0);
    }

    #[test]
    fn escape_requests_exit_for_good() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        assert_eq!(
            tick(&mut scene, &mut state, &mut ui),
            FrameControl::Continue
        );
        state.handle_key(Key::Escape, true);
        assert_eq!(tick(&mut scene, &mut state, &mut ui), FrameControl::Exit);
        state.handle_key(Key::Escape, false);
        assert_eq!(tick(&mut scene, &mut state, &mut ui), FrameControl::Exit);
        assert!(scene.quit_requested());
    }

    #[test]
    fn scripted_animation_runs_every_update() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        for _ in 0..10 {
            tick(&mut scene, &mut state, &mut ui);
        }
        let roster = scene.roster();
        assert!(near(roster[0].entity.transform().position().x, 0.01));
        assert!(near(roster[4].entity.transform().position().x, -0.01));
        assert!(roster[2].entity.transform().scale().x > 1.0);
        let roll = 10f32.to_radians() * DT * 10.0;
        assert!(near(roster[1].entity.transform().rotation().z, roll));
        assert!(near(roster[3].entity.transform().rotation().z, roll));
        assert_eq!(scene.shuttle_phase(), Phase::Advancing);
    }

    #[test]
    fn panel_edits_apply_immediately() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        ui.script(
            "Window/Diamond#2/Translation",
            UiEdit::Float3([0.0, 3.0, 0.0]),
        );
        ui.script("Window/Quad (copy)#4/Color", UiEdit::Color([0.0, 1.0, 0.0]));
        tick(&mut scene, &mut state, &mut ui);

        assert_eq!(scene.roster()[2].entity.transform().position().y, 3.0);
        assert_eq!(
            scene.roster()[4].entity.mesh().tint(),
            Vec4::new(0.0, 1.0, 0.0, 1.0)
        );
        assert_eq!(scene.roster()[1].entity.mesh().tint(), Vec4::ONE);
        assert_eq!(ui.pending(), 0);
    }

    #[test]
    fn panel_lists_every_shape_and_camera_info() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        tick(&mut scene, &mut state, &mut ui);
        let t = ui.transcript();
        let has = |line: &str| t.iter().any(|l| l == line);
        assert!(has("Window: Window dimensions: 1280 x 720"));
        assert!(has("Window/Triangle (copy)#3/Scale"));
        let camera_line = "Window/Camera Settings#5: Camera 1 x:";
        assert!(t.iter().any(|l| l.starts_with(camera_line)));
    }

    #[test]
    fn draw_issues_frame_in_roster_order() {
        let (mut scene, mut gfx) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        tick(&mut scene, &mut state, &mut ui);
        scene.draw(&mut gfx, ()).unwrap();

        let frame = gfx.last_frame();
        assert_eq!(
            frame.iter().find(|c| matches!(c, Command::Clear { .. })),
            Some(&Command::Clear {
                color: CLEAR_COLOR,
                depth: 1.0,
            })
        );
        assert!(matches!(frame[frame.len() - 2], Command::Overlay));
        assert!(matches!(frame[frame.len() - 1], Command::Present));
        assert!(gfx.targets_bound());

        let draws = gfx.last_frame_draws();
        assert_eq!(draws.len(), 5);
        for (draw, shape) in draws.iter().zip(scene.roster()) {
            assert_eq!(draw.vertex_buffer, shape.entity.mesh().vertex_buffer());
            assert_eq!(draw.index_buffer, shape.entity.mesh().index_buffer());
            assert_eq!(draw.index_count, shape.entity.mesh().index_count());
            let sent: ObjectConstants = bytemuck::pod_read_unaligned(&draw.constants);
            assert_eq!(
                Mat4::from_cols_array_2d(&sent.world),
                shape.entity.transform().world_matrix()
            );
            assert_eq!(
                Mat4::from_cols_array_2d(&sent.view),
                scene.active_camera().view()
            );
        }
    }

    #[test]
    fn consecutive_frames_rebind_targets() {
        let (scene, mut gfx) = scene();
        for _ in 0..3 {
            scene.draw(&mut gfx, ()).unwrap();
        }
        assert_eq!(gfx.presents(), 3);
        assert_eq!(gfx.commands(), [Command::BindTargets]);
    }

    #[test]
    fn draw_reports_frame_faults() {
        let (scene, mut gfx) = scene();
        scene.draw(&mut gfx, ()).unwrap();
        // A stray present leaves the next frame without render targets.
        gfx.present().unwrap();
        assert!(matches!(
            scene.draw(&mut gfx, ()),
            Err(RenderError::Present(_))
        ));
        assert!(gfx.last_frame_draws().is_empty());
        scene.draw(&mut gfx, ()).unwrap();
    }

    #[test]
    fn draw_propagates_constant_write_errors() {
        let mut gfx = RecordingContext::new(1280, 720);
        let scene = Scene::init(&mut gfx, 1280, 720).unwrap();
        let mut small = RecordingContext::new(1280, 720);
        // Same handles, but the constant buffer is too small for one object.
        build_roster(&mut small).unwrap();
        small.create_constant_buffer(16).unwrap();
        assert!(matches!(
            scene.draw(&mut small, ()),
            Err(RenderError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn draw_uses_active_camera() {
        let (mut scene, mut gfx) = scene();
        scene.next_camera();
        scene.draw(&mut gfx, ()).unwrap();
        let sent: ObjectConstants =
            bytemuck::pod_read_unaligned(&gfx.last_frame_draws()[0].constants);
        assert_eq!(
            Mat4::from_cols_array_2d(&sent.projection),
            scene.cameras()[1].projection()
        );
    }

    #[test]
    fn resize_updates_every_camera_projection() {
        let (mut scene, mut gfx) = scene();
        let before: Vec<Mat4> = scene.cameras().iter().map(|c| c.projection()).collect();
        scene.on_resize(&mut gfx, 800, 800).unwrap();
        for (camera, old) in scene.cameras().iter().zip(before) {
            assert_eq!(camera.aspect_ratio(), 1.0);
            assert_ne!(camera.projection(), old);
        }
        assert_eq!(gfx.size(), (800, 800));
        assert_eq!(scene.viewport(), (800, 800));
    }

    #[test]
    fn fps_is_smoothed() {
        let (mut scene, _) = scene();
        let mut state = InputState::new();
        let mut ui = HeadlessUi::new();
        tick(&mut scene, &mut state, &mut ui);
        assert!((scene.fps() - 60.0).abs() < 1e-3);
        let mut input = state.snapshot();
        scene.update(1.0 / 30.0, 0.0, &mut input, &mut ui);
        assert!(scene.fps() < 60.0 && scene.fps() > 30.0);
    }
}
