//! egui rendition of the scene's debug UI.

use prism_scene::{DebugPanel, DebugUi};

/// Debug UI for one egui pass. Capture flags are the ones egui settled on
/// at the end of the previous frame.
pub struct EguiDebugUi<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiDebugUi<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl DebugUi for EguiDebugUi<'_> {
    fn wants_keyboard(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    fn wants_mouse(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    fn window(&mut self, title: &str, body: &mut dyn FnMut(&mut dyn DebugPanel)) {
        egui::Window::new(title)
            .default_width(300.0)
            .show(self.ctx, |ui| body(&mut EguiPanel { ui }));
    }
}

struct EguiPanel<'a> {
    ui: &'a mut egui::Ui,
}

impl DebugPanel for EguiPanel<'_> {
    fn text(&mut self, text: &str) {
        self.ui.label(text);
    }

    fn collapsing(&mut self, label: &str, id: usize, body: &mut dyn FnMut(&mut dyn DebugPanel)) {
        egui::CollapsingHeader::new(label)
            .id_salt(id)
            .show(self.ui, |ui| body(&mut EguiPanel { ui }));
    }

    fn drag_float3(&mut self, label: &str, value: &mut [f32; 3]) -> bool {
        self.ui
            .horizontal(|ui| {
                let mut changed = false;
                for component in value.iter_mut() {
                    changed |= ui
                        .add(egui::DragValue::new(component).speed(0.01))
                        .changed();
                }
                ui.label(label);
                changed
            })
            .inner
    }

    fn color_edit3(&mut self, label: &str, value: &mut [f32; 4]) -> bool {
        let mut rgb = [value[0], value[1], value[2]];
        let changed = self
            .ui
            .horizontal(|ui| {
                let changed = ui.color_edit_button_rgb(&mut rgb).changed();
                ui.label(label);
                changed
            })
            .inner;
        if changed {
            value[..3].copy_from_slice(&rgb);
        }
        changed
    }

    fn button(&mut self, label: &str) -> bool {
        self.ui.button(label).clicked()
    }
}
