/// Tessellated egui output for one frame, drawn on top of the scene.
pub struct EguiFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl EguiFrame {
    pub fn new(
        paint_jobs: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        pixels_per_point: f32,
    ) -> Self {
        Self {
            paint_jobs,
            textures_delta,
            pixels_per_point,
        }
    }
}
