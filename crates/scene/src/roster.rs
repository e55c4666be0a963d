use crate::entity::Entity;
use crate::mesh::Mesh;
use crate::shapes;
use crate::ui::DebugPanel;
use glam::{Vec3, Vec4};
use prism_render::{GraphicsContext, RenderError, Vertex};
use std::rc::Rc;

/// Values held by a shape's editor widgets between frames.
///
/// A widget change applies the whole widget value to the transform
/// (move by it, rotate by it, scale by it); the values are not targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEditor {
    pub translation: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub tint: [f32; 4],
}

impl Default for TransformEditor {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            tint: [1.0; 4],
        }
    }
}

/// One entry of the scene roster: an entity and its editor state.
#[derive(Debug, Clone)]
pub struct ShapeRecord {
    pub label: String,
    pub entity: Entity,
    pub editor: TransformEditor,
}

impl ShapeRecord {
    pub fn new(label: impl Into<String>, entity: Entity) -> Self {
        Self {
            label: label.into(),
            entity,
            editor: TransformEditor::default(),
        }
    }

    /// Declare this shape's editor widgets and apply any change immediately.
    pub fn edit(&mut self, panel: &mut dyn DebugPanel) {
        let editor = &mut self.editor;
        let transform = self.entity.transform_mut();
        if panel.drag_float3("Translation", &mut editor.translation) {
            transform.move_absolute(Vec3::from_array(editor.translation));
        }
        if panel.drag_float3("Rotation", &mut editor.rotation) {
            transform.rotate(Vec3::from_array(editor.rotation));
        }
        if panel.drag_float3("Scale", &mut editor.scale) {
            transform.scale_by(Vec3::from_array(editor.scale));
        }
        if panel.color_edit3("Color", &mut editor.tint) {
            self.entity.mesh().set_tint(Vec4::from_array(editor.tint));
        }
    }
}

type Geometry = fn() -> (Vec<Vertex>, Vec<u32>);

const ROSTER: [(&str, Geometry); 5] = [
    ("Triangle", shapes::triangle),
    ("Quad", shapes::quad),
    ("Diamond", shapes::diamond),
    ("Triangle (copy)", shapes::triangle),
    ("Quad (copy)", shapes::quad),
];

/// Build the fixed demo roster. Each entry gets its own mesh instance, so
/// tint edits stay local to one shape.
pub fn build_roster<G: GraphicsContext>(gfx: &mut G) -> Result<Vec<ShapeRecord>, RenderError> {
    let mut roster = Vec::with_capacity(ROSTER.len());
    for (label, geometry) in ROSTER {
        let (vertices, indices) = geometry();
        let mesh = Rc::new(Mesh::new(gfx, &vertices, &indices)?);
        roster.push(ShapeRecord::new(label, Entity::new(mesh)));
    }
    Ok(roster)
}
