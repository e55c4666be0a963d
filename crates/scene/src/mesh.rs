use glam::Vec4;
use prism_render::{BufferHandle, GraphicsContext, RenderError, Vertex};
use std::cell::Cell;

/// Static geometry uploaded once, plus a tint multiplier.
///
/// Geometry is immutable after construction and can be shared between
/// entities through `Rc<Mesh>`. The tint is not: it lives in a `Cell`, so
/// [`set_tint`](Mesh::set_tint) through any handle changes the color of
/// every entity drawing this mesh.
#[derive(Debug)]
pub struct Mesh {
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    vertex_count: u32,
    index_count: u32,
    tint: Cell<Vec4>,
}

impl Mesh {
    /// Validate the triangle list and upload it.
    pub fn new<G: GraphicsContext>(
        gfx: &mut G,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<Self, RenderError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(RenderError::InvalidGeometry(
                "mesh needs at least one vertex and one triangle".into(),
            ));
        }
        if indices.len() % 3 != 0 {
            return Err(RenderError::InvalidGeometry(format!(
                "triangle list has {} indices, not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(RenderError::InvalidGeometry(format!(
                "index {bad} out of range for {} vertices",
                vertices.len()
            )));
        }

        let vertex_buffer = gfx.create_vertex_buffer(vertices)?;
        let index_buffer = gfx.create_index_buffer(indices)?;
        tracing::debug!(
            vertices = vertices.len(),
            indices = indices.len(),
            "mesh uploaded"
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            vertex_count: vertices.len() as u32,
            index_count: indices.len() as u32,
            tint: Cell::new(Vec4::ONE),
        })
    }

    /// Bind this mesh's buffers and issue one indexed draw over all indices.
    pub fn draw<G: GraphicsContext>(&self, gfx: &mut G) {
        gfx.set_vertex_buffer(self.vertex_buffer);
        gfx.set_index_buffer(self.index_buffer);
        gfx.draw_indexed(self.index_count, 0, 0);
    }

    pub fn vertex_buffer(&self) -> BufferHandle {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> BufferHandle {
        self.index_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn tint(&self) -> Vec4 {
        self.tint.get()
    }

    /// Not validated; the fragment stage saturates the tinted color.
    pub fn set_tint(&self, tint: Vec4) {
        self.tint.set(tint);
    }
}
