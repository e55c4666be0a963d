use crate::camera::Camera;
use crate::mesh::Mesh;
use prism_common::Transform;
use prism_render::{BufferHandle, GraphicsContext, ObjectConstants, RenderError};
use std::rc::Rc;

/// A drawable object: a shared mesh placed by its own transform.
#[derive(Debug, Clone)]
pub struct Entity {
    mesh: Rc<Mesh>,
    transform: Transform,
}

impl Entity {
    pub fn new(mesh: Rc<Mesh>) -> Self {
        Self {
            mesh,
            transform: Transform::default(),
        }
    }

    pub fn mesh(&self) -> &Rc<Mesh> {
        &self.mesh
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Constant payload for drawing this entity through `camera`.
    pub fn constants(&self, camera: &Camera) -> ObjectConstants {
        ObjectConstants::new(
            self.transform.world_matrix(),
            camera.view(),
            camera.projection(),
            self.mesh.tint(),
        )
    }

    /// Upload this entity's constants into `constant_buffer`, bind it to the
    /// vertex stage and draw the mesh.
    ///
    /// The buffer is discard-written, so its previous contents are gone as
    /// soon as this returns. Callers draw entities one after another.
    pub fn draw<G: GraphicsContext>(
        &self,
        gfx: &mut G,
        constant_buffer: BufferHandle,
        camera: &Camera,
    ) -> Result<(), RenderError> {
        let constants = self.constants(camera);
        gfx.write_discard(constant_buffer, bytemuck::bytes_of(&constants))?;
        gfx.bind_vertex_constants(0, constant_buffer);
        self.mesh.draw(gfx);
        Ok(())
    }
}
