use crate::error::RenderError;
use crate::types::Vertex;
use serde::{Deserialize, Serialize};

/// Opaque id of a buffer owned by a graphics context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BufferHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferKind {
    Vertex,
    Index,
    Constant,
}

/// The device/context pair the scene renders through.
///
/// Calls form one ordered command stream. State-setting calls (`set_*`,
/// `bind_*`) and `draw_indexed` cannot fail on their own; an implementation
/// reports a bad handle or an incomplete binding from [`present`], which is
/// where the frame is actually executed.
///
/// [`present`]: GraphicsContext::present
pub trait GraphicsContext {
    /// Draw data produced by the debug UI for this frame.
    type Overlay;

    /// Upload an immutable vertex buffer.
    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> Result<BufferHandle, RenderError>;

    /// Upload an immutable 32-bit index buffer.
    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<BufferHandle, RenderError>;

    /// Allocate a CPU-writable constant buffer of `size` bytes.
    fn create_constant_buffer(&mut self, size: usize) -> Result<BufferHandle, RenderError>;

    /// Replace the constant buffer's contents. Earlier contents are
    /// discarded; draws already issued keep the data they were bound with.
    fn write_discard(&mut self, buffer: BufferHandle, data: &[u8]) -> Result<(), RenderError>;

    /// Bind a constant buffer to the vertex stage at `slot`.
    fn bind_vertex_constants(&mut self, slot: u32, buffer: BufferHandle);

    fn set_vertex_buffer(&mut self, buffer: BufferHandle);

    fn set_index_buffer(&mut self, buffer: BufferHandle);

    /// Indexed triangle-list draw with the currently bound buffers.
    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32);

    fn clear_targets(&mut self, color: [f32; 4], depth: f32);

    /// Queue the debug UI's draw data on top of the scene.
    fn draw_overlay(&mut self, overlay: Self::Overlay);

    /// Execute the frame and flip the swap chain. Render targets are unbound
    /// afterwards.
    fn present(&mut self) -> Result<(), RenderError>;

    /// Re-bind the back buffer and depth buffer as the output targets.
    fn bind_render_targets(&mut self);

    /// Resize the back buffers.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Whether presenting without vsync may tear.
    fn supports_tearing(&self) -> bool;
}
