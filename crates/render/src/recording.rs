use crate::context::{BufferHandle, BufferKind, GraphicsContext};
use crate::error::RenderError;
use crate::types::Vertex;
use serde::{Deserialize, Serialize};

/// One call made against a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    CreateBuffer {
        handle: BufferHandle,
        kind: BufferKind,
        bytes: usize,
    },
    WriteConstants {
        handle: BufferHandle,
        bytes: usize,
    },
    BindConstants {
        slot: u32,
        handle: BufferHandle,
    },
    SetVertexBuffer(BufferHandle),
    SetIndexBuffer(BufferHandle),
    DrawIndexed {
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    },
    Clear {
        color: [f32; 4],
        depth: f32,
    },
    Overlay,
    Present,
    BindTargets,
    Resize {
        width: u32,
        height: u32,
    },
}

/// What a single draw saw when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSnapshot {
    pub index_count: u32,
    pub vertex_buffer: BufferHandle,
    pub index_buffer: BufferHandle,
    /// Bytes of the constant buffer bound at slot 0, as of this draw.
    pub constants: Vec<u8>,
}

#[derive(Debug)]
struct RecordedBuffer {
    kind: BufferKind,
    bytes: usize,
    /// Vertex count for vertex buffers, index count for index buffers.
    elements: usize,
    max_index: u32,
    contents: Vec<u8>,
}

/// GPU-free graphics context.
///
/// Validates every call the way a debug device layer would and keeps a log
/// of the commands issued in the current frame. `present` closes the frame:
/// it fails if any draw in the frame was malformed, then moves the log to
/// [`last_frame`](Self::last_frame).
#[derive(Debug)]
pub struct RecordingContext {
    width: u32,
    height: u32,
    tearing: bool,
    memory_budget: Option<usize>,
    allocated: usize,
    buffers: Vec<RecordedBuffer>,
    vertex_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
    constants: Option<BufferHandle>,
    targets_bound: bool,
    commands: Vec<Command>,
    draws: Vec<DrawSnapshot>,
    faults: Vec<String>,
    last_frame: Vec<Command>,
    last_draws: Vec<DrawSnapshot>,
    presents: u64,
}

impl RecordingContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tearing: false,
            memory_budget: None,
            allocated: 0,
            buffers: Vec::new(),
            vertex_buffer: None,
            index_buffer: None,
            constants: None,
            targets_bound: true,
            commands: Vec::new(),
            draws: Vec::new(),
            faults: Vec::new(),
            last_frame: Vec::new(),
            last_draws: Vec::new(),
            presents: 0,
        }
    }

    /// Reject buffer creation once `bytes` have been allocated in total,
    /// the way a device runs out of memory.
    pub fn with_memory_budget(mut self, bytes: usize) -> Self {
        self.memory_budget = Some(bytes);
        self
    }

    pub fn with_tearing(mut self, tearing: bool) -> Self {
        self.tearing = tearing;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Commands issued since the last present.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Draws issued since the last present.
    pub fn draws(&self) -> &[DrawSnapshot] {
        &self.draws
    }

    /// Commands of the most recently presented frame.
    pub fn last_frame(&self) -> &[Command] {
        &self.last_frame
    }

    pub fn last_frame_draws(&self) -> &[DrawSnapshot] {
        &self.last_draws
    }

    pub fn presents(&self) -> u64 {
        self.presents
    }

    pub fn targets_bound(&self) -> bool {
        self.targets_bound
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.allocated
    }

    fn allocate(
        &mut self,
        kind: BufferKind,
        bytes: usize,
        elements: usize,
        max_index: u32,
        contents: Vec<u8>,
    ) -> Result<BufferHandle, RenderError> {
        if bytes == 0 {
            return Err(RenderError::EmptyBuffer(kind));
        }
        if let Some(budget) = self.memory_budget {
            if self.allocated + bytes > budget {
                return Err(RenderError::BufferCreation {
                    kind,
                    reason: format!(
                        "out of memory: {bytes} bytes requested, {} of {budget} in use",
                        self.allocated
                    ),
                });
            }
        }
        let handle = BufferHandle(self.buffers.len() as u32);
        self.buffers.push(RecordedBuffer {
            kind,
            bytes,
            elements,
            max_index,
            contents,
        });
        self.allocated += bytes;
        self.commands.push(Command::CreateBuffer {
            handle,
            kind,
            bytes,
        });
        Ok(handle)
    }

    fn lookup(
        &self,
        handle: BufferHandle,
        expected: BufferKind,
    ) -> Result<&RecordedBuffer, String> {
        let buffer = self
            .buffers
            .get(handle.0 as usize)
            .ok_or_else(|| RenderError::UnknownBuffer(handle).to_string())?;
        if buffer.kind != expected {
            return Err(RenderError::WrongBufferKind {
                handle,
                expected,
                actual: buffer.kind,
            }
            .to_string());
        }
        Ok(buffer)
    }

    fn check_draw(
        &self,
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    ) -> Result<DrawSnapshot, String> {
        if !self.targets_bound {
            return Err("draw issued with no render targets bound".into());
        }
        let vb_handle = self.vertex_buffer.ok_or("no vertex buffer bound")?;
        let ib_handle = self.index_buffer.ok_or("no index buffer bound")?;
        let cb_handle = self.constants.ok_or("no constants bound")?;
        let vb = self.lookup(vb_handle, BufferKind::Vertex)?;
        let ib = self.lookup(ib_handle, BufferKind::Index)?;
        let cb = self.lookup(cb_handle, BufferKind::Constant)?;

        let end = first_index as usize + index_count as usize;
        if end > ib.elements {
            return Err(format!(
                "draw reads indices {first_index}..{end} of a {}-index buffer",
                ib.elements
            ));
        }
        let highest = ib.max_index as i64 + base_vertex as i64;
        if highest < 0 || highest >= vb.elements as i64 {
            return Err(format!(
                "index {highest} out of range for {} vertices",
                vb.elements
            ));
        }
        Ok(DrawSnapshot {
            index_count,
            vertex_buffer: vb_handle,
            index_buffer: ib_handle,
            constants: cb.contents.clone(),
        })
    }
}

impl GraphicsContext for RecordingContext {
    type Overlay = ();

    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> Result<BufferHandle, RenderError> {
        let bytes = std::mem::size_of_val(vertices);
        self.allocate(BufferKind::Vertex, bytes, vertices.len(), 0, Vec::new())
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<BufferHandle, RenderError> {
        let bytes = std::mem::size_of_val(indices);
        let max_index = indices.iter().copied().max().unwrap_or(0);
        let count = indices.len();
        self.allocate(BufferKind::Index, bytes, count, max_index, Vec::new())
    }

    fn create_constant_buffer(&mut self, size: usize) -> Result<BufferHandle, RenderError> {
        self.allocate(BufferKind::Constant, size, 0, 0, vec![0; size])
    }

    fn write_discard(&mut self, buffer: BufferHandle, data: &[u8]) -> Result<(), RenderError> {
        let target = self
            .buffers
            .get_mut(buffer.0 as usize)
            .ok_or(RenderError::UnknownBuffer(buffer))?;
        if target.kind != BufferKind::Constant {
            return Err(RenderError::WrongBufferKind {
                handle: buffer,
                expected: BufferKind::Constant,
                actual: target.kind,
            });
        }
        if data.len() > target.bytes {
            return Err(RenderError::PayloadTooLarge {
                len: data.len(),
                capacity: target.bytes,
            });
        }
        target.contents.clear();
        target.contents.extend_from_slice(data);
        target.contents.resize(target.bytes, 0);
        self.commands.push(Command::WriteConstants {
            handle: buffer,
            bytes: data.len(),
        });
        Ok(())
    }

    fn bind_vertex_constants(&mut self, slot: u32, buffer: BufferHandle) {
        if slot == 0 {
            self.constants = Some(buffer);
        }
        self.commands.push(Command::BindConstants {
            slot,
            handle: buffer,
        });
    }

    fn set_vertex_buffer(&mut self, buffer: BufferHandle) {
        self.vertex_buffer = Some(buffer);
        self.commands.push(Command::SetVertexBuffer(buffer));
    }

    fn set_index_buffer(&mut self, buffer: BufferHandle) {
        self.index_buffer = Some(buffer);
        self.commands.push(Command::SetIndexBuffer(buffer));
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32) {
        match self.check_draw(index_count, first_index, base_vertex) {
            Ok(snapshot) => self.draws.push(snapshot),
            Err(fault) => {
                tracing::warn!("recorded invalid draw: {fault}");
                self.faults.push(fault);
            }
        }
        self.commands.push(Command::DrawIndexed {
            index_count,
            first_index,
            base_vertex,
        });
    }

    fn clear_targets(&mut self, color: [f32; 4], depth: f32) {
        if !self.targets_bound {
            let fault = "clear issued with no render targets bound";
            self.faults.push(fault.into());
        }
        self.commands.push(Command::Clear { color, depth });
    }

    fn draw_overlay(&mut self, _overlay: ()) {
        self.commands.push(Command::Overlay);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.commands.push(Command::Present);
        self.presents += 1;
        self.targets_bound = false;
        self.last_frame = std::mem::take(&mut self.commands);
        self.last_draws = std::mem::take(&mut self.draws);
        if self.faults.is_empty() {
            Ok(())
        } else {
            let faults = std::mem::take(&mut self.faults);
            Err(RenderError::Present(faults.join("; ")))
        }
    }

    fn bind_render_targets(&mut self) {
        self.targets_bound = true;
        self.commands.push(Command::BindTargets);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Surface(format!(
                "cannot resize back buffers to {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        self.commands.push(Command::Resize { width, height });
        Ok(())
    }

    fn supports_tearing(&self) -> bool {
        self.tearing
    }
}
