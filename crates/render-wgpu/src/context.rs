use crate::overlay::EguiFrame;
use crate::ring::{ConstantRing, align_up};
use crate::shaders;
use prism_render::{BufferHandle, BufferKind, GraphicsContext, RenderError, Vertex};
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Bytes the object shader reads from its uniform binding.
const CONSTANTS_BINDING_SIZE: u64 = std::mem::size_of::<prism_render::ObjectConstants>() as u64;
const INITIAL_RING_CAPACITY: u64 = 16 * 1024;

/// Present mode for the requested sync behaviour.
///
/// Vsync always uses `AutoVsync`. Without vsync, `Immediate` (tearing) is
/// preferred when the surface offers it.
pub fn select_present_mode(vsync: bool, available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else if available.contains(&wgpu::PresentMode::Immediate) {
        wgpu::PresentMode::Immediate
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

enum GpuBuffer {
    Vertex {
        buffer: wgpu::Buffer,
    },
    Index {
        buffer: wgpu::Buffer,
        count: u32,
    },
    /// Backed by the constant ring; `offset` is the slot of the latest write
    /// this frame.
    Constant {
        capacity: usize,
        slot_size: u64,
        offset: Option<u32>,
    },
}

impl GpuBuffer {
    fn kind(&self) -> BufferKind {
        match self {
            GpuBuffer::Vertex { .. } => BufferKind::Vertex,
            GpuBuffer::Index { .. } => BufferKind::Index,
            GpuBuffer::Constant { .. } => BufferKind::Constant,
        }
    }
}

/// A recorded call, replayed at present.
#[derive(Debug, Clone, Copy)]
enum Op {
    Clear {
        color: [f32; 4],
        depth: f32,
    },
    Constants {
        offset: u32,
    },
    VertexBuffer(BufferHandle),
    IndexBuffer(BufferHandle),
    Draw {
        index_count: u32,
        first_index: u32,
        base_vertex: i32,
    },
}

/// Graphics context backed by a wgpu device and window surface.
pub struct WgpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    constants_layout: wgpu::BindGroupLayout,
    constants_buffer: wgpu::Buffer,
    constants_bind_group: wgpu::BindGroup,
    ring: ConstantRing,
    depth_view: wgpu::TextureView,
    egui_renderer: egui_wgpu::Renderer,
    buffers: Vec<GpuBuffer>,
    ops: Vec<Op>,
    overlay: Option<EguiFrame>,
    targets_bound: bool,
    supports_tearing: bool,
    faults: Vec<String>,
}

impl WgpuContext {
    /// Create the device, surface and pipeline for `target`, typically an
    /// `Arc<winit::window::Window>`.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::Adapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("prism_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        // Clear colors and vertex colors are authored as display values.
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let supports_tearing = caps.present_modes.contains(&wgpu::PresentMode::Immediate);
        let present_mode = select_present_mode(vsync, &caps.present_modes);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let constants_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_constants_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(CONSTANTS_BINDING_SIZE),
                },
                count: None,
            }],
        });
        let (constants_buffer, constants_bind_group) =
            create_constant_ring(&device, &constants_layout, INITIAL_RING_CAPACITY);
        let ring = ConstantRing::new(device.limits().min_uniform_buffer_offset_alignment);

        let pipeline = create_object_pipeline(&device, &constants_layout, format);
        let depth_view = create_depth_texture(&device, config.width, config.height);
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            adapter = %adapter.get_info().name,
            ?format,
            ?present_mode,
            supports_tearing,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            constants_layout,
            constants_buffer,
            constants_bind_group,
            ring,
            depth_view,
            egui_renderer,
            buffers: Vec::new(),
            ops: Vec::new(),
            overlay: None,
            targets_bound: true,
            supports_tearing,
            faults: Vec::new(),
        })
    }

    fn insert(&mut self, buffer: GpuBuffer) -> BufferHandle {
        let handle = BufferHandle(self.buffers.len() as u32);
        self.buffers.push(buffer);
        handle
    }

    /// Create an initialized buffer, turning device out-of-memory and
    /// validation errors into `BufferCreation`.
    fn create_checked(
        &self,
        kind: BufferKind,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> Result<wgpu::Buffer, RenderError> {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            });
        let validation = pollster::block_on(self.device.pop_error_scope());
        let out_of_memory = pollster::block_on(self.device.pop_error_scope());
        match validation.or(out_of_memory) {
            Some(err) => Err(RenderError::BufferCreation {
                kind,
                reason: err.to_string(),
            }),
            None => Ok(buffer),
        }
    }

    fn geometry(
        &self,
        handle: Option<BufferHandle>,
        expected: BufferKind,
    ) -> Result<(&wgpu::Buffer, u32), String> {
        let handle = handle.ok_or_else(|| format!("draw issued with no {expected:?} buffer"))?;
        match self.buffers.get(handle.0 as usize) {
            Some(GpuBuffer::Vertex { buffer }) if expected == BufferKind::Vertex => Ok((buffer, 0)),
            Some(GpuBuffer::Index { buffer, count }) if expected == BufferKind::Index => {
                Ok((buffer, *count))
            }
            Some(other) => Err(RenderError::WrongBufferKind {
                handle,
                expected,
                actual: other.kind(),
            }
            .to_string()),
            None => Err(RenderError::UnknownBuffer(handle).to_string()),
        }
    }

    /// Upload this frame's constant slots, growing the ring if needed.
    fn upload_constants(&mut self) {
        if self.ring.is_empty() {
            return;
        }
        let required = align_up(self.ring.bytes().len() as u64, wgpu::COPY_BUFFER_ALIGNMENT);
        if required > self.constants_buffer.size() {
            let capacity = required.next_power_of_two();
            tracing::debug!(capacity, "growing constant ring");
            let (buffer, bind_group) =
                create_constant_ring(&self.device, &self.constants_layout, capacity);
            self.constants_buffer = buffer;
            self.constants_bind_group = bind_group;
        }
        let staged = self.ring.bytes();
        self.queue.write_buffer(&self.constants_buffer, 0, staged);
    }

    /// Replay the recorded ops. A clear starts a new pass; draws before any
    /// clear load what the target already holds.
    fn encode_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        ops: &[Op],
    ) -> Vec<String> {
        let mut faults = Vec::new();
        let mut pass: Option<wgpu::RenderPass<'static>> = None;
        let mut constants = None;
        let mut vertex = None;
        let mut index = None;

        for op in ops {
            match *op {
                Op::Clear { color, depth } => {
                    drop(pass.take());
                    pass = Some(begin_scene_pass(
                        encoder,
                        view,
                        &self.depth_view,
                        Some((color, depth)),
                    ));
                }
                Op::Constants { offset } => constants = Some(offset),
                Op::VertexBuffer(handle) => vertex = Some(handle),
                Op::IndexBuffer(handle) => index = Some(handle),
                Op::Draw {
                    index_count,
                    first_index,
                    base_vertex,
                } => {
                    let Some(offset) = constants else {
                        faults.push("draw issued with no constants bound".to_owned());
                        continue;
                    };
                    let (vertex_buffer, index_buffer, available) = match (
                        self.geometry(vertex, BufferKind::Vertex),
                        self.geometry(index, BufferKind::Index),
                    ) {
                        (Ok((vb, _)), Ok((ib, count))) => (vb, ib, count),
                        (Err(fault), _) | (_, Err(fault)) => {
                            faults.push(fault);
                            continue;
                        }
                    };
                    let end = first_index.saturating_add(index_count);
                    if end > available {
                        faults.push(format!(
                            "draw reads indices {first_index}..{end} of a {available}-index buffer"
                        ));
                        continue;
                    }

                    let pass = pass.get_or_insert_with(|| {
                        begin_scene_pass(encoder, view, &self.depth_view, None)
                    });
                    pass.set_pipeline(&self.pipeline);
                    pass.set_bind_group(0, &self.constants_bind_group, &[offset]);
                    pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                    pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(first_index..end, base_vertex, 0..1);
                }
            }
        }
        faults
    }

    fn encode_overlay(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &EguiFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: frame.pixels_per_point,
        };
        for (id, delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let callbacks = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &frame.paint_jobs,
            &screen,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &frame.paint_jobs, &screen);
        }
        for id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        callbacks
    }

    /// Keep egui's texture atlas in sync for a frame that is not drawn.
    fn skip_overlay(&mut self, frame: Option<EguiFrame>) {
        let Some(frame) = frame else {
            return;
        };
        for (id, delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        for id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    fn render_frame(&mut self, ops: &[Op], overlay: Option<EguiFrame>) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                self.skip_overlay(overlay);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::Surface(
                    "out of memory acquiring surface texture".into(),
                ));
            }
            Err(e) => {
                tracing::warn!("skipping frame: {e}");
                self.skip_overlay(overlay);
                return Ok(());
            }
        };

        self.upload_constants();

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        let faults = self.encode_scene(&mut encoder, &view, ops);
        self.faults.extend(faults);

        let callbacks = match &overlay {
            Some(frame) => self.encode_overlay(&mut encoder, &view, frame),
            None => Vec::new(),
        };

        let frame = encoder.finish();
        let buffers = callbacks.into_iter().chain(std::iter::once(frame));
        self.queue.submit(buffers);
        output.present();
        Ok(())
    }
}

impl GraphicsContext for WgpuContext {
    type Overlay = EguiFrame;

    fn create_vertex_buffer(&mut self, vertices: &[Vertex]) -> Result<BufferHandle, RenderError> {
        if vertices.is_empty() {
            return Err(RenderError::EmptyBuffer(BufferKind::Vertex));
        }
        let buffer = self.create_checked(
            BufferKind::Vertex,
            "vertex_buffer",
            bytemuck::cast_slice(vertices),
            wgpu::BufferUsages::VERTEX,
        )?;
        Ok(self.insert(GpuBuffer::Vertex { buffer }))
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<BufferHandle, RenderError> {
        if indices.is_empty() {
            return Err(RenderError::EmptyBuffer(BufferKind::Index));
        }
        let buffer = self.create_checked(
            BufferKind::Index,
            "index_buffer",
            bytemuck::cast_slice(indices),
            wgpu::BufferUsages::INDEX,
        )?;
        Ok(self.insert(GpuBuffer::Index {
            buffer,
            count: indices.len() as u32,
        }))
    }

    fn create_constant_buffer(&mut self, size: usize) -> Result<BufferHandle, RenderError> {
        if size == 0 {
            return Err(RenderError::EmptyBuffer(BufferKind::Constant));
        }
        let slot_size = align_up((size as u64).max(CONSTANTS_BINDING_SIZE), 16);
        Ok(self.insert(GpuBuffer::Constant {
            capacity: size,
            slot_size,
            offset: None,
        }))
    }

    fn write_discard(&mut self, buffer: BufferHandle, data: &[u8]) -> Result<(), RenderError> {
        let (capacity, slot_size) = match self.buffers.get(buffer.0 as usize) {
            Some(GpuBuffer::Constant {
                capacity,
                slot_size,
                ..
            }) => (*capacity, *slot_size),
            Some(other) => {
                return Err(RenderError::WrongBufferKind {
                    handle: buffer,
                    expected: BufferKind::Constant,
                    actual: other.kind(),
                });
            }
            None => return Err(RenderError::UnknownBuffer(buffer)),
        };
        if data.len() > capacity {
            return Err(RenderError::PayloadTooLarge {
                len: data.len(),
                capacity,
            });
        }
        let slot = u32::try_from(self.ring.push(data, slot_size)).map_err(|_| {
            RenderError::BufferCreation {
                kind: BufferKind::Constant,
                reason: "constant ring exceeds dynamic offset range".into(),
            }
        })?;
        if let Some(GpuBuffer::Constant { offset, .. }) = self.buffers.get_mut(buffer.0 as usize) {
            *offset = Some(slot);
        }
        Ok(())
    }

    fn bind_vertex_constants(&mut self, slot: u32, buffer: BufferHandle) {
        if slot != 0 {
            let fault = format!("constant slot {slot} is not used by the object shader");
            self.faults.push(fault);
            return;
        }
        let fault = match self.buffers.get(buffer.0 as usize) {
            Some(GpuBuffer::Constant {
                offset: Some(offset),
                ..
            }) => {
                self.ops.push(Op::Constants { offset: *offset });
                return;
            }
            Some(GpuBuffer::Constant { offset: None, .. }) => {
                format!("constant buffer {buffer:?} bound before any write")
            }
            Some(other) => RenderError::WrongBufferKind {
                handle: buffer,
                expected: BufferKind::Constant,
                actual: other.kind(),
            }
            .to_string(),
            None => RenderError::UnknownBuffer(buffer).to_string(),
        };
        self.faults.push(fault);
    }

    fn set_vertex_buffer(&mut self, buffer: BufferHandle) {
        self.ops.push(Op::VertexBuffer(buffer));
    }

    fn set_index_buffer(&mut self, buffer: BufferHandle) {
        self.ops.push(Op::IndexBuffer(buffer));
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32) {
        if !self.targets_bound {
            let fault = "draw issued with no render targets bound";
            self.faults.push(fault.into());
            return;
        }
        self.ops.push(Op::Draw {
            index_count,
            first_index,
            base_vertex,
        });
    }

    fn clear_targets(&mut self, color: [f32; 4], depth: f32) {
        if !self.targets_bound {
            let fault = "clear issued with no render targets bound";
            self.faults.push(fault.into());
            return;
        }
        self.ops.push(Op::Clear { color, depth });
    }

    fn draw_overlay(&mut self, overlay: EguiFrame) {
        self.overlay = Some(overlay);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let ops = std::mem::take(&mut self.ops);
        let overlay = self.overlay.take();
        self.targets_bound = false;

        let result = self.render_frame(&ops, overlay);

        self.ring.reset();
        for buffer in &mut self.buffers {
            if let GpuBuffer::Constant { offset, .. } = buffer {
                *offset = None;
            }
        }
        result?;

        let faults = std::mem::take(&mut self.faults);
        if faults.is_empty() {
            Ok(())
        } else {
            Err(RenderError::Present(faults.join("; ")))
        }
    }

    fn bind_render_targets(&mut self) {
        self.targets_bound = true;
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Surface(format!(
                "cannot resize back buffers to {width}x{height}"
            )));
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_texture(&self.device, width, height);
        Ok(())
    }

    fn supports_tearing(&self) -> bool {
        self.supports_tearing
    }
}

fn begin_scene_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
    clear: Option<([f32; 4], f32)>,
) -> wgpu::RenderPass<'static> {
    let (color_load, depth_load) = match clear {
        Some(([r, g, b, a], depth)) => (
            wgpu::LoadOp::Clear(wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: f64::from(a),
            }),
            wgpu::LoadOp::Clear(depth),
        ),
        None => (wgpu::LoadOp::Load, wgpu::LoadOp::Load),
    };
    encoder
        .begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        })
        .forget_lifetime()
}

fn create_constant_ring(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("constant_ring"),
        size: capacity,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("constant_ring_bind_group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(CONSTANTS_BINDING_SIZE),
            }),
        }],
    });
    (buffer, bind_group)
}

fn create_object_pipeline(
    device: &wgpu::Device,
    constants_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("object_pipeline_layout"),
        bind_group_layouts: &[constants_layout],
        push_constant_ranges: &[],
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("object_shader"),
        source: wgpu::ShaderSource::Wgsl(shaders::OBJECT_SHADER.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("object_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3,
                    1 => Float32x4,
                ],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Cw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
