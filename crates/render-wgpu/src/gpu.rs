use crate::shaders;
use bytemuck::{Pod, Zeroable};
use cubeview_common::Rgba;
use cubeview_render::{
    BufferData, BufferId, BufferKind, ClearFlags, CullFace, DepthCompare, GraphicsContext,
    RenderError, Topology, Uniform, VertexAttribute, Viewport,
};
use glam::Mat4;
use std::collections::HashMap;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_UNIFORM_SLOTS: u32 = 64;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

#[repr(C)]
#[derive(Copy, Clone, PartialEq, Pod, Zeroable)]
struct Uniforms {
    projection: [[f32; 4]; 4],
    model_view: [[f32; 4]; 4],
}

const UNIFORM_SIZE: u64 = std::mem::size_of::<Uniforms>() as u64;

/// Round `value` up to a multiple of `alignment`.
fn align_to(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

/// The index range as a strip that returns to its first index.
fn closed_loop(indices: &[u16]) -> Vec<u16> {
    let mut closed = indices.to_vec();
    if let Some(&first) = indices.first() {
        closed.push(first);
    }
    closed
}

/// wgpu has no loop primitive; loops are drawn as strips over a closed copy.
fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        Topology::Lines => wgpu::PrimitiveTopology::LineList,
        Topology::LineStrip | Topology::LineLoop => wgpu::PrimitiveTopology::LineStrip,
    }
}

fn compare_function(compare: Option<DepthCompare>) -> wgpu::CompareFunction {
    match compare {
        Some(DepthCompare::Less) => wgpu::CompareFunction::Less,
        Some(DepthCompare::LessEqual) => wgpu::CompareFunction::LessEqual,
        Some(DepthCompare::Always) | None => wgpu::CompareFunction::Always,
    }
}

fn cull_mode(topology: Topology, cull: Option<CullFace>) -> Option<wgpu::Face> {
    if topology != Topology::Triangles {
        return None;
    }
    cull.map(|face| match face {
        CullFace::Front => wgpu::Face::Front,
        CullFace::Back => wgpu::Face::Back,
    })
}

fn to_wgpu_color(color: Rgba) -> wgpu::Color {
    let [r, g, b, a] = color.0;
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    topology: Topology,
    depth: Option<DepthCompare>,
    cull: Option<CullFace>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LoopKey {
    buffer: BufferId,
    offset: u32,
    count: u32,
}

#[derive(Debug, Clone, Copy)]
enum IndexSource {
    Direct(BufferId),
    ClosedLoop(LoopKey),
}

#[derive(Debug, Clone, Copy)]
struct DrawCmd {
    key: PipelineKey,
    position: BufferId,
    color: BufferId,
    index: IndexSource,
    first: u32,
    count: u32,
    uniform_slot: u32,
}

struct GpuBuffer {
    kind: BufferKind,
    buffer: Option<wgpu::Buffer>,
    /// CPU copy of index data, kept to build closed loops.
    indices: Vec<u16>,
    len: usize,
}

/// [`GraphicsContext`] backed by a wgpu device and window surface.
///
/// Draws are recorded during the frame together with a snapshot of the
/// matrix uniforms and submitted as one render pass in `end_frame`.
/// Pipelines are created on first use for each topology/depth/cull
/// combination.
pub struct WgpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    bind_group_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_stride: u64,
    uniform_slots: u32,
    depth_view: wgpu::TextureView,
    buffers: Vec<GpuBuffer>,
    closed_loops: HashMap<LoopKey, wgpu::Buffer>,
    position: Option<BufferId>,
    color: Option<BufferId>,
    index: Option<BufferId>,
    projection: Mat4,
    model_view: Mat4,
    depth: Option<DepthCompare>,
    cull: Option<CullFace>,
    clear_color: wgpu::Color,
    pending_clear: ClearFlags,
    viewport: Option<Viewport>,
    frame_uniforms: Vec<Uniforms>,
    frame_draws: Vec<DrawCmd>,
    line_width_noted: bool,
}

impl WgpuContext {
    /// Create a device for `target` and configure its surface.
    ///
    /// Any failure here means nothing can be drawn; callers treat it as fatal.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| RenderError::ContextInit(format!("create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| RenderError::ContextInit("no compatible adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::ContextInit(format!("request device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::ContextInit("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::info!(
            "GPU initialized with {} backend ({})",
            adapter.get_info().backend.to_str(),
            adapter.get_info().name
        );

        Ok(Self::from_parts(device, queue, surface, config))
    }

    /// Build the context around an already configured surface.
    pub fn from_parts(
        device: wgpu::Device,
        queue: wgpu::Queue,
        surface: wgpu::Surface<'static>,
        config: wgpu::SurfaceConfiguration,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBE_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let uniform_stride = align_to(
            UNIFORM_SIZE,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let (uniform_buffer, uniform_bind_group) = Self::create_uniforms(
            &device,
            &bind_group_layout,
            uniform_stride,
            INITIAL_UNIFORM_SLOTS,
        );
        let depth_view = Self::create_depth_texture(&device, config.width, config.height);

        Self {
            device,
            queue,
            surface,
            config,
            shader,
            pipeline_layout,
            bind_group_layout,
            pipelines: HashMap::new(),
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            uniform_slots: INITIAL_UNIFORM_SLOTS,
            depth_view,
            buffers: Vec::new(),
            closed_loops: HashMap::new(),
            position: None,
            color: None,
            index: None,
            projection: Mat4::IDENTITY,
            model_view: Mat4::IDENTITY,
            depth: None,
            cull: None,
            clear_color: wgpu::Color::BLACK,
            pending_clear: ClearFlags::default(),
            viewport: None,
            frame_uniforms: Vec::new(),
            frame_draws: Vec::new(),
            line_width_noted: false,
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn create_uniforms(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        slots: u32,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform_buffer"),
            size: stride * slots as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(UNIFORM_SIZE),
                }),
            }],
        });
        (buffer, bind_group)
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

    fn ensure_uniform_slots(&mut self, needed: usize) {
        if needed as u32 <= self.uniform_slots {
            return;
        }
        let slots = (needed as u32).next_power_of_two();
        tracing::debug!("growing uniform buffer to {slots} slots");
        let (buffer, bind_group) = Self::create_uniforms(
            &self.device,
            &self.bind_group_layout,
            self.uniform_stride,
            slots,
        );
        self.uniform_buffer = buffer;
        self.uniform_bind_group = bind_group;
        self.uniform_slots = slots;
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        tracing::debug!(?key, "creating pipeline");
        let strip = matches!(key.topology, Topology::LineStrip | Topology::LineLoop);
        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("cube_pipeline"),
                layout: Some(&self.pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &self.shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: (3 * std::mem::size_of::<f32>()) as u64,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &POSITION_ATTRIBUTES,
                        },
                        wgpu::VertexBufferLayout {
                            array_stride: (4 * std::mem::size_of::<f32>()) as u64,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &COLOR_ATTRIBUTES,
                        },
                    ],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &self.shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: primitive_topology(key.topology),
                    strip_index_format: strip.then_some(wgpu::IndexFormat::Uint16),
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: cull_mode(key.topology, key.cull),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: key.depth.is_some(),
                    depth_compare: compare_function(key.depth),
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            });
        self.pipelines.insert(key, pipeline);
    }

    fn gpu_buffer(&self, id: BufferId) -> Result<&GpuBuffer, RenderError> {
        self.buffers
            .get(id.0 as usize)
            .ok_or(RenderError::UnknownBuffer(id))
    }

    fn ensure_closed_loop(&mut self, key: LoopKey) -> Result<(), RenderError> {
        if self.closed_loops.contains_key(&key) {
            return Ok(());
        }
        let source = self.gpu_buffer(key.buffer)?;
        let start = key.offset as usize;
        let end = start + key.count as usize;
        let closed = closed_loop(&source.indices[start..end]);
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("closed_loop_index_buffer"),
                contents: bytemuck::cast_slice(&closed),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.closed_loops.insert(key, buffer);
        Ok(())
    }

    /// Slot of the current uniforms, reusing the last slot when unchanged.
    fn snapshot_uniforms(&mut self) -> u32 {
        let current = Uniforms {
            projection: self.projection.to_cols_array_2d(),
            model_view: self.model_view.to_cols_array_2d(),
        };
        if self.frame_uniforms.last() != Some(&current) {
            self.frame_uniforms.push(current);
        }
        (self.frame_uniforms.len() - 1) as u32
    }

    fn write_uniforms(&self, uniforms: &[Uniforms]) {
        let stride = self.uniform_stride as usize;
        let mut staging = vec![0u8; stride * uniforms.len()];
        for (slot, u) in staging.chunks_mut(stride).zip(uniforms) {
            slot[..UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(u));
        }
        self.queue.write_buffer(&self.uniform_buffer, 0, &staging);
    }
}

impl GraphicsContext for WgpuContext {
    fn create_buffer(&mut self, kind: BufferKind) -> BufferId {
        let id = BufferId(self.buffers.len() as u32);
        self.buffers.push(GpuBuffer {
            kind,
            buffer: None,
            indices: Vec::new(),
            len: 0,
        });
        id
    }

    fn buffer_data(&mut self, buffer: BufferId, data: BufferData<'_>) -> Result<(), RenderError> {
        let slot = self
            .buffers
            .get_mut(buffer.0 as usize)
            .ok_or(RenderError::UnknownBuffer(buffer))?;
        if slot.kind != data.kind() {
            return Err(RenderError::BufferKindMismatch {
                buffer,
                expected: slot.kind,
                actual: data.kind(),
            });
        }

        let (contents, usage, len): (&[u8], _, _) = match data {
            BufferData::Floats(v) => (bytemuck::cast_slice(v), wgpu::BufferUsages::VERTEX, v.len()),
            BufferData::Indices(v) => {
                slot.indices = v.to_vec();
                (bytemuck::cast_slice(v), wgpu::BufferUsages::INDEX, v.len())
            }
        };
        slot.len = len;
        slot.buffer = (!contents.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("cube_buffer"),
                    contents,
                    usage,
                })
        });
        self.closed_loops.retain(|key, _| key.buffer != buffer);
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, attribute: VertexAttribute, buffer: BufferId) {
        match attribute {
            VertexAttribute::Position => self.position = Some(buffer),
            VertexAttribute::Color => self.color = Some(buffer),
        }
    }

    fn bind_index_buffer(&mut self, buffer: BufferId) {
        self.index = Some(buffer);
    }

    fn set_uniform_matrix(&mut self, uniform: Uniform, matrix: &Mat4) {
        match uniform {
            Uniform::Projection => self.projection = *matrix,
            Uniform::ModelView => self.model_view = *matrix,
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if width != 1.0 && !self.line_width_noted {
            tracing::debug!("wgpu draws 1px lines; line width {width} ignored");
            self.line_width_noted = true;
        }
    }

    fn draw_elements(
        &mut self,
        topology: Topology,
        count: u32,
        offset: u32,
    ) -> Result<(), RenderError> {
        let position = self.position.ok_or(RenderError::MissingBinding("position buffer"))?;
        let color = self.color.ok_or(RenderError::MissingBinding("color buffer"))?;
        let index = self.index.ok_or(RenderError::MissingBinding("index buffer"))?;
        self.gpu_buffer(position)?;
        self.gpu_buffer(color)?;

        let len = self.gpu_buffer(index)?.len;
        let end = offset.saturating_add(count);
        if end as usize > len {
            return Err(RenderError::IndexRange { offset, end, len });
        }
        if count == 0 {
            return Ok(());
        }

        let (source, first, count) = if topology == Topology::LineLoop {
            let key = LoopKey {
                buffer: index,
                offset,
                count,
            };
            self.ensure_closed_loop(key)?;
            (IndexSource::ClosedLoop(key), 0, count + 1)
        } else {
            (IndexSource::Direct(index), offset, count)
        };

        let uniform_slot = self.snapshot_uniforms();
        self.frame_draws.push(DrawCmd {
            key: PipelineKey {
                topology,
                depth: self.depth,
                cull: self.cull,
            },
            position,
            color,
            index: source,
            first,
            count,
            uniform_slot,
        });
        Ok(())
    }

    fn viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.pending_clear.color |= flags.color;
        self.pending_clear.depth |= flags.depth;
    }

    fn set_clear_color(&mut self, color: Rgba) {
        self.clear_color = to_wgpu_color(color);
    }

    fn set_depth_test(&mut self, compare: Option<DepthCompare>) {
        self.depth = compare;
    }

    fn set_cull_face(&mut self, face: Option<CullFace>) {
        self.cull = face;
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        tracing::debug!("resizing surface to {width}x{height}");
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_texture(&self.device, width, height);
    }

    fn begin_frame(&mut self) {
        self.frame_draws.clear();
        self.frame_uniforms.clear();
        self.pending_clear = ClearFlags::default();
        self.viewport = None;
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let draws = std::mem::take(&mut self.frame_draws);
        let uniforms = std::mem::take(&mut self.frame_uniforms);
        let clear = std::mem::take(&mut self.pending_clear);

        for draw in &draws {
            self.ensure_pipeline(draw.key);
        }
        self.ensure_uniform_slots(uniforms.len());
        if !uniforms.is_empty() {
            self.write_uniforms(&uniforms);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: if clear.color {
                            wgpu::LoadOp::Clear(self.clear_color)
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: if clear.depth {
                            wgpu::LoadOp::Clear(1.0)
                        } else {
                            wgpu::LoadOp::Load
                        },
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if let Some(vp) = self.viewport {
                let x = vp.x.min(self.config.width);
                let y = vp.y.min(self.config.height);
                let w = vp.width.min(self.config.width - x);
                let h = vp.height.min(self.config.height - y);
                if w > 0 && h > 0 {
                    pass.set_viewport(x as f32, y as f32, w as f32, h as f32, 0.0, 1.0);
                }
            }

            for draw in &draws {
                let (Some(pipeline), Ok(position), Ok(color)) = (
                    self.pipelines.get(&draw.key),
                    self.gpu_buffer(draw.position),
                    self.gpu_buffer(draw.color),
                ) else {
                    continue;
                };
                let (Some(position), Some(color)) = (&position.buffer, &color.buffer) else {
                    continue;
                };
                let index = match draw.index {
                    IndexSource::Direct(id) => {
                        self.gpu_buffer(id).ok().and_then(|b| b.buffer.as_ref())
                    }
                    IndexSource::ClosedLoop(key) => self.closed_loops.get(&key),
                };
                let Some(index) = index else {
                    continue;
                };

                let dynamic_offset = (draw.uniform_slot as u64 * self.uniform_stride) as u32;
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[dynamic_offset]);
                pass.set_vertex_buffer(0, position.slice(..));
                pass.set_vertex_buffer(1, color.slice(..));
                pass.set_index_buffer(index.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(draw.first..draw.first + draw.count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_rounds_up() {
        assert_eq!(align_to(128, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(128, 64), 128);
    }

    #[test]
    fn uniform_block_is_two_matrices() {
        assert_eq!(UNIFORM_SIZE, 128);
    }

    #[test]
    fn closed_loop_repeats_first_index() {
        assert_eq!(closed_loop(&[0, 1, 2, 3, 0, 4]), vec![0, 1, 2, 3, 0, 4, 0]);
        assert!(closed_loop(&[]).is_empty());
    }

    #[test]
    fn loops_become_strips() {
        assert_eq!(
            primitive_topology(Topology::LineLoop),
            wgpu::PrimitiveTopology::LineStrip
        );
        assert_eq!(
            primitive_topology(Topology::Triangles),
            wgpu::PrimitiveTopology::TriangleList
        );
    }

    #[test]
    fn depth_and_cull_mapping() {
        assert_eq!(
            compare_function(Some(DepthCompare::LessEqual)),
            wgpu::CompareFunction::LessEqual
        );
        assert_eq!(compare_function(None), wgpu::CompareFunction::Always);
        assert_eq!(
            cull_mode(Topology::Triangles, Some(CullFace::Back)),
            Some(wgpu::Face::Back)
        );
        assert_eq!(cull_mode(Topology::LineLoop, Some(CullFace::Back)), None);
    }

    #[test]
    fn clear_color_conversion() {
        let c = to_wgpu_color(Rgba::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 0.5, 0.0, 1.0));
    }
}
