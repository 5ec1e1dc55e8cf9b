use crate::context::{
    BufferData, BufferId, BufferKind, ClearFlags, CullFace, DepthCompare, GraphicsContext,
    RenderError, Topology, Uniform, VertexAttribute, Viewport,
};
use cubeview_common::Rgba;
use glam::Mat4;

/// A command as seen by [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateBuffer(BufferId, BufferKind),
    BufferData(BufferId, usize),
    BindVertexBuffer(VertexAttribute, BufferId),
    BindIndexBuffer(BufferId),
    SetUniform(Uniform, Mat4),
    SetLineWidth(f32),
    Draw(DrawRecord),
    Viewport(Viewport),
    Clear(ClearFlags),
    SetClearColor(Rgba),
    SetDepthTest(Option<DepthCompare>),
    SetCullFace(Option<CullFace>),
    ResizeSurface(u32, u32),
    BeginFrame,
    EndFrame,
}

/// State captured at the moment of a draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub topology: Topology,
    pub count: u32,
    pub offset: u32,
    pub position_buffer: BufferId,
    pub color_buffer: BufferId,
    pub index_buffer: BufferId,
    pub projection: Mat4,
    pub model_view: Mat4,
    pub line_width: f32,
}

#[derive(Debug, Clone)]
enum Stored {
    Floats(Vec<f32>),
    Indices(Vec<u16>),
}

#[derive(Debug, Clone)]
struct StoredBuffer {
    kind: BufferKind,
    data: Option<Stored>,
}

/// In-memory graphics context.
///
/// Keeps uploaded buffer contents, records every command, and validates
/// each draw against the bound buffers. Useful for tests, headless tooling
/// and inspecting exactly what a frame would submit.
#[derive(Debug, Default)]
pub struct RecordingContext {
    buffers: Vec<StoredBuffer>,
    commands: Vec<Command>,
    position: Option<BufferId>,
    color: Option<BufferId>,
    index: Option<BufferId>,
    projection: Mat4,
    model_view: Mat4,
    line_width: f32,
    surface: (u32, u32),
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            line_width: 1.0,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Forget recorded commands; uploaded buffers stay.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn draws(&self) -> impl Iterator<Item = &DrawRecord> {
        self.commands.iter().filter_map(|c| match c {
            Command::Draw(d) => Some(d),
            _ => None,
        })
    }

    pub fn draw_count(&self) -> usize {
        self.draws().count()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    /// Float contents of a vertex buffer.
    pub fn floats(&self, buffer: BufferId) -> Option<&[f32]> {
        match self.buffers.get(buffer.0 as usize)?.data.as_ref()? {
            Stored::Floats(v) => Some(v.as_slice()),
            Stored::Indices(_) => None,
        }
    }

    /// Index contents of an index buffer.
    pub fn indices(&self, buffer: BufferId) -> Option<&[u16]> {
        match self.buffers.get(buffer.0 as usize)?.data.as_ref()? {
            Stored::Indices(v) => Some(v.as_slice()),
            Stored::Floats(_) => None,
        }
    }

    fn stored(&self, buffer: BufferId) -> Result<&StoredBuffer, RenderError> {
        self.buffers
            .get(buffer.0 as usize)
            .ok_or(RenderError::UnknownBuffer(buffer))
    }

    fn vertex_len(
        &self,
        buffer: BufferId,
        attribute: VertexAttribute,
    ) -> Result<usize, RenderError> {
        match &self.stored(buffer)?.data {
            Some(Stored::Floats(v)) => Ok(v.len() / attribute.components()),
            Some(Stored::Indices(_)) => Err(RenderError::BufferKindMismatch {
                buffer,
                expected: BufferKind::Vertex,
                actual: BufferKind::Index,
            }),
            None => Ok(0),
        }
    }

    fn index_data(&self, buffer: BufferId) -> Result<&[u16], RenderError> {
        match &self.stored(buffer)?.data {
            Some(Stored::Indices(v)) => Ok(v.as_slice()),
            Some(Stored::Floats(_)) => Err(RenderError::BufferKindMismatch {
                buffer,
                expected: BufferKind::Index,
                actual: BufferKind::Vertex,
            }),
            None => Ok(&[]),
        }
    }

    fn validate_draw(
        &self,
        topology: Topology,
        count: u32,
        offset: u32,
    ) -> Result<DrawRecord, RenderError> {
        let position = self.position.ok_or(RenderError::MissingBinding("position buffer"))?;
        let color = self.color.ok_or(RenderError::MissingBinding("color buffer"))?;
        let index = self.index.ok_or(RenderError::MissingBinding("index buffer"))?;

        let vertex_count = self.vertex_len(position, VertexAttribute::Position)?;
        let colors = self.vertex_len(color, VertexAttribute::Color)?;
        if colors < vertex_count {
            return Err(RenderError::ColorBufferTooShort {
                colors,
                vertex_count,
            });
        }

        let indices = self.index_data(index)?;
        let end = offset.saturating_add(count);
        let range = indices
            .get(offset as usize..end as usize)
            .ok_or(RenderError::IndexRange {
                offset,
                end,
                len: indices.len(),
            })?;
        if let Some(&bad) = range.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(RenderError::IndexOutOfBounds {
                index: bad,
                vertex_count,
            });
        }

        Ok(DrawRecord {
            topology,
            count,
            offset,
            position_buffer: position,
            color_buffer: color,
            index_buffer: index,
            projection: self.projection,
            model_view: self.model_view,
            line_width: self.line_width,
        })
    }
}

impl GraphicsContext for RecordingContext {
    fn create_buffer(&mut self, kind: BufferKind) -> BufferId {
        let id = BufferId(self.buffers.len() as u32);
        self.buffers.push(StoredBuffer { kind, data: None });
        self.commands.push(Command::CreateBuffer(id, kind));
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
        let (stored, len) = match data {
            BufferData::Floats(v) => (Stored::Floats(v.to_vec()), v.len()),
            BufferData::Indices(v) => (Stored::Indices(v.to_vec()), v.len()),
        };
        slot.data = Some(stored);
        self.commands.push(Command::BufferData(buffer, len));
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, attribute: VertexAttribute, buffer: BufferId) {
        match attribute {
            VertexAttribute::Position => self.position = Some(buffer),
            VertexAttribute::Color => self.color = Some(buffer),
        }
        self.commands.push(Command::BindVertexBuffer(attribute, buffer));
    }

    fn bind_index_buffer(&mut self, buffer: BufferId) {
        self.index = Some(buffer);
        self.commands.push(Command::BindIndexBuffer(buffer));
    }

    fn set_uniform_matrix(&mut self, uniform: Uniform, matrix: &Mat4) {
        match uniform {
            Uniform::Projection => self.projection = *matrix,
            Uniform::ModelView => self.model_view = *matrix,
        }
        self.commands.push(Command::SetUniform(uniform, *matrix));
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.commands.push(Command::SetLineWidth(width));
    }

    fn draw_elements(
        &mut self,
        topology: Topology,
        count: u32,
        offset: u32,
    ) -> Result<(), RenderError> {
        let record = self.validate_draw(topology, count, offset)?;
        self.commands.push(Command::Draw(record));
        Ok(())
    }

    fn viewport(&mut self, viewport: Viewport) {
        self.commands.push(Command::Viewport(viewport));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.commands.push(Command::Clear(flags));
    }

    fn set_clear_color(&mut self, color: Rgba) {
        self.commands.push(Command::SetClearColor(color));
    }

    fn set_depth_test(&mut self, compare: Option<DepthCompare>) {
        self.commands.push(Command::SetDepthTest(compare));
    }

    fn set_cull_face(&mut self, face: Option<CullFace>) {
        self.commands.push(Command::SetCullFace(face));
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
        self.commands.push(Command::ResizeSurface(width, height));
    }

    fn begin_frame(&mut self) {
        self.commands.push(Command::BeginFrame);
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        self.commands.push(Command::EndFrame);
        Ok(())
    }
}
