use cubeview_common::{PaletteError, Rgba};
use glam::Mat4;

/// Errors raised by the rendering core and its graphics backends.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("graphics context initialization failed: {0}")]
    ContextInit(String),
    #[error("unknown buffer {0:?}")]
    UnknownBuffer(BufferId),
    #[error("buffer {buffer:?} is a {actual:?} buffer, expected {expected:?}")]
    BufferKindMismatch {
        buffer: BufferId,
        expected: BufferKind,
        actual: BufferKind,
    },
    #[error("draw issued without a bound {0}")]
    MissingBinding(&'static str),
    #[error("index range {offset}..{end} exceeds index buffer of {len}")]
    IndexRange { offset: u32, end: u32, len: usize },
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfBounds { index: u16, vertex_count: usize },
    #[error("color buffer covers {colors} vertices, need {vertex_count}")]
    ColorBufferTooShort { colors: usize, vertex_count: usize },
    #[error("surface error: {0}")]
    Surface(String),
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}

/// Opaque handle to a buffer owned by a [`GraphicsContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// Per-vertex float attributes.
    Vertex,
    /// u16 element indices.
    Index,
}

/// Data uploaded into a buffer.
#[derive(Debug, Clone, Copy)]
pub enum BufferData<'a> {
    Floats(&'a [f32]),
    Indices(&'a [u16]),
}

impl BufferData<'_> {
    pub fn kind(&self) -> BufferKind {
        match self {
            BufferData::Floats(_) => BufferKind::Vertex,
            BufferData::Indices(_) => BufferKind::Index,
        }
    }
}

/// Vertex attributes the shader contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    /// 3 floats per vertex.
    Position,
    /// 4 floats per vertex (RGBA).
    Color,
}

impl VertexAttribute {
    pub fn components(self) -> usize {
        match self {
            VertexAttribute::Position => 3,
            VertexAttribute::Color => 4,
        }
    }
}

/// Matrix uniforms the shader contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniform {
    Projection,
    ModelView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
    LineStrip,
    /// Connected strip whose last index joins back to the first.
    LineLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthCompare {
    Less,
    LessEqual,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    Front,
    Back,
}

/// Which buffers a clear touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearFlags {
    pub color: bool,
    pub depth: bool,
}

impl ClearFlags {
    pub const COLOR_AND_DEPTH: ClearFlags = ClearFlags {
        color: true,
        depth: true,
    };
}

/// Viewport rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The graphics backend the rendering core draws through.
///
/// The shape follows a classic bind-then-draw API: buffers are created and
/// filled once, vertex attributes and the index buffer are bound, uniforms
/// are set, then indexed draws are issued. Indices are always u16.
/// Implementations decide when the recorded work reaches the screen; the
/// core only promises to bracket each frame with [`begin_frame`] and
/// [`end_frame`].
///
/// [`begin_frame`]: GraphicsContext::begin_frame
/// [`end_frame`]: GraphicsContext::end_frame
pub trait GraphicsContext {
    fn create_buffer(&mut self, kind: BufferKind) -> BufferId;

    fn buffer_data(&mut self, buffer: BufferId, data: BufferData<'_>) -> Result<(), RenderError>;

    fn bind_vertex_buffer(&mut self, attribute: VertexAttribute, buffer: BufferId);

    fn bind_index_buffer(&mut self, buffer: BufferId);

    fn set_uniform_matrix(&mut self, uniform: Uniform, matrix: &Mat4);

    fn set_line_width(&mut self, width: f32);

    /// Draw `count` indices starting at index `offset` of the bound index buffer.
    fn draw_elements(
        &mut self,
        topology: Topology,
        count: u32,
        offset: u32,
    ) -> Result<(), RenderError>;

    fn viewport(&mut self, viewport: Viewport);

    fn clear(&mut self, flags: ClearFlags);

    fn set_clear_color(&mut self, color: Rgba);

    /// `None` disables depth testing.
    fn set_depth_test(&mut self, compare: Option<DepthCompare>);

    /// `None` disables face culling.
    fn set_cull_face(&mut self, face: Option<CullFace>);

    /// Match the drawing surface to its displayed size.
    fn resize_surface(&mut self, width: u32, height: u32);

    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_components() {
        assert_eq!(VertexAttribute::Position.components(), 3);
        assert_eq!(VertexAttribute::Color.components(), 4);
    }

    #[test]
    fn buffer_data_kind() {
        assert_eq!(BufferData::Floats(&[0.0]).kind(), BufferKind::Vertex);
        assert_eq!(BufferData::Indices(&[0]).kind(), BufferKind::Index);
    }
}
