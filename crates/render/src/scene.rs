use crate::camera::Camera;
use crate::context::{
    BufferData, BufferId, GraphicsContext, RenderError, Topology, Uniform, VertexAttribute,
};
use crate::mesh::CubeMesh;
use cubeview_common::{Rgba, SceneConfig};
use glam::{IVec3, Mat4};

/// Outline color. Never taken from a face assignment.
pub const OUTLINE_COLOR: Rgba = Rgba::BLACK;

/// Instances per frame: a 3x3x3 lattice with the center left empty.
pub const INSTANCE_COUNT: usize = 26;

/// Lattice offsets in scan order (x outer, y middle, z inner), center skipped.
pub fn lattice_offsets() -> impl Iterator<Item = IVec3> {
    (-1..=1)
        .flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| IVec3::new(x, y, z))))
        .filter(|offset| *offset != IVec3::ZERO)
}

/// Handles of the shared cube buffers, uploaded once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeBuffers {
    pub positions: BufferId,
    pub face_colors: BufferId,
    pub outline_colors: BufferId,
    pub face_indices: BufferId,
    pub outline_indices: BufferId,
    pub face_index_count: u32,
    pub outline_index_count: u32,
}

impl CubeBuffers {
    /// Upload mesh geometry plus the face and outline color buffers.
    pub fn upload<C: GraphicsContext + ?Sized>(
        ctx: &mut C,
        mesh: &CubeMesh,
        face_colors: &[Rgba; 6],
    ) -> Result<Self, RenderError> {
        let positions = upload(ctx, BufferData::Floats(&mesh.positions_flat()))?;
        let face_colors = upload(ctx, BufferData::Floats(&mesh.face_color_buffer(face_colors)))?;
        let outline_colors = upload(
            ctx,
            BufferData::Floats(&mesh.uniform_color_buffer(OUTLINE_COLOR)),
        )?;
        let face_indices = upload(ctx, BufferData::Indices(mesh.face_indices()))?;
        let outline_indices = upload(ctx, BufferData::Indices(mesh.outline_indices()))?;
        tracing::debug!(
            vertices = mesh.vertex_count(),
            face_indices = mesh.face_indices().len(),
            outline_indices = mesh.outline_indices().len(),
            "uploaded cube buffers"
        );

        Ok(Self {
            positions,
            face_colors,
            outline_colors,
            face_indices,
            outline_indices,
            face_index_count: mesh.face_indices().len() as u32,
            outline_index_count: mesh.outline_indices().len() as u32,
        })
    }
}

fn upload<C: GraphicsContext + ?Sized>(
    ctx: &mut C,
    data: BufferData<'_>,
) -> Result<BufferId, RenderError> {
    let id = ctx.create_buffer(data.kind());
    ctx.buffer_data(id, data)?;
    Ok(id)
}

/// Draws every lattice instance of the shared cube each frame.
#[derive(Debug, Clone)]
pub struct SceneComposer {
    buffers: CubeBuffers,
    spacing: f32,
    line_width: f32,
}

impl SceneComposer {
    pub fn new(buffers: CubeBuffers, config: &SceneConfig) -> Self {
        Self {
            buffers,
            spacing: config.spacing,
            line_width: config.line_width,
        }
    }

    pub fn buffers(&self) -> &CubeBuffers {
        &self.buffers
    }

    /// Model-view for one instance: view, then orientation, then the
    /// instance's lattice translation.
    pub fn instance_transform(&self, view: Mat4, orientation: Mat4, offset: IVec3) -> Mat4 {
        view * orientation * Mat4::from_translation(offset.as_vec3() * self.spacing)
    }

    /// Issue the outline and filled draws for every instance. Returns the
    /// number of instances drawn.
    pub fn compose<C: GraphicsContext + ?Sized>(
        &self,
        ctx: &mut C,
        camera: &Camera,
        orientation: Mat4,
    ) -> Result<usize, RenderError> {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        let b = &self.buffers;

        let mut drawn = 0;
        for offset in lattice_offsets() {
            let model_view = self.instance_transform(view, orientation, offset);
            ctx.set_uniform_matrix(Uniform::Projection, &projection);
            ctx.set_uniform_matrix(Uniform::ModelView, &model_view);

            ctx.bind_vertex_buffer(VertexAttribute::Position, b.positions);

            ctx.bind_vertex_buffer(VertexAttribute::Color, b.outline_colors);
            ctx.bind_index_buffer(b.outline_indices);
            ctx.set_line_width(self.line_width);
            ctx.draw_elements(Topology::LineLoop, b.outline_index_count, 0)?;

            ctx.bind_vertex_buffer(VertexAttribute::Color, b.face_colors);
            ctx.bind_index_buffer(b.face_indices);
            ctx.draw_elements(Topology::Triangles, b.face_index_count, 0)?;

            drawn += 1;
        }
        Ok(drawn)
    }
}
