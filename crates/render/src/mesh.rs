use cubeview_common::{Face, Rgba};

/// Vertices per face; faces do not share vertices so each can be flat-colored.
pub const VERTICES_PER_FACE: usize = 4;
pub const VERTEX_COUNT: usize = VERTICES_PER_FACE * 6;
pub const FACE_INDEX_COUNT: usize = 36;
/// Each face border is a 5-index loop that repeats its first corner.
pub const OUTLINE_LOOP_LEN: usize = 5;
pub const OUTLINE_INDEX_COUNT: usize = OUTLINE_LOOP_LEN * 6;

/// Geometry of a single cube spanning `[-1, 1]` on every axis.
///
/// Faces appear in [`Face::ALL`] order, four corners each, wound
/// counter-clockwise when seen from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeMesh {
    positions: Vec<[f32; 3]>,
    face_indices: Vec<u16>,
    outline_indices: Vec<u16>,
}

impl Default for CubeMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeMesh {
    pub fn new() -> Self {
        #[rustfmt::skip]
        let positions = vec![
            // Front
            [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0],
            // Back
            [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],
            // Top
            [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0],
            // Bottom
            [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
            // Right
            [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
            // Left
            [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
        ];

        let mut face_indices = Vec::with_capacity(FACE_INDEX_COUNT);
        let mut outline_indices = Vec::with_capacity(OUTLINE_INDEX_COUNT);
        for face in Face::ALL {
            let base = (face.index() * VERTICES_PER_FACE) as u16;
            face_indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            outline_indices.extend_from_slice(&[base, base + 1, base + 2, base + 3, base]);
        }

        Self {
            positions,
            face_indices,
            outline_indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` buffer.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.positions.iter().flatten().copied().collect()
    }

    /// Triangle list, two triangles per face.
    pub fn face_indices(&self) -> &[u16] {
        &self.face_indices
    }

    /// Six closed 5-index loops, one per face border.
    pub fn outline_indices(&self) -> &[u16] {
        &self.outline_indices
    }

    /// Per-vertex RGBA buffer where every corner of a face takes that face's color.
    pub fn face_color_buffer(&self, colors: &[Rgba; 6]) -> Vec<f32> {
        colors
            .iter()
            .flat_map(|rgba| std::iter::repeat_n(rgba.0, VERTICES_PER_FACE))
            .flatten()
            .collect()
    }

    /// Per-vertex RGBA buffer with one color everywhere.
    pub fn uniform_color_buffer(&self, color: Rgba) -> Vec<f32> {
        std::iter::repeat_n(color.0, self.vertex_count())
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_common::{ColorPalette, FaceColors};
    use glam::Vec3;

    #[test]
    fn counts() {
        let mesh = CubeMesh::new();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.face_indices().len(), 36);
        assert_eq!(mesh.outline_indices().len(), 30);
        assert_eq!(mesh.positions_flat().len(), 72);
    }

    #[test]
    fn construction_is_deterministic() {
        let a = CubeMesh::new();
        let b = CubeMesh::new();
        let c = CubeMesh::default();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn indices_in_range() {
        let mesh = CubeMesh::new();
        let n = mesh.vertex_count() as u16;
        assert!(mesh.face_indices().iter().all(|&i| i < n));
        assert!(mesh.outline_indices().iter().all(|&i| i < n));
        assert_eq!(mesh.face_indices().len() % 3, 0);
    }

    #[test]
    fn outline_loops_are_closed() {
        let mesh = CubeMesh::new();
        for lp in mesh.outline_indices().chunks(OUTLINE_LOOP_LEN) {
            assert_eq!(lp.first(), lp.last());
            let corners = &lp[..4];
            for (i, a) in corners.iter().enumerate() {
                assert!(!corners[i + 1..].contains(a));
            }
        }
    }

    #[test]
    fn face_corners_lie_on_their_plane() {
        let mesh = CubeMesh::new();
        let planes = [Vec3::Z, -Vec3::Z, Vec3::Y, -Vec3::Y, Vec3::X, -Vec3::X];
        for (face, normal) in Face::ALL.iter().zip(planes) {
            let start = face.index() * VERTICES_PER_FACE;
            for p in &mesh.positions()[start..start + VERTICES_PER_FACE] {
                assert_eq!(Vec3::from(*p).dot(normal), 1.0, "{face:?}");
            }
        }
    }

    #[test]
    fn triangles_wind_outward() {
        let mesh = CubeMesh::new();
        let pos = |i: u16| Vec3::from(mesh.positions()[i as usize]);
        for tri in mesh.face_indices().chunks(3) {
            let (a, b, c) = (pos(tri[0]), pos(tri[1]), pos(tri[2]));
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(normal.dot(center) > 0.0, "triangle {tri:?} faces inward");
        }
    }

    #[test]
    fn face_colors_grouped_by_four() {
        let mesh = CubeMesh::new();
        let palette = ColorPalette::new();
        let colors = palette.resolve(&FaceColors::default()).unwrap();
        let buffer = mesh.face_color_buffer(&colors);
        assert_eq!(buffer.len(), 24 * 4);

        for (face, group) in buffer.chunks(VERTICES_PER_FACE * 4).enumerate() {
            for vertex in group.chunks(4) {
                assert_eq!(vertex, &colors[face].0[..]);
            }
        }
    }

    #[test]
    fn outline_color_everywhere() {
        let mesh = CubeMesh::new();
        let buffer = mesh.uniform_color_buffer(Rgba::BLACK);
        assert_eq!(buffer.len(), 96);
        assert!(buffer.chunks(4).all(|c| c == Rgba::BLACK.0));
    }
}
