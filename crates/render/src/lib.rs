//! Rendering core: one shared cube mesh drawn 26 times around an empty center.
//!
//! # Invariants
//! - Mesh and color buffers are uploaded once and never rewritten.
//! - Every rendered frame issues exactly 26 instance draws (outline + fill each).
//! - Uniforms are set per instance, immediately before its draws.
//! - The renderer only reads the orientation; pointer input is the sole writer.
//!
//! Backends implement [`GraphicsContext`]. [`RecordingContext`] is the
//! in-memory backend used by tests and the CLI; the wgpu backend lives in
//! `cubeview-render-wgpu`.

mod camera;
mod context;
mod frame;
mod mesh;
mod recording;
mod scene;

pub use camera::Camera;
pub use context::{
    BufferData, BufferId, BufferKind, ClearFlags, CullFace, DepthCompare, GraphicsContext,
    RenderError, Topology, Uniform, VertexAttribute, Viewport,
};
pub use frame::{FrameOutcome, RenderLoop, SurfaceSize};
pub use mesh::{CubeMesh, FACE_INDEX_COUNT, OUTLINE_INDEX_COUNT, OUTLINE_LOOP_LEN, VERTEX_COUNT};
pub use recording::{Command, DrawRecord, RecordingContext};
pub use scene::{CubeBuffers, INSTANCE_COUNT, OUTLINE_COLOR, SceneComposer, lattice_offsets};

pub fn crate_info() -> &'static str {
    "cubeview-render v0.1.0"
}
