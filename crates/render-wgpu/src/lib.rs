//! wgpu graphics context for the cube viewer.
//!
//! [`WgpuContext`] implements the bind-then-draw [`GraphicsContext`] contract
//! of `cubeview-render` on top of a wgpu device and window surface.
//!
//! # Invariants
//! - One render pass and one submit per frame.
//! - Line loops are drawn as strips over a closed copy of their index range.
//! - The depth texture always matches the configured surface size.
//!
//! [`GraphicsContext`]: cubeview_render::GraphicsContext

mod gpu;
mod shaders;

pub use gpu::WgpuContext;
