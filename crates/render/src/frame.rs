use crate::camera::Camera;
use crate::context::{ClearFlags, CullFace, DepthCompare, GraphicsContext, RenderError, Viewport};
use crate::mesh::CubeMesh;
use crate::scene::{CubeBuffers, SceneComposer};
use cubeview_common::{ColorPalette, ViewerConfig};
use cubeview_input::{OrientationController, PointerEvent, PointerQueue};
use glam::Mat4;

/// Displayed size of the drawing surface, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered { instances: usize },
    /// Nothing to draw into (zero-area surface).
    Skipped,
}

/// Per-frame driver for the cube assembly.
///
/// Owns the graphics context and everything a frame reads. The host calls
/// [`RenderLoop::tick`] once per display refresh and stops calling it to
/// stop rendering; there is no other shutdown protocol. Pointer events are
/// queued between frames and applied at the start of the next tick, so a
/// frame always sees a fully formed orientation.
pub struct RenderLoop<C: GraphicsContext> {
    ctx: C,
    camera: Camera,
    composer: SceneComposer,
    controller: OrientationController,
    pointer_queue: PointerQueue,
    frames: u64,
}

impl<C: GraphicsContext> RenderLoop<C> {
    /// Set global pipeline state and upload the shared cube buffers.
    pub fn new(mut ctx: C, config: &ViewerConfig) -> Result<Self, RenderError> {
        let palette = ColorPalette::with_overrides(&config.palette)?;
        let face_colors = palette.resolve(&config.scene.faces)?;

        ctx.set_clear_color(config.scene.clear_color);
        ctx.set_depth_test(Some(DepthCompare::LessEqual));
        ctx.set_cull_face(Some(CullFace::Back));

        let buffers = CubeBuffers::upload(&mut ctx, &CubeMesh::new(), &face_colors)?;
        tracing::info!("render loop ready");

        Ok(Self {
            ctx,
            camera: Camera::from_config(&config.camera),
            composer: SceneComposer::new(buffers, &config.scene),
            controller: OrientationController::new(&config.input),
            pointer_queue: PointerQueue::new(),
            frames: 0,
        })
    }

    /// Queue a pointer event for the next frame.
    pub fn push_pointer(&mut self, event: PointerEvent) {
        self.pointer_queue.push(event);
    }

    /// Render one frame for a surface of the given displayed size.
    pub fn tick(&mut self, size: SurfaceSize) -> Result<FrameOutcome, RenderError> {
        let applied = self.controller.handle_all(self.pointer_queue.drain());
        if applied > 0 {
            tracing::trace!(applied, "drag rotations applied");
        }

        if size.is_empty() {
            tracing::debug!("skipping frame for {}x{} surface", size.width, size.height);
            return Ok(FrameOutcome::Skipped);
        }

        self.ctx.resize_surface(size.width, size.height);
        self.camera.set_viewport(size.width, size.height);

        self.ctx.begin_frame();
        self.ctx.viewport(Viewport {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        });
        self.ctx.clear(ClearFlags::COLOR_AND_DEPTH);
        let instances = self
            .composer
            .compose(&mut self.ctx, &self.camera, self.controller.orientation())?;
        self.ctx.end_frame()?;

        self.frames += 1;
        Ok(FrameOutcome::Rendered { instances })
    }

    pub fn orientation(&self) -> Mat4 {
        self.controller.orientation()
    }

    pub fn controller(&self) -> &OrientationController {
        &self.controller
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    /// Frames rendered so far (skipped frames excluded).
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Topology, Uniform};
    use crate::recording::{Command, RecordingContext};
    use crate::scene::INSTANCE_COUNT;
    use cubeview_common::FaceColors;
    use glam::Vec2;

    fn new_loop() -> RenderLoop<RecordingContext> {
        RenderLoop::new(RecordingContext::new(), &ViewerConfig::default()).unwrap()
    }

    #[test]
    fn setup_enables_depth_and_culling() {
        let rl = new_loop();
        let cmds = rl.context().commands();
        assert!(cmds.contains(&Command::SetDepthTest(Some(DepthCompare::LessEqual))));
        assert!(cmds.contains(&Command::SetCullFace(Some(CullFace::Back))));
        assert_eq!(rl.context().draw_count(), 0);
    }

    #[test]
    fn frame_sequence() {
        let mut rl = new_loop();
        rl.context_mut().clear_commands();
        let outcome = rl.tick(SurfaceSize::new(800, 600)).unwrap();
        assert_eq!(
            outcome,
            FrameOutcome::Rendered {
                instances: INSTANCE_COUNT
            }
        );

        let cmds = rl.context().commands();
        assert_eq!(cmds[0], Command::ResizeSurface(800, 600));
        assert_eq!(cmds[1], Command::BeginFrame);
        assert_eq!(
            cmds[2],
            Command::Viewport(Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            })
        );
        assert_eq!(cmds[3], Command::Clear(ClearFlags::COLOR_AND_DEPTH));
        assert_eq!(cmds.last(), Some(&Command::EndFrame));
        assert_eq!(rl.context().draw_count(), 2 * INSTANCE_COUNT);
        assert_eq!(rl.frames(), 1);
    }

    #[test]
    fn every_frame_draws_26_instances() {
        let mut rl = new_loop();
        for _ in 0..3 {
            rl.context_mut().clear_commands();
            rl.tick(SurfaceSize::new(640, 480)).unwrap();
            let fills = rl
                .context()
                .draws()
                .filter(|d| d.topology == Topology::Triangles)
                .count();
            assert_eq!(fills, INSTANCE_COUNT);
        }
        assert_eq!(rl.frames(), 3);
    }

    #[test]
    fn zero_surface_skips_frame() {
        let mut rl = new_loop();
        rl.tick(SurfaceSize::new(800, 600)).unwrap();
        let aspect = rl.camera().aspect;
        rl.context_mut().clear_commands();

        assert_eq!(rl.tick(SurfaceSize::new(800, 0)).unwrap(), FrameOutcome::Skipped);
        assert!(rl.context().commands().is_empty());
        assert_eq!(rl.camera().aspect, aspect);
        assert_eq!(rl.frames(), 1);
    }

    #[test]
    fn no_drag_keeps_identity() {
        let mut rl = new_loop();
        rl.tick(SurfaceSize::new(800, 600)).unwrap();
        rl.tick(SurfaceSize::new(800, 600)).unwrap();
        assert_eq!(rl.orientation(), Mat4::IDENTITY);
    }

    #[test]
    fn queued_drag_applies_on_next_tick() {
        let mut rl = new_loop();
        rl.push_pointer(PointerEvent::Down(Vec2::ZERO));
        rl.push_pointer(PointerEvent::Move(Vec2::new(10.0, 0.0)));
        assert_eq!(rl.orientation(), Mat4::IDENTITY);

        rl.tick(SurfaceSize::new(800, 600)).unwrap();
        let expected = Mat4::from_rotation_y(-1.0_f32.to_radians());
        assert!(rl.orientation().abs_diff_eq(expected, 1e-5));
        assert!(rl.controller().is_dragging());
    }

    #[test]
    fn released_drag_renders_unchanged() {
        let mut rl = new_loop();
        rl.push_pointer(PointerEvent::Down(Vec2::ZERO));
        rl.push_pointer(PointerEvent::Move(Vec2::new(30.0, 40.0)));
        rl.push_pointer(PointerEvent::Up(Vec2::new(30.0, 40.0)));
        rl.tick(SurfaceSize::new(800, 600)).unwrap();
        let frozen = rl.orientation();

        let model_views = |rl: &RenderLoop<RecordingContext>| -> Vec<Mat4> {
            rl.context()
                .commands()
                .iter()
                .filter_map(|c| match c {
                    Command::SetUniform(Uniform::ModelView, m) => Some(*m),
                    _ => None,
                })
                .collect()
        };

        rl.context_mut().clear_commands();
        rl.tick(SurfaceSize::new(800, 600)).unwrap();
        let first = model_views(&rl);
        rl.context_mut().clear_commands();
        rl.tick(SurfaceSize::new(800, 600)).unwrap();
        let second = model_views(&rl);

        assert_eq!(rl.orientation(), frozen);
        assert_eq!(first.len(), INSTANCE_COUNT);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_face_color_fails_setup() {
        let mut config = ViewerConfig::default();
        config.scene.faces = FaceColors {
            top: "chartreuse".into(),
            ..FaceColors::default()
        };
        let err = RenderLoop::new(RecordingContext::new(), &config).err().unwrap();
        assert!(matches!(err, RenderError::Palette(_)));
    }
}
