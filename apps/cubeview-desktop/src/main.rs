use anyhow::Result;
use clap::Parser;
use cubeview_common::ViewerConfig;
use cubeview_input::PointerEvent;
use cubeview_render::{FrameOutcome, RenderLoop, SurfaceSize};
use cubeview_render_wgpu::WgpuContext;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "cubeview-desktop", about = "Interactive 3x3x3 cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

struct CubeApp {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_loop: Option<RenderLoop<WgpuContext>>,
    /// Last reported cursor position; `None` until the first `CursorMoved`.
    cursor: Option<Vec2>,
}

/// Pointer event for a left-button change, if the cursor position is known.
fn button_event(cursor: Option<Vec2>, state: ElementState) -> Option<PointerEvent> {
    let at = cursor?;
    Some(match state {
        ElementState::Pressed => PointerEvent::Down(at),
        ElementState::Released => PointerEvent::Up(at),
    })
}

impl CubeApp {
    fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            window: None,
            render_loop: None,
            cursor: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let ctx = WgpuContext::new(window.clone(), size.width, size.height)?;
        let render_loop = RenderLoop::new(ctx, &self.config)?;

        self.window = Some(window);
        self.render_loop = Some(render_loop);
        Ok(())
    }

    fn push_pointer(&mut self, event: PointerEvent) {
        if let Some(render_loop) = &mut self.render_loop {
            render_loop.push_pointer(event);
        }
    }
}

impl ApplicationHandler for CubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("failed to initialize graphics: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let at = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some(at);
                self.push_pointer(PointerEvent::Move(at));
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                match button_event(self.cursor, state) {
                    Some(event) => self.push_pointer(event),
                    None => tracing::debug!("ignoring button before any cursor position"),
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(window), Some(render_loop)) = (&self.window, &mut self.render_loop)
                else {
                    return;
                };

                // Resizes are picked up here; the surface follows the window each frame.
                let size = window.inner_size();
                match render_loop.tick(SurfaceSize::new(size.width, size.height)) {
                    Ok(FrameOutcome::Rendered { .. }) => {}
                    Ok(FrameOutcome::Skipped) => tracing::trace!("window minimized, frame skipped"),
                    Err(e) => tracing::error!("frame failed: {e}"),
                }
                window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubeview-desktop starting");

    let config = ViewerConfig::load_or_default(cli.config.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = CubeApp::new(config);
    event_loop.run_app(&mut app)?;

    if let Some(render_loop) = &app.render_loop {
        tracing::info!("rendered {} frames", render_loop.frames());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_without_cursor_position_is_ignored() {
        assert_eq!(button_event(None, ElementState::Pressed), None);
        assert_eq!(button_event(None, ElementState::Released), None);
    }

    #[test]
    fn press_anchors_at_last_cursor_position() {
        let at = Vec2::new(120.0, 45.0);
        assert_eq!(
            button_event(Some(at), ElementState::Pressed),
            Some(PointerEvent::Down(at))
        );
        assert_eq!(
            button_event(Some(at), ElementState::Released),
            Some(PointerEvent::Up(at))
        );
    }

    #[test]
    fn first_move_after_early_press_does_not_spin() {
        use cubeview_input::OrientationController;

        let mut ctl = OrientationController::default();
        if let Some(event) = button_event(None, ElementState::Pressed) {
            ctl.handle(event);
        }
        ctl.handle(PointerEvent::Move(Vec2::new(600.0, 400.0)));
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.orientation(), glam::Mat4::IDENTITY);
    }
}
