use clap::{Parser, Subcommand};
use cubeview_common::ViewerConfig;
use cubeview_input::{OrientationController, PointerEvent};
use cubeview_render::{
    Command, CubeMesh, FrameOutcome, OUTLINE_LOOP_LEN, RecordingContext, RenderLoop, SurfaceSize,
    Topology, Uniform, lattice_offsets,
};
use glam::Vec2;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubeview-cli", about = "CLI tool for cube viewer operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print cube mesh counts and check its structure
    Mesh,
    /// Render one frame to the recording backend and summarize the draws
    Frame {
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
    },
    /// Simulate a pointer drag and print the resulting rotations
    Drag {
        /// Pointer-down position as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Vec2,
        /// Release position as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Vec2,
        /// Number of intermediate moves
        #[arg(short, long, default_value = "1")]
        steps: u32,
    },
    /// Print the effective config as YAML
    Config,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad X in {s:?}: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad Y in {s:?}: {e}"))?;
    Ok(Vec2::new(x, y))
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Info => "info",
            Commands::Mesh => "mesh",
            Commands::Frame { .. } => "frame",
            Commands::Drag { .. } => "drag",
            Commands::Config => "config",
        }
    }
}

/// Structural problems in the cube mesh, empty when it is well formed.
fn mesh_problems(mesh: &CubeMesh) -> Vec<String> {
    let mut problems = Vec::new();
    let vertices = mesh.vertex_count();
    for (name, indices) in [
        ("face", mesh.face_indices()),
        ("outline", mesh.outline_indices()),
    ] {
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices) {
            problems.push(format!("{name} index {bad} out of range ({vertices} vertices)"));
        }
    }
    for (face, outline) in mesh.outline_indices().chunks(OUTLINE_LOOP_LEN).enumerate() {
        if outline.first() != outline.last() {
            problems.push(format!("outline of face {face} is not closed"));
        }
    }
    problems
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ViewerConfig::load_or_default(cli.config.as_deref())?;
    tracing::debug!(command = cli.command.name(), "dispatching");

    match cli.command {
        Commands::Info => {
            println!("cubeview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", cubeview_common::crate_info());
            println!("input: {}", cubeview_input::crate_info());
            println!("render: {}", cubeview_render::crate_info());
            println!("instances: {}", lattice_offsets().count());
        }
        Commands::Mesh => {
            let mesh = CubeMesh::new();
            println!("vertices: {}", mesh.vertex_count());
            println!("face indices: {}", mesh.face_indices().len());
            println!("outline indices: {}", mesh.outline_indices().len());

            let problems = mesh_problems(&mesh);
            if problems.is_empty() {
                println!("mesh: OK");
            } else {
                for p in &problems {
                    println!("mesh: {p}");
                }
                anyhow::bail!("{} mesh problems", problems.len());
            }
        }
        Commands::Frame { width, height } => {
            let mut render_loop = RenderLoop::new(RecordingContext::new(), &config)?;
            render_loop.context_mut().clear_commands();

            match render_loop.tick(SurfaceSize::new(width, height))? {
                FrameOutcome::Skipped => println!("frame skipped for {width}x{height} surface"),
                FrameOutcome::Rendered { instances } => {
                    let ctx = render_loop.context();
                    let count = |t: Topology| ctx.draws().filter(|d| d.topology == t).count();
                    let uniforms = ctx
                        .commands()
                        .iter()
                        .filter(|c| matches!(c, Command::SetUniform(Uniform::ModelView, _)))
                        .count();
                    println!(
                        "surface: {width}x{height}, aspect {:.4}",
                        render_loop.camera().aspect
                    );
                    println!("instances: {instances}");
                    println!("filled draws: {}", count(Topology::Triangles));
                    println!("outline draws: {}", count(Topology::LineLoop));
                    println!("model-view updates: {uniforms}");
                    println!("commands: {}", ctx.commands().len());
                }
            }
        }
        Commands::Drag { from, to, steps } => {
            let steps = steps.max(1);
            let mut controller = OrientationController::new(&config.input);

            controller.handle(PointerEvent::Down(from));
            for step in 1..=steps {
                let at = from.lerp(to, step as f32 / steps as f32);
                tracing::debug!(step, "simulated move");
                match controller.handle(PointerEvent::Move(at)) {
                    Some(r) => println!(
                        "move to ({:.1}, {:.1}): axis ({:.4}, {:.4}, {:.4}) angle {:.4} deg",
                        at.x, at.y, r.axis.x, r.axis.y, r.axis.z, r.angle_degrees
                    ),
                    None => println!("move to ({:.1}, {:.1}): no rotation", at.x, at.y),
                }
            }
            controller.handle(PointerEvent::Up(to));

            println!("final orientation ({:?} mode):", config.input.drag_mode);
            for row in 0..4 {
                let r = controller.orientation().row(row);
                println!("  [{:8.4} {:8.4} {:8.4} {:8.4}]", r.x, r.y, r.z, r.w);
            }
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("10,20").unwrap(), Vec2::new(10.0, 20.0));
        assert_eq!(parse_point(" -3.5 , 4 ").unwrap(), Vec2::new(-3.5, 4.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn built_in_mesh_is_well_formed() {
        assert!(mesh_problems(&CubeMesh::new()).is_empty());
    }

    #[test]
    fn parses_drag_with_negative_points() {
        let cli = Cli::try_parse_from([
            "cubeview-cli",
            "drag",
            "--from",
            "-10,5",
            "--to",
            "20,-5",
        ])
        .unwrap();
        assert_eq!(cli.command.name(), "drag");
        match cli.command {
            Commands::Drag { from, to, steps } => {
                assert_eq!(from, Vec2::new(-10.0, 5.0));
                assert_eq!(to, Vec2::new(20.0, -5.0));
                assert_eq!(steps, 1);
            }
            _ => panic!("expected drag"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
