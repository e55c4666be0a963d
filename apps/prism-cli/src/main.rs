use anyhow::Context;
use clap::{Parser, Subcommand};
use prism_common::TransformSnapshot;
use prism_input::{InputState, Key};
use prism_render::{Command, GraphicsContext, RecordingContext};
use prism_scene::{FrameControl, HeadlessUi, Scene};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prism-cli", about = "Headless tools for the prism demo scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the scene roster
    Info,
    /// Run the scene against a recording context
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct SimulateArgs {
    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u32,
    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Press C every K frames to cycle cameras
    #[arg(long)]
    toggle_every: Option<u32>,
    /// Back buffer width
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Back buffer height
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Print a JSON report including the last frame's command trace
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ShapeReport {
    label: String,
    transform: TransformSnapshot,
    tint: [f32; 4],
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    frames: u32,
    exited: bool,
    active_camera: usize,
    shuttle_phase: String,
    shapes: Vec<ShapeReport>,
    last_frame: Vec<Command>,
}

fn simulate(args: &SimulateArgs) -> anyhow::Result<SimulationReport> {
    let mut gfx = RecordingContext::new(args.width, args.height);
    let mut scene =
        Scene::init(&mut gfx, args.width, args.height).context("failed to build scene")?;
    let mut input = InputState::new();
    let mut ui = HeadlessUi::new();

    let mut frames = 0;
    let mut exited = false;
    for frame in 0..args.frames {
        let toggle = args
            .toggle_every
            .is_some_and(|k| k > 0 && frame > 0 && frame % k == 0);
        if toggle {
            input.handle_key(Key::C, true);
        }

        let mut frame_input = input.snapshot();
        let control = scene.update(args.dt, frame as f32 * args.dt, &mut frame_input, &mut ui);
        input.handle_key(Key::C, false);

        scene
            .draw(&mut gfx, ())
            .with_context(|| format!("frame {frame} failed"))?;
        ui.clear_transcript();
        frames += 1;

        if control == FrameControl::Exit {
            exited = true;
            break;
        }
    }

    Ok(SimulationReport {
        frames,
        exited,
        active_camera: scene.active_camera_index(),
        shuttle_phase: format!("{:?}", scene.shuttle_phase()),
        shapes: scene
            .roster()
            .iter()
            .map(|shape| ShapeReport {
                label: shape.label.clone(),
                transform: shape.entity.transform().snapshot(),
                tint: shape.entity.mesh().tint().to_array(),
            })
            .collect(),
        last_frame: gfx.last_frame().to_vec(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(level),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("prism-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", prism_render::crate_info());

            let mut gfx = RecordingContext::new(1280, 720);
            let scene = Scene::init(&mut gfx, 1280, 720)?;
            println!(
                "buffers: {} ({} bytes), tearing: {}",
                gfx.buffer_count(),
                gfx.allocated_bytes(),
                gfx.supports_tearing()
            );
            for (i, shape) in scene.roster().iter().enumerate() {
                let mesh = shape.entity.mesh();
                println!(
                    "shape {i}: {} ({} vertices, {} indices)",
                    shape.label,
                    mesh.vertex_count(),
                    mesh.index_count()
                );
            }
            for (i, camera) in scene.cameras().iter().enumerate() {
                let p = camera.transform().position();
                println!(
                    "camera {}: ({:.1}, {:.1}, {:.1}) fov {:.4}",
                    i + 1,
                    p.x,
                    p.y,
                    p.z,
                    camera.fov()
                );
            }
        }
        Commands::Simulate(args) => {
            let report = simulate(&args)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Simulated {} frames (dt={:.4}s){}",
                    report.frames,
                    args.dt,
                    if report.exited { ", exit requested" } else { "" }
                );
                println!(
                    "Active camera: {}, shuttle: {}",
                    report.active_camera + 1,
                    report.shuttle_phase
                );
                for shape in &report.shapes {
                    let t = &shape.transform;
                    println!(
                        "{:<16} pos ({:.3}, {:.3}, {:.3}) rot z {:.3} scale ({:.3}, {:.3})",
                        shape.label,
                        t.position.x,
                        t.position.y,
                        t.position.z,
                        t.rotation.z,
                        t.scale.x,
                        t.scale.y
                    );
                }
                println!("Last frame: {} commands", report.last_frame.len());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(frames: u32, toggle_every: Option<u32>) -> SimulateArgs {
        SimulateArgs {
            frames,
            dt: 1.0 / 60.0,
            toggle_every,
            width: 640,
            height: 480,
            json: false,
        }
    }

    #[test]
    fn toggling_cycles_cameras() {
        // Presses land on frames 10, 20, 30 and 40.
        let report = simulate(&args(45, Some(10))).unwrap();
        assert_eq!(report.active_camera, 4 % 3);
        assert_eq!(report.frames, 45);
        assert!(!report.exited);
    }

    #[test]
    fn last_frame_ends_with_present() {
        let report = simulate(&args(3, None)).unwrap();
        assert_eq!(report.active_camera, 0);
        assert_eq!(report.last_frame.last(), Some(&Command::Present));
        assert_eq!(report.shapes.len(), 5);
        assert!(report.shapes[0].transform.position.x > 0.0);
    }

    #[test]
    fn report_serializes() {
        let report = simulate(&args(1, None)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["shapes"][2]["label"], "Diamond");
        assert_eq!(json["shuttle_phase"], "Advancing");
    }

    #[test]
    fn empty_viewport_is_an_error() {
        let mut zero_width = args(1, None);
        zero_width.width = 0;
        let err = simulate(&zero_width).unwrap_err();
        assert!(format!("{err:#}").contains("viewport must be non-empty"));
    }
}
