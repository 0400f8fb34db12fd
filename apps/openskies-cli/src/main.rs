mod config;
mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::{Mat4, Vec3};
use openskies_camera::{Camera, CameraUniform, FAR_PLANE, NEAR_PLANE};
use openskies_input::FlyController;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "openskies", about = "Free-fly camera driver for the OpenSkies demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and projection constants
    Info,
    /// Build a camera from explicit parameters and print its matrices
    View {
        /// Eye position as x,y,z
        #[arg(long, default_value = "0,0,3", value_parser = parse_vec3, allow_hyphen_values = true)]
        position: Vec3,
        /// Viewport width in pixels
        #[arg(long, default_value = "800")]
        width: u32,
        /// Viewport height in pixels
        #[arg(long, default_value = "600")]
        height: u32,
        /// Pitch in degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        pitch: f32,
        /// Yaw in degrees
        #[arg(long, default_value = "-90", allow_hyphen_values = true)]
        yaw: f32,
        /// Vertical field of view in degrees
        #[arg(long, default_value = "90", allow_hyphen_values = true)]
        fov: f32,
        /// Reject out-of-range pitch/fov instead of clamping
        #[arg(long)]
        strict: bool,
    },
    /// Replay a scripted fly-through and print the final camera
    Fly {
        /// JSON config with initial position, viewport and controller tuning
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON input script (defaults to a built-in demo)
        #[arg(long)]
        script: Option<PathBuf>,
        /// Fixed simulation rate in frames per second
        #[arg(long, default_value = "60")]
        fps: u32,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{s}': {e}"))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got '{s}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("openskies v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: {}", openskies_camera::crate_info());
            println!("input: {}", openskies_input::crate_info());
            println!("projection: near={NEAR_PLANE} far={FAR_PLANE}, right-handed, depth 0..1");
            println!(
                "uniform: {} bytes, column-major",
                std::mem::size_of::<CameraUniform>()
            );
        }
        Commands::View {
            position,
            width,
            height,
            pitch,
            yaw,
            fov,
            strict,
        } => {
            if width == 0 || height == 0 {
                anyhow::bail!("viewport must be non-zero, got {width}x{height}");
            }
            let mut camera = Camera::new(position, width as f32 / height as f32);
            camera.set_yaw(yaw);
            if strict {
                camera.try_set_pitch(pitch).context("invalid --pitch")?;
                camera.try_set_field_of_view(fov).context("invalid --fov")?;
            } else {
                camera.set_pitch(pitch);
                camera.set_field_of_view(fov);
            }
            print_camera(&camera);
            print_matrix("view", camera.view_matrix());
            print_matrix("projection", camera.projection_matrix());
            print_matrix("view_projection", camera.view_projection());
        }
        Commands::Fly {
            config: config_path,
            script: script_path,
            fps,
        } => {
            if fps == 0 {
                anyhow::bail!("--fps must be at least 1");
            }
            let app_config = match &config_path {
                Some(path) => AppConfig::load(path)?,
                None => AppConfig::default(),
            };
            let events = match &script_path {
                Some(path) => script::load(path)
                    .with_context(|| format!("failed to load script {}", path.display()))?,
                None => script::parse(script::DEMO_SCRIPT).context("built-in demo script")?,
            };

            let mut camera = app_config.camera();
            let mut controller = FlyController::new(app_config.controller.clone());
            tracing::info!(
                events = events.len(),
                fps,
                position = %camera.position,
                "starting fly-through"
            );

            let summary = script::replay(&events, &mut controller, &mut camera, 1.0 / fps as f32)
                .context("script replay failed")?;
            println!(
                "Replayed {} events over {} frames ({:.2}s){}",
                summary.events,
                summary.frames,
                summary.frames as f32 / fps as f32,
                if summary.quit { ", quit requested" } else { "" }
            );
            println!("Cursor grabbed: {}", controller.cursor_grabbed());
            print_camera(&camera);
            print_matrix("view_projection", camera.view_projection());
        }
    }

    Ok(())
}

fn print_camera(camera: &Camera) {
    let p = camera.position;
    println!("Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    println!(
        "Pitch: {:.3}  Yaw: {:.3}  FOV: {:.3}  Aspect: {:.4}",
        camera.pitch(),
        camera.yaw(),
        camera.field_of_view(),
        camera.aspect_ratio()
    );
    for (name, v) in [
        ("Front", camera.front()),
        ("Up", camera.up()),
        ("Right", camera.right()),
    ] {
        println!("{name}: ({:.4}, {:.4}, {:.4})", v.x, v.y, v.z);
    }
}

/// Print in row order; storage is column-major.
fn print_matrix(name: &str, m: Mat4) {
    println!("{name}:");
    for i in 0..4 {
        let r = m.row(i);
        println!("  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]", r.x, r.y, r.z, r.w);
    }
}
