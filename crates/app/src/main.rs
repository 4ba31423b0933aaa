use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use hero_scene_core::{
    CameraSetup, FrameSignals, FrameSink, GroupKind, OrbitCamera, RenderLoop, SceneConfig,
    SceneFrame, SceneLayout, Session,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn main() -> hero_scene_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            frames,
            explore_at,
            json,
        } => run_headless(config, frames, explore_at, json),
        Commands::Snapshot {
            time,
            explore,
            output,
        } => write_snapshot(config, time, explore, &output),
        Commands::HeartMesh { output } => write_heart_mesh(config, &output),
    }
}

fn load_config(path: Option<&Path>) -> hero_scene_core::Result<SceneConfig> {
    match path {
        Some(path) => {
            tracing::info!(?path, "loading scene config");
            SceneConfig::from_path(path)
        }
        None => Ok(SceneConfig::default()),
    }
}

fn run_headless(
    config: SceneConfig,
    frames: u64,
    explore_at: Option<u64>,
    json: bool,
) -> hero_scene_core::Result<()> {
    tracing::info!(frames, ?explore_at, fps = config.render.fps, "starting headless render loop");

    let mut render = RenderLoop::from_config(&config.render)?;
    let mut session = Session::new(config)?;
    let mut sink = ConsoleSink::new(json, &session);

    render.run(&mut session, frames, &mut sink, |number, session| {
        if explore_at == Some(number) {
            session.enter_exploration();
        }
    })?;

    tracing::info!(
        frames = render.frames_presented(),
        status = ?session.status(),
        "render loop stopped"
    );
    Ok(())
}

fn write_snapshot(
    config: SceneConfig,
    time: f32,
    explore: bool,
    output: &Path,
) -> hero_scene_core::Result<()> {
    let mut session = Session::new(config)?;
    if explore {
        session.enter_exploration();
    }
    let (frame, _) = session.frame(time);
    tracing::info!(?output, time, objects = frame.object_count(), "writing snapshot");
    let snapshot = Snapshot {
        layout: session.layout(),
        frame: &frame,
    };
    write_json(output, &snapshot)
}

/// Layout (heart mesh and starfield points included) next to the frame
/// composed from it.
#[derive(Serialize)]
struct Snapshot<'a> {
    layout: &'a SceneLayout,
    frame: &'a SceneFrame,
}

fn write_heart_mesh(config: SceneConfig, output: &Path) -> hero_scene_core::Result<()> {
    let session = Session::new(config)?;
    let mesh = &session.layout().heart_mesh;
    tracing::info!(?output, triangles = mesh.triangle_count(), "writing heart mesh");
    write_json(output, mesh)
}

fn write_json<T: Serialize>(output: &Path, value: &T) -> hero_scene_core::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(output, text)?;
    Ok(())
}

/// Stands in for a display: logs a frame summary or emits one JSON line per
/// frame, and drives an orbit camera the way an interactive viewer would.
struct ConsoleSink {
    json: bool,
    orbit: OrbitCamera,
    last_elapsed: f32,
}

impl ConsoleSink {
    fn new(json: bool, session: &Session) -> Self {
        let setup = CameraSetup::from_config(&session.config().camera);
        Self {
            json,
            orbit: OrbitCamera::from_setup(&setup),
            last_elapsed: 0.0,
        }
    }
}

#[derive(Serialize)]
struct FrameLine<'a> {
    signals: FrameSignals,
    eye: [f32; 3],
    frame: &'a SceneFrame,
}

impl FrameSink for ConsoleSink {
    fn present(
        &mut self,
        frame: &SceneFrame,
        signals: FrameSignals,
    ) -> hero_scene_core::Result<()> {
        let dt = (frame.elapsed - self.last_elapsed).max(0.0);
        self.last_elapsed = frame.elapsed;
        self.orbit.advance(dt, &frame.controls);

        if signals.just_loaded {
            tracing::info!("scene loaded");
        }

        if self.json {
            let line = FrameLine {
                signals,
                eye: self.orbit.eye().to_array(),
                frame,
            };
            let mut stdout = io::stdout().lock();
            serde_json::to_writer(&mut stdout, &line)?;
            stdout.write_all(b"\n")?;
            return Ok(());
        }

        let heart_scale = frame
            .group(GroupKind::Heart)
            .map(|heart| heart.delta.scale)
            .unwrap_or(1.0);
        tracing::debug!(
            elapsed = frame.elapsed,
            heart_scale,
            overlay = frame.overlay_visible,
            controls = frame.controls.enabled,
            eye = ?self.orbit.eye(),
            "frame"
        );
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Decorative 3D hero scene, rendered headless",
    long_about = None
)]
struct Cli {
    /// Optional JSON scene configuration.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the scene for a number of frames at the configured rate.
    Run {
        #[arg(short, long, default_value_t = 300)]
        frames: u64,
        /// Frame at which the "start exploring" event is delivered.
        #[arg(short, long)]
        explore_at: Option<u64>,
        /// Emit every frame as a JSON line on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Compose a single frame and write it as JSON.
    Snapshot {
        /// Elapsed session time in seconds.
        #[arg(short, long, default_value_t = 0.0)]
        time: f32,
        /// Compose the frame in exploration mode.
        #[arg(long)]
        explore: bool,
        output: PathBuf,
    },
    /// Write the extruded heart mesh as JSON.
    HeartMesh { output: PathBuf },
}
