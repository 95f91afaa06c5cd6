use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "turtle-canvas", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a drawing program to completion and write the final frame as PNG.
    Render(RenderArgs),
    /// Print the commands a drawing program queues, without animating.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Logical surface width.
    #[arg(long, default_value_t = 400, conflicts_with = "layout_width")]
    width: u32,

    /// Logical surface height.
    #[arg(long, default_value_t = 360, conflicts_with = "layout_width")]
    height: u32,

    /// Size the surface from a hosting container width instead (page layout rule).
    #[arg(long)]
    layout_width: Option<f64>,

    /// Device pixel ratio of the backing store.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

impl SurfaceArgs {
    fn desc(&self) -> turtle_canvas::SurfaceDesc {
        let desc = match self.layout_width {
            Some(w) => turtle_canvas::SurfaceDesc::from_layout(w, 1.0),
            None => turtle_canvas::SurfaceDesc::new(self.width, self.height),
        };
        desc.with_device_scale(self.scale)
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Drawing program JSON (array of host calls).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path for the final frame.
    #[arg(long)]
    out: PathBuf,

    /// Also write intermediate frames into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Write every N-th intermediate frame.
    #[arg(long = "every", default_value_t = 1)]
    every: u64,

    /// Stop after this many frames.
    #[arg(long, default_value_t = 1_000_000)]
    max_frames: u64,

    /// Complete every command in a single frame.
    #[arg(long)]
    instant: bool,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    surface: SurfaceArgs,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Drawing program JSON (array of host calls).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    surface: SurfaceArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn read_program(path: &Path) -> anyhow::Result<Vec<turtle_canvas::HostCall>> {
    let f = File::open(path).with_context(|| format!("open program '{}'", path.display()))?;
    let r = BufReader::new(f);
    let program: Vec<turtle_canvas::HostCall> =
        serde_json::from_reader(r).with_context(|| "parse program JSON")?;
    Ok(program)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<turtle_canvas::EngineConfig> {
    let cfg = match path {
        Some(p) => turtle_canvas::EngineConfig::from_json_path(p)?,
        None => turtle_canvas::EngineConfig::default(),
    };
    Ok(cfg.with_env_overrides())
}

/// Bind an engine, run the program through the bridge, and hand back the shared engine.
fn prepare(
    cfg: turtle_canvas::EngineConfig,
    surface: &SurfaceArgs,
    program: &[turtle_canvas::HostCall],
) -> anyhow::Result<turtle_canvas::SharedEngine> {
    let mut engine = turtle_canvas::TurtleEngine::new(cfg);
    engine
        .init(surface.desc())
        .with_context(|| "bind drawing surface")?;
    let shared = turtle_canvas::SharedEngine::new(engine);
    turtle_canvas::Bridge::new(shared.clone()).dispatch_all(program);
    Ok(shared)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let program = read_program(&args.in_path)?;
    let mut cfg = load_config(args.config.as_deref())?;
    if args.instant {
        cfg.playback.mode = turtle_canvas::PlaybackMode::Instant;
    }
    let shared = prepare(cfg, &args.surface, &program)?;
    let mut engine = shared.lock();

    let opts = turtle_canvas::PlaybackOpts {
        every_nth: args.every,
        max_frames: args.max_frames,
    };
    let stats = match &args.frames_dir {
        Some(dir) => {
            let mut sink = turtle_canvas::PngSequenceSink::new(dir);
            let stats = engine.play_into(&mut sink, opts)?;
            let fps = engine.config().fps;
            eprintln!(
                "wrote {} frames to {} ({:.2}s at {} fps)",
                stats.frames_written,
                dir.display(),
                fps.frames_to_secs(stats.frames_played),
                fps.as_f64()
            );
            stats
        }
        None => {
            let frames = engine.run_until_idle(args.max_frames)?;
            turtle_canvas::PlaybackStats {
                frames_played: frames,
                frames_written: 0,
                idle: !engine.is_playing(),
            }
        }
    };
    if !stats.idle {
        eprintln!(
            "warning: stopped after {} frames with {} commands pending",
            stats.frames_played,
            engine.pending_commands()
        );
    }

    let frame = engine
        .frame()?
        .with_context(|| "engine lost its surface")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    turtle_canvas::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[derive(serde::Serialize)]
struct Plan<'a> {
    commands: Vec<&'a turtle_canvas::AnimationCommand>,
    position: turtle_canvas::Point,
    heading: f64,
    pen_down: bool,
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let program = read_program(&args.in_path)?;
    let cfg = load_config(args.config.as_deref())?;
    let shared = prepare(cfg, &args.surface, &program)?;
    let engine = shared.lock();
    let turtle = engine
        .turtle()
        .with_context(|| "engine lost its surface")?;

    let plan = Plan {
        commands: engine.queued_commands().collect(),
        position: turtle.position(),
        heading: turtle.heading(),
        pen_down: turtle.pen().down,
    };
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
