use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crossplot", version)]
struct Cli {
    /// Configuration JSON. Missing fields take their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the normalized dataset as JSON.
    Dataset,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output directory for the PNG sequence.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(long)]
    frames: Option<u32>,

    /// Render chunks of frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel` (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Frame index (0-based).
    #[arg(long)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        None => cmd_render(config, cli.render),
        Some(Command::Frame(args)) => cmd_frame(&config, args),
        Some(Command::Dataset) => cmd_dataset(&config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<crossplot::CrossPlotConfig> {
    let config = match path {
        Some(p) => crossplot::CrossPlotConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => crossplot::CrossPlotConfig::default(),
    };
    Ok(config)
}

fn cmd_render(mut config: crossplot::CrossPlotConfig, args: RenderArgs) -> anyhow::Result<()> {
    if let Some(out) = args.out {
        config.out_dir = out;
    }
    if let Some(frames) = args.frames {
        config.frame_count = frames;
    }
    let raw = config.load_dataset()?;
    let out_dir = config.out_dir.clone();

    let mut driver =
        crossplot::AnimationDriver::new(config)?.with_threading(crossplot::RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
            ..crossplot::RenderThreading::default()
        });
    let mut sink = crossplot::PngSequenceSink::new(&out_dir);
    let stats = driver
        .run(raw, &mut sink)
        .with_context(|| format!("render animation into '{}'", out_dir.display()))?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_written,
        out_dir.display()
    );
    Ok(())
}

fn cmd_frame(config: &crossplot::CrossPlotConfig, args: FrameArgs) -> anyhow::Result<()> {
    let raw = config.load_dataset()?;
    let frame = crossplot::render_single_frame(config, raw, crossplot::FrameIndex(args.index))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    crossplot::write_png(&args.out, &frame.raster)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dataset(config: &crossplot::CrossPlotConfig) -> anyhow::Result<()> {
    config.validate()?;
    let raw = config.load_dataset()?;
    raw.check_position(config.position)?;
    let data = raw.normalize(config.columns, config.scale)?;
    let json = serde_json::to_string_pretty(&data).context("serialize dataset")?;
    println!("{json}");
    Ok(())
}
