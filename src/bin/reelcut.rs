use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reelcut", version)]
struct Cli {
    /// Log placement and session activity at debug level.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a timeline document and report whether it is consistent.
    Check(CheckArgs),
    /// Print the zoom level that fits the whole timeline into a viewport.
    Fit(FitArgs),
    /// Print the canonical clip snapshot as JSON.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input timeline document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Editor options JSON (defaults apply when omitted).
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Input timeline document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport width in pixels.
    #[arg(long)]
    width: f64,

    /// Editor options JSON (defaults apply when omitted).
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input timeline document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "reelcut=debug" } else { "reelcut=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_session(in_path: &Path, opts: Option<&Path>) -> anyhow::Result<reelcut::EditorSession> {
    let opts = match opts {
        Some(p) => reelcut::EditorOpts::from_path(p)
            .with_context(|| format!("load editor options '{}'", p.display()))?,
        None => reelcut::EditorOpts::default(),
    };
    let doc = reelcut::TimelineDocument::from_path(in_path)
        .with_context(|| format!("load timeline '{}'", in_path.display()))?;
    let session = reelcut::EditorSession::from_document(&doc, opts)
        .with_context(|| format!("open timeline '{}'", in_path.display()))?;
    Ok(session)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path, args.opts.as_deref())?;
    let model = session.model();
    model
        .check_invariants()
        .with_context(|| format!("check timeline '{}'", args.in_path.display()))?;

    println!(
        "ok: {} tracks, {} clips, total duration {:.3}s",
        model.tracks().len(),
        model.clips().len(),
        model.total_duration_sec()
    );
    for track in model.tracks() {
        println!(
            "  {:<8} {:>4} clip(s)  [{}]",
            track.kind,
            model.clips_on_track(track.id).len(),
            track.name
        );
    }
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.in_path, args.opts.as_deref())?;
    session
        .set_viewport_width(args.width)
        .context("set viewport width")?;
    let zoom = session.zoom_to_fit();
    println!("{zoom:.6}");
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let session = open_session(&args.in_path, None)?;
    let json =
        serde_json::to_string_pretty(&session.snapshot()).context("serialize clip snapshot")?;
    println!("{json}");
    Ok(())
}
