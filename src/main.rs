mod replay;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use canvas::config::{ConfigError, ViewerConfig};
use canvas::engine::{Action, EngineCore};
use canvas::layout::{FileSource, LayoutSource, LoadError};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid viewer configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floorview", about = "Headless floor-plan viewer")]
struct Cli {
    /// Layout document to load.
    #[arg(long, env = "FLOORVIEW_LAYOUT")]
    layout: Option<PathBuf>,

    /// Viewport width in CSS pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in CSS pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print scene bounds, the fitted camera, and object counts.
    Inspect,
    /// Run a search and jump through its matches.
    Search {
        query: String,
        /// Advance to the next match this many times.
        #[arg(long, default_value_t = 0)]
        next: usize,
    },
    /// List the ids of objects visible in the fitted view.
    Visible,
    /// Print the draw list for the fitted view.
    Render,
    /// Replay a JSON script of input events and print the outcome.
    Replay { script: PathBuf },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectReport {
    layout: String,
    objects: usize,
    walls: usize,
    skus: usize,
    layers: Vec<String>,
    bounds: canvas::geometry::Aabb,
    camera: canvas::camera::Camera,
    backing_size: (f64, f64),
    visible: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchReport {
    query: String,
    matches: Vec<String>,
    status: String,
    current: Option<String>,
    camera: canvas::camera::Camera,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "floorview failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = ViewerConfig::from_env()?;
    let source = FileSource::new(cli.layout);
    let mut core = EngineCore::with_config(config);
    core.set_viewport(cli.width, cli.height, cli.dpr);

    let text = source.fetch()?;
    let actions = core.load_scene(&text)?;
    report(&actions);

    match cli.command {
        Command::Inspect => print_json(&inspect(&core, &source)),
        Command::Search { query, next } => run_search(&mut core, &query, next),
        Command::Visible => print_json(&core.visible_ids()),
        Command::Render => print_json(&core.render_plan()),
        Command::Replay { script } => run_replay(&mut core, script),
    }
}

fn inspect(core: &EngineCore, source: &FileSource) -> InspectReport {
    let layers: BTreeSet<String> = core.store.iter().filter_map(|o| o.layer.clone()).collect();
    let camera = core.camera();
    InspectReport {
        layout: source.describe(),
        objects: core.store.len(),
        walls: core.store.iter().filter(|o| o.is_wall()).count(),
        skus: core.skus.len(),
        layers: layers.into_iter().collect(),
        bounds: core.bounds(),
        camera,
        backing_size: camera.backing_size(),
        visible: core.visible_ids().len(),
    }
}

fn run_search(core: &mut EngineCore, query: &str, next: usize) -> Result<(), CliError> {
    let (_, actions) = core.search(query);
    report(&actions);
    for _ in 0..next {
        let (_, actions) = core.next_match();
        report(&actions);
    }
    print_json(&SearchReport {
        query: query.to_owned(),
        matches: core.search.matches().to_vec(),
        status: core.search.status().to_string(),
        current: core.search.current().cloned(),
        camera: core.camera(),
    })
}

fn run_replay(core: &mut EngineCore, script: PathBuf) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&script).map_err(|source| CliError::Io { path: script.display().to_string(), source })?;
    let events = replay::parse_script(&text)?;
    tracing::info!(events = events.len(), script = %script.display(), "replaying script");
    print_json(&replay::run(core, &events))
}

/// Log the user-facing notifications in `actions`.
fn report(actions: &[Action]) {
    for action in actions {
        if let Action::Notify(msg) = action {
            tracing::info!(%msg, "notification");
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
