//! Riskpath - plan a risk-weighted route across generated terrain and fly it.

use anyhow::{bail, Context, Result};
use clap::Parser;
use riskpath_cli::loops::mission_loop::{run_mission_loop, LoopSettings};
use riskpath_cli::{complete_endpoints, render, Config};
use riskpath_core::{
    ClickOutcome, MissionSession, MissionSummary, Point, RouteEngineConfig, RouteSummary,
    TerrainSession,
};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate terrain, search routes between two cells and play one back
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Grid side length (overrides RISKPATH_GRID_SIZE)
    #[arg(long)]
    size: Option<usize>,

    /// Terrain seed (overrides RISKPATH_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between mission ticks (overrides RISKPATH_TICK_MS)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Start cell as x,y; random passable cell if omitted
    #[arg(long)]
    start: Option<Point>,

    /// End cell as x,y; random passable cell if omitted
    #[arg(long)]
    end: Option<Point>,

    /// Index of the route to fly
    #[arg(long, default_value_t = 0)]
    route: usize,

    /// Pause the mission after this many ticks
    #[arg(long)]
    pause_after: Option<usize>,

    /// How long to stay paused
    #[arg(long, default_value_t = 2000)]
    pause_ms: u64,

    /// Stop the mission after this many ticks
    #[arg(long)]
    stop_after: Option<usize>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Draw the terrain with the selected route
    #[arg(long)]
    show_grid: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    grid_size: usize,
    start: Point,
    end: Point,
    routes: &'a [RouteSummary],
    selected: usize,
    summary: &'a MissionSummary,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays clean for the report
    tracing_subscriber::registry()
        .with(args.log_json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!args.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("riskpath=info".parse()?))
        .init();

    let config = Config::from_env().with_overrides(args.size, args.seed, args.tick_ms);
    tracing::info!(?config, "Starting riskpath");

    let mut session = TerrainSession::generate(&config.terrain(), RouteEngineConfig::default())?;
    let mut mission = MissionSession::new();

    let (start, end) = complete_endpoints(session.grid(), args.start, args.end, &mut rand::rng())
        .context("terrain has too few passable cells to pick an endpoint")?;
    for point in [start, end] {
        if session.click(point) == ClickOutcome::Ignored {
            bail!("{point} is outside the {0}x{0} grid", session.grid().size());
        }
    }

    let now = chrono::Utc::now();
    session
        .find_routes(&mut mission, now)
        .with_context(|| format!("route search from {start} to {end}"))?;
    session.select_route(args.route, &mission)?;
    let routes = session.route_summaries();

    if !args.json {
        println!("Terrain {0}x{0}, {start} -> {end}", session.grid().size());
        println!();
        print!("{}", render::render_route_table(&routes, session.selected_index()));
        println!();
    }
    if args.show_grid && !args.json {
        let path = session.selected_route().map(|route| route.path.as_slice()).unwrap_or(&[]);
        print!("{}", render::render_grid(session.grid(), Some(start), Some(end), path, None));
        println!();
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let ctrl_c_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C");
            let _ = ctrl_c_tx.send(());
        }
    });

    let settings = LoopSettings {
        tick_interval: config.tick_interval(),
        pause_after: args.pause_after,
        pause_for: Duration::from_millis(args.pause_ms),
        stop_after: args.stop_after,
    };
    let quiet = args.json;
    let summary = run_mission_loop(&session, &mut mission, settings, shutdown_rx, |snapshot| {
        if !quiet {
            println!("{}", render::render_progress(snapshot));
        }
    })
    .await?;
    drop(shutdown_tx);

    if args.json {
        let report = Report {
            grid_size: session.grid().size(),
            start,
            end,
            routes: &routes,
            selected: args.route,
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        print!("{}", render::render_summary(&summary));
    }

    Ok(())
}
