//! sandbox: command-line driver for the route_sandbox dispatch simulator.
//!
//! Generates a jittered grid road network, scatters passenger stops and
//! vehicles over it, runs the pickup simulation until it pauses itself and
//! prints a summary.  `--compare` replays the same scenario under every
//! dispatch strategy.
//!
//! ```text
//! sandbox --rows 8 --cols 10 --stops 30 --vehicles 4 --strategy best-ratio
//! sandbox --config scenario.json --compare --out output/sandbox
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rsb_dispatch::StrategyKind;
use rsb_output::{CsvWriter, SimOutputObserver, export_network_json};
use rsb_sim::{NoopObserver, Scenario, ScenarioConfig, SessionStats, Simulation, StopReason};

#[cfg(test)]
mod tests;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "sandbox=info,rsb_sim=info";

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON scenario file; flags below override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grid rows.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rows: Option<u32>,

    /// Grid columns.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    cols: Option<u32>,

    /// Random shortcut roads added on top of the grid.
    #[arg(long, value_name = "N")]
    extra_edges: Option<u32>,

    /// Number of passenger stops.
    #[arg(long, value_name = "N")]
    stops: Option<usize>,

    /// Number of vehicles.
    #[arg(long, value_name = "N")]
    vehicles: Option<usize>,

    /// nearest | most-passengers | best-ratio | weighted-random
    #[arg(long)]
    strategy: Option<StrategyKind>,

    #[arg(long)]
    seed: Option<u64>,

    /// Hard cap on session length.
    #[arg(long, value_name = "TICKS")]
    max_ticks: Option<u64>,

    /// Canvas units per tick.
    #[arg(long)]
    speed: Option<f32>,

    /// Seats per vehicle.
    #[arg(long)]
    capacity: Option<u32>,

    /// Write `network.json` and per-strategy CSV files here.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Run every strategy on the same scenario.
    #[arg(long)]
    compare: bool,
}

impl Args {
    /// File (or default) scenario with command-line overrides applied.
    fn scenario_config(&self) -> Result<ScenarioConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ScenarioConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(extra) = self.extra_edges {
            config.grid.extra_edges = extra;
        }
        if let Some(stops) = self.stops {
            config.stops = stops;
        }
        if let Some(vehicles) = self.vehicles {
            config.vehicles = vehicles;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(seed) = self.seed {
            config.sim.seed = seed;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.sim.max_ticks = max_ticks;
        }
        if let Some(speed) = self.speed {
            config.sim.vehicle_speed = speed;
        }
        if let Some(capacity) = self.capacity {
            config.sim.vehicle_capacity = capacity;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<ScenarioConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing scenario file {}", path.display()))
}

// ── Running ───────────────────────────────────────────────────────────────────

/// One strategy's outcome.
struct RunSummary {
    strategy: StrategyKind,
    reason:   StopReason,
    stats:    SessionStats,
    secs:     f64,
}

fn run_strategy(scenario: &Scenario, kind: StrategyKind, out: Option<&Path>) -> Result<(Simulation, RunSummary)> {
    let mut sim = scenario.simulation_with(kind)?;

    let t0 = Instant::now();
    let reason = match out {
        Some(dir) => {
            let writer = CsvWriter::new(&dir.join(kind.as_str()))?;
            let mut obs = SimOutputObserver::new(writer);
            let reason = sim.run(&mut obs);
            if let Some(e) = obs.take_error() {
                return Err(e).context("writing CSV output");
            }
            reason
        }
        None => sim.run(&mut NoopObserver),
    };
    let secs = t0.elapsed().as_secs_f64();

    info!(strategy = %kind, %reason, ticks = sim.stats().ticks, "run finished");
    let summary = RunSummary { strategy: kind, reason, stats: sim.stats().clone(), secs };
    Ok((sim, summary))
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_summary_table(rows: &[RunSummary]) {
    println!(
        "{:<16} {:<20} {:>7} {:>10} {:>7} {:>6} {:>6} {:>10} {:>8}",
        "Strategy", "Paused", "Ticks", "Distance", "Picked", "Stops", "Left", "Efficiency", "Secs"
    );
    println!("{}", "-".repeat(98));
    for r in rows {
        println!(
            "{:<16} {:<20} {:>7} {:>10.1} {:>7} {:>6} {:>6} {:>10.2} {:>8.3}",
            r.strategy.as_str(),
            r.reason.as_str(),
            r.stats.ticks,
            r.stats.distance,
            r.stats.passengers_picked,
            r.stats.stops_visited,
            r.stats.left_behind,
            r.stats.efficiency(),
            r.secs,
        );
    }
}

fn print_fleet_table(sim: &Simulation) {
    println!("{:<8} {:<10} {:<16} {:>6} {:>9} {:>7} {:>10}", "Vehicle", "Label", "Position", "Load", "Status", "Stops", "Distance");
    println!("{}", "-".repeat(72));
    for v in sim.vehicles() {
        println!(
            "{:<8} {:<10} {:<16} {:>3}/{:<2} {:>9} {:>7} {:>10.1}",
            v.id.0,
            v.label,
            v.pos.to_string(),
            v.load,
            v.capacity,
            v.status.as_str(),
            v.stops_visited,
            v.distance,
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = args.scenario_config()?;

    // 1. Generate the network, stops and fleet once.
    let scenario = config.generate()?;
    let supply: u64 = scenario.stops.iter().map(|s| u64::from(s.initial_passengers)).sum();
    println!("=== route_sandbox ===");
    println!(
        "Grid {}x{} | nodes {} | roads {} | stops {} ({} passengers) | vehicles {} | seed {}",
        config.grid.rows,
        config.grid.cols,
        scenario.network.node_count(),
        scenario.network.roads().count(),
        scenario.stops.len(),
        supply,
        scenario.vehicles.len(),
        config.sim.seed,
    );
    println!();

    // 2. Network export.
    if let Some(dir) = &args.out {
        let path = dir.join("network.json");
        export_network_json(&scenario.network, &scenario.stops, &path)?;
        println!("Wrote {}", path.display());
    }

    // 3. Run.
    let kinds: Vec<StrategyKind> = if args.compare {
        StrategyKind::all().to_vec()
    } else {
        vec![config.strategy]
    };
    let mut summaries = Vec::with_capacity(kinds.len());
    let mut last = None;
    for kind in kinds {
        let (sim, summary) = run_strategy(&scenario, kind, args.out.as_deref())?;
        summaries.push(summary);
        last = Some(sim);
    }

    // 4. Summary.
    print_summary_table(&summaries);
    if !args.compare {
        if let Some(sim) = &last {
            println!();
            print_fleet_table(sim);
        }
    }

    Ok(())
}
