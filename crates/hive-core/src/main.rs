//! Hive Colony Simulation
//!
//! Runs the colony from the command line, streaming events to a JSONL log and
//! writing a run report when the simulation ends.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hive_core::setup::spawn_summary;
use hive_core::{
    CycleOutcome, EventLogger, HiveConfig, HiveError, HiveSimulation, SimRng, StatsCollector,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "hive_sim")]
#[command(about = "A hive colony simulation")]
struct Args {
    /// Number of cycles to simulate (overrides the config file)
    #[arg(long)]
    cycles: Option<u64>,

    /// Random seed; entropy when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between cycles in milliseconds (overrides the config file)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Tuning file; hive.toml in the working directory when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write events as JSONL to this path
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Write the run report as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

fn main() -> Result<(), HiveError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HiveConfig::load(path)?,
        None => HiveConfig::load_or_default(),
    };
    if let Some(cycles) = args.cycles {
        config.simulation.max_cycles = cycles;
    }
    if let Some(delay) = args.delay_ms {
        config.simulation.cycle_delay_ms = delay;
    }
    let max_cycles = config.simulation.max_cycles;

    let rng = match args.seed {
        Some(seed) => SimRng::seeded(seed),
        None => SimRng::from_entropy(),
    };
    let mut sim = HiveSimulation::with_rng(config, rng);

    let founders: Vec<_> = sim.organisms().cloned().collect();
    let summary = spawn_summary(&founders);
    info!(organisms = summary.total, seed = ?args.seed, max_cycles, "Spawned colony");
    for (caste, count) in &summary.by_caste {
        info!("  {}: {}", caste, count);
    }

    let mut logger = match &args.events_out {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };
    let mut collector = StatsCollector::new();
    let mut log_error = None;

    let collapse = sim.run_with(max_cycles, |sim, outcome| {
        let events = sim.drain_events();
        collector.record_events(&events);
        if outcome == CycleOutcome::Completed {
            collector.record_cycle(sim.cycle_count(), sim.hive());
        }
        if log_error.is_none() {
            if let Err(e) = logger.log_batch(&events) {
                log_error = Some(e);
            }
        }
    });

    if let Some(e) = log_error {
        return Err(e);
    }
    logger.flush()?;

    let statistics = sim.get_statistics();
    match collapse {
        Some(reason) => warn!(cycles = statistics.total_cycles, "Colony lost: {}", reason),
        None => info!(cycles = statistics.total_cycles, "Colony survived"),
    }
    info!(events = logger.event_count(), "Events recorded");

    println!("{}", statistics.to_json_pretty()?);

    if let Some(path) = &args.stats_out {
        let report = collector.finish(statistics);
        hive_core::write_report(&report, path)?;
        info!("Wrote report to {}", path.display());
    }

    Ok(())
}
