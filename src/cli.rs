//! The command line interface for the simulator.

use crate::console;
use crate::input::load_scenario;
use crate::log;
use crate::planner::RoutePlanner;
use crate::predictor::OverflowPredictor;
use crate::settings::Settings;
use crate::simulation::Simulation;
use ::log::info;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Simulate a waste-collection service over a road network.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the JSON scenario file.
    data_file: PathBuf,
    /// Number of days to simulate.
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,
    /// Skip the day-by-day view and print final statistics only.
    #[arg(long)]
    no_ui: bool,
}

/// Parse CLI arguments and run the simulator.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    handle_run_command(&cli.data_file, cli.days, cli.no_ui, None)
}

/// Handle the `run` command.
///
/// # Arguments
///
/// * `data_file` - Path to the JSON scenario file
/// * `days` - Simulation duration in days
/// * `no_ui` - Suppress the day-by-day view
/// * `settings` - Program settings, loaded from disk when not provided
pub fn handle_run_command(
    data_file: &Path,
    days: u32,
    no_ui: bool,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = match settings {
        Some(settings) => settings,
        None => Settings::load().context("Failed to load settings.")?,
    };

    log::init(settings.global.log_level.as_deref()).context("Failed to initialise logging.")?;

    let scenario = load_scenario(data_file).context("Failed to load scenario.")?;
    info!(
        "Loaded {} with {} bins, {} facilities over {} nodes",
        data_file.display(),
        scenario.facilities.bin_count(),
        scenario.facilities.facility_count(),
        scenario.graph.node_count()
    );

    let planner = RoutePlanner::new(
        &scenario.graph,
        OverflowPredictor::new(settings.planner.critical_threshold_days),
        settings.planner.urgency_weight,
    );
    let mut sim = Simulation::new(&scenario.graph, scenario.facilities, planner, days);

    if no_ui {
        sim.run();
    } else {
        while !sim.is_finished() {
            sim.step();
            console::render_day(&sim);
        }
    }

    println!("{}", sim.statistics());
    Ok(())
}
