//! Project every decision CSV in a directory in parallel
//!
//! Each file is one scenario; the summary CSV has one row per scenario

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use financial_projection::{
    assumptions::load_assumptions,
    company::load_decisions,
    scenario::write_outcomes_csv,
    Assumptions, CompanyState, ProjectionConfig, ProjectionEngine, Scenario, ScenarioOutcome, ScenarioRunner,
};

#[derive(Parser)]
#[command(name = "run_scenarios", version, about = "Project many decision files and summarise the outcomes")]
struct Args {
    /// Directory holding one decision CSV per scenario
    #[arg(value_name = "DIR")]
    scenario_dir: PathBuf,

    /// JSON file overriding default assumptions
    #[arg(long, value_name = "PATH")]
    assumptions: Option<PathBuf>,

    /// Number of years to project
    #[arg(long, default_value_t = 5)]
    years: u32,

    /// Summary CSV path
    #[arg(long, short, default_value = "scenario_summary.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let assumptions = match &args.assumptions {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };

    let mut paths: Vec<PathBuf> = fs::read_dir(&args.scenario_dir)
        .with_context(|| format!("Failed to read {}", args.scenario_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();
    println!("Found {} scenario files", paths.len());

    // Unreadable files become failed outcomes rather than aborting the batch
    let loaded: Vec<(String, std::result::Result<Scenario, String>)> = paths
        .par_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let scenario = load_decisions(path, args.years)
                .map(|decisions| Scenario::new(name.clone(), decisions))
                .map_err(|e| e.to_string());
            (name, scenario)
        })
        .collect();

    let config = ProjectionConfig {
        projection_years: args.years,
        ..Default::default()
    };
    let runner = ScenarioRunner::new(ProjectionEngine::new(assumptions, config), CompanyState::initial());

    let scenarios: Vec<Scenario> = loaded
        .iter()
        .filter_map(|(_, s)| s.as_ref().ok().cloned())
        .collect();
    let mut projected = runner.run_all(&scenarios).into_iter();

    let outcomes: Vec<ScenarioOutcome> = loaded
        .into_iter()
        .filter_map(|(name, scenario)| match scenario {
            Ok(_) => projected.next(),
            Err(message) => Some(ScenarioOutcome::failed(&name, message)),
        })
        .collect();

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    write_outcomes_csv(&outcomes, BufWriter::new(file)).context("Failed to write scenario summary")?;

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    println!("Projected {} scenarios ({} failed) in {:?}", outcomes.len(), failed, start.elapsed());
    println!("Summary written to {}", args.output.display());
    Ok(())
}
