//! Run a multi-year projection for one decision file
//!
//! Writes one CSV row per projected year and prints a short summary

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use financial_projection::{
    assumptions::load_assumptions,
    company::load_decisions,
    Assumptions, CompanyState, ProjectionConfig, ProjectionEngine,
};

#[derive(Parser)]
#[command(name = "run_projection", version, about = "Project the company's statements year by year")]
struct Args {
    /// CSV file of yearly decisions (year,price,target_production,...)
    #[arg(value_name = "DECISIONS")]
    decisions: PathBuf,

    /// JSON file overriding default assumptions
    #[arg(long, value_name = "PATH")]
    assumptions: Option<PathBuf>,

    /// Number of years to project
    #[arg(long, default_value_t = 5)]
    years: u32,

    /// Year index of the scheduled debt repayment (0 disables it)
    #[arg(long, default_value_t = 2)]
    repayment_year: u32,

    /// Output CSV path
    #[arg(long, short, default_value = "projection_output.csv")]
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
    let schedule = load_decisions(&args.decisions, args.years)
        .with_context(|| format!("Failed to load decisions from {}", args.decisions.display()))?;

    let config = ProjectionConfig {
        projection_years: args.years,
        debt_repayment_year: (args.repayment_year > 0).then_some(args.repayment_year),
        ..Default::default()
    };
    let engine = ProjectionEngine::new(assumptions, config);
    let result = engine
        .project(&CompanyState::initial(), &schedule)
        .context("Projection failed")?;

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    result.write_csv(BufWriter::new(file)).context("Failed to write projection output")?;
    println!("Output written to {}", args.output.display());

    println!("\nYear  | Net income   | Net cash     | Equity       | ROE     | Lines");
    for y in &result.years {
        let bs = &y.closing_balance_sheet;
        println!(
            "{:5} | {:12.0} | {:12.0} | {:12.0} | {:7.4} | {}",
            y.label,
            y.income.net_income,
            y.cash_flow.ending_net_cash,
            bs.total_equity(),
            y.ratios.return_on_equity,
            y.fleet_flow.ending_lines,
        );
    }
    println!("\nCumulative net income: {:.0}", result.total_net_income());
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
