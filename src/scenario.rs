//! Batch runs over independent decision schedules
//!
//! Each scenario is projected on its own, start to finish; only separate
//! scenarios run in parallel.

use std::io::Write;

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::company::DecisionSchedule;
use crate::error::Result;
use crate::projection::{CompanyState, ProjectionEngine, ProjectionResult};

/// A named decision schedule to project
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub decisions: DecisionSchedule,
}

impl Scenario {
    pub fn new(name: impl Into<String>, decisions: DecisionSchedule) -> Self {
        Self {
            name: name.into(),
            decisions,
        }
    }
}

/// Final-year headline figures for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub years: u32,
    pub final_cash: f64,
    pub final_overdraft: f64,
    pub cumulative_net_income: f64,
    pub cumulative_dividends: f64,
    pub final_equity: f64,
    /// Error text when the projection failed
    pub error: Option<String>,
}

impl ScenarioOutcome {
    fn from_result(name: &str, result: &ProjectionResult) -> Self {
        let sheet = &result.final_state.balance_sheet;
        Self {
            scenario: name.to_string(),
            years: result.years.len() as u32,
            final_cash: sheet.cash,
            final_overdraft: sheet.bank_overdraft,
            cumulative_net_income: result.total_net_income(),
            cumulative_dividends: result.total_dividends(),
            final_equity: sheet.total_equity(),
            error: None,
        }
    }

    pub fn failed(name: &str, message: String) -> Self {
        Self {
            scenario: name.to_string(),
            years: 0,
            final_cash: 0.0,
            final_overdraft: 0.0,
            cumulative_net_income: 0.0,
            cumulative_dividends: 0.0,
            final_equity: 0.0,
            error: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Projects many scenarios from a shared starting state
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    initial: CompanyState,
}

impl ScenarioRunner {
    pub fn new(engine: ProjectionEngine, initial: CompanyState) -> Self {
        Self { engine, initial }
    }

    /// Project one scenario
    pub fn run_one(&self, scenario: &Scenario) -> Result<ProjectionResult> {
        self.engine.project(&self.initial, &scenario.decisions)
    }

    /// Project every scenario in parallel. Output order matches input order;
    /// a failing scenario yields an outcome carrying its error.
    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| match self.run_one(scenario) {
                Ok(result) => ScenarioOutcome::from_result(&scenario.name, &result),
                Err(e) => {
                    warn!("Scenario {} failed: {}", scenario.name, e);
                    ScenarioOutcome::failed(&scenario.name, e.to_string())
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        info!("Projected {} scenarios ({} failed)", outcomes.len(), failed);
        outcomes
    }
}

/// Write one CSV row per scenario
pub fn write_outcomes_csv<W: Write>(outcomes: &[ScenarioOutcome], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        wtr.serialize(outcome)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::company::YearDecisions;
    use crate::projection::ProjectionConfig;
    use approx::assert_relative_eq;

    fn runner() -> ScenarioRunner {
        let engine = ProjectionEngine::new(Assumptions::default(), ProjectionConfig::default());
        ScenarioRunner::new(engine, CompanyState::initial())
    }

    #[test]
    fn test_run_all_keeps_order_and_isolates_failures() {
        let reference = DecisionSchedule::carry_forward_from(YearDecisions::default(), 5);
        let short = DecisionSchedule::carry_forward_from(YearDecisions::default(), 2);
        let cheap = DecisionSchedule::carry_forward_from(
            YearDecisions {
                price: 35.0,
                ..Default::default()
            },
            5,
        );
        let scenarios = vec![
            Scenario::new("reference", reference),
            Scenario::new("short", short),
            Scenario::new("cheap", cheap),
        ];

        let outcomes = runner().run_all(&scenarios);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].scenario, "reference");
        assert!(outcomes[0].is_ok());
        assert_eq!(outcomes[0].years, 5);
        assert_relative_eq!(outcomes[0].final_cash, 1_089_388.888_889, max_relative = 1e-9);
        assert_eq!(outcomes[0].final_overdraft, 0.0);
        assert_relative_eq!(outcomes[0].cumulative_dividends, 12_500.0);

        assert_eq!(outcomes[1].scenario, "short");
        assert!(!outcomes[1].is_ok());
        assert_eq!(outcomes[1].years, 0);

        assert_eq!(outcomes[2].scenario, "cheap");
        assert!(outcomes[2].is_ok());
        assert!(outcomes[2].cumulative_net_income < outcomes[0].cumulative_net_income);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = runner();
        let scenario = Scenario::new(
            "reference",
            DecisionSchedule::carry_forward_from(YearDecisions::default(), 5),
        );
        let direct = runner.run_one(&scenario).unwrap();
        let outcome = &runner.run_all(std::slice::from_ref(&scenario))[0];

        assert_eq!(outcome.final_cash, direct.final_state.balance_sheet.cash);
        assert_eq!(outcome.final_equity, direct.final_state.balance_sheet.total_equity());
    }

    #[test]
    fn test_write_outcomes_csv() {
        let outcomes = runner().run_all(&[Scenario::new(
            "reference",
            DecisionSchedule::carry_forward_from(YearDecisions::default(), 5),
        )]);
        let mut buf = Vec::new();
        write_outcomes_csv(&outcomes, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("scenario,years,final_cash,final_overdraft,cumulative_net_income,cumulative_dividends,final_equity,error")
        );
        assert!(lines.next().is_some_and(|l| l.starts_with("reference,5,")));
    }
}
