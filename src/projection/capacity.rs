//! Capacity planning: turn a production target into achievable output
//!
//! Two independent constraints apply, production lines and workers. Each is
//! topped up with the minimum whole number of lines / hires needed to reach
//! the target. Capacity is never shed when the target falls.

use log::debug;

use crate::assumptions::ProductionAssumptions;
use crate::company::{LineFleet, Workforce};
use crate::error::{ProjectionError, Result};

/// Outcome of capacity planning for one year
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityPlan {
    pub target_production: f64,

    /// Lines at the start of the year
    pub opening_lines: u32,
    pub opening_line_capacity: f64,

    /// New lines bought this year
    pub lines_purchased: u32,
    /// Lines working this year, including purchases and lines about to be scrapped
    pub lines_in_service: u32,
    pub line_capacity: f64,

    pub workers_hired: u32,
    /// Workforce for the year, hires included
    pub workforce: Workforce,
    pub worker_capacity: f64,

    /// Units actually produced: min(target, line capacity, worker capacity)
    pub production: f64,

    /// Cash spent on new lines (investing outflow, positive amount)
    pub investment: f64,
}

/// Smallest whole number of units of `per_unit` capacity that closes the gap
/// between `capacity` and `target`. None when that number exceeds `u32`.
fn units_to_close_gap(target: f64, capacity: f64, per_unit: f64) -> Option<u32> {
    if target <= capacity {
        return Some(0);
    }
    let units = ((target - capacity) / per_unit).ceil();
    if units <= u32::MAX as f64 {
        Some(units as u32)
    } else {
        None
    }
}

/// Plan lines, hires and production for a year
pub fn plan_capacity(
    target_production: f64,
    fleet: &LineFleet,
    workforce: Workforce,
    production: &ProductionAssumptions,
) -> Result<CapacityPlan> {
    let out_of_range = |resource: &'static str| ProjectionError::CapacityOutOfRange {
        resource,
        target_production,
    };

    let opening_lines = fleet.total();
    let opening_line_capacity = production.line_capacity(opening_lines);

    let lines_purchased = units_to_close_gap(target_production, opening_line_capacity, production.units_per_line)
        .ok_or_else(|| out_of_range("lines"))?;
    let lines_in_service = opening_lines
        .checked_add(lines_purchased)
        .ok_or_else(|| out_of_range("lines"))?;
    let line_capacity = production.line_capacity(lines_in_service);
    let investment = lines_purchased as f64 * production.cost_per_line;
    if lines_purchased > 0 {
        debug!("Purchasing {} new lines ({:.0} invested)", lines_purchased, investment);
    }

    let opening_worker_capacity = production.worker_capacity(workforce.workers());
    let workers_hired = units_to_close_gap(target_production, opening_worker_capacity, production.units_per_worker)
        .ok_or_else(|| out_of_range("workers"))?;
    if workforce.workers().checked_add(workers_hired).is_none() {
        return Err(out_of_range("workers"));
    }
    let workforce = workforce.with_hires(workers_hired);
    let worker_capacity = production.worker_capacity(workforce.workers());
    if workers_hired > 0 {
        debug!("Hiring {} workers ({} total)", workers_hired, workforce.workers());
    }

    let produced = target_production.min(line_capacity).min(worker_capacity);
    debug!(
        "Production: target={:.0}, line capacity={:.0}, worker capacity={:.0}, actual={:.0}",
        target_production, line_capacity, worker_capacity, produced
    );

    Ok(CapacityPlan {
        target_production,
        opening_lines,
        opening_line_capacity,
        lines_purchased,
        lines_in_service,
        line_capacity,
        workers_hired,
        workforce,
        worker_capacity,
        production: produced,
        investment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::{initial_fleet, initial_workforce};

    #[test]
    fn test_ceiling_purchase_of_one_line() {
        let prod = ProductionAssumptions::default();
        let fleet = LineFleet::new([6, 6, 6, 6, 6]);
        let plan = plan_capacity(305_000.0, &fleet, Workforce::new(200), &prod).unwrap();

        assert_eq!(plan.opening_line_capacity, 300_000.0);
        assert_eq!(plan.lines_purchased, 1);
        assert_eq!(plan.lines_in_service, 31);
        assert_eq!(plan.investment, 50_000.0);
        // 200 workers cover 400,000 units
        assert_eq!(plan.workers_hired, 0);
        assert_eq!(plan.production, 305_000.0);
    }

    #[test]
    fn test_no_purchase_or_hire_below_capacity() {
        let prod = ProductionAssumptions::default();
        let fleet = LineFleet::new([6, 6, 6, 6, 6]);
        let plan = plan_capacity(120_000.0, &fleet, Workforce::new(80), &prod).unwrap();

        assert_eq!(plan.lines_purchased, 0);
        assert_eq!(plan.workers_hired, 0);
        assert_eq!(plan.investment, 0.0);
        assert_eq!(plan.workforce.workers(), 80);
        assert_eq!(plan.lines_in_service, 30);
        assert_eq!(plan.production, 120_000.0);
        assert_eq!(plan.production, plan.target_production);
    }

    #[test]
    fn test_reference_year_one() {
        let prod = ProductionAssumptions::default();
        let plan = plan_capacity(100_000.0, &initial_fleet(), initial_workforce(), &prod).unwrap();

        // 9 lines = 90,000; one more reaches 100,000
        assert_eq!(plan.opening_lines, 9);
        assert_eq!(plan.lines_purchased, 1);
        assert_eq!(plan.line_capacity, 100_000.0);
        // 50 workers x 2,000 already cover the target
        assert_eq!(plan.workers_hired, 0);
        assert_eq!(plan.worker_capacity, 100_000.0);
        assert_eq!(plan.production, 100_000.0);
    }

    #[test]
    fn test_hiring_rounds_up() {
        let prod = ProductionAssumptions::default();
        let fleet = LineFleet::new([2, 2, 2, 2, 2]);
        let plan = plan_capacity(104_500.0, &fleet, Workforce::new(50), &prod).unwrap();

        // 4,500 extra units / 2,000 per worker -> 3 hires
        assert_eq!(plan.workers_hired, 3);
        assert_eq!(plan.workforce.workers(), 53);
        assert_eq!(plan.lines_purchased, 1);
        assert_eq!(plan.production, 104_500.0);
    }

    #[test]
    fn test_zero_target() {
        let prod = ProductionAssumptions::default();
        let plan = plan_capacity(0.0, &LineFleet::default(), Workforce::new(0), &prod).unwrap();

        assert_eq!(plan.lines_purchased, 0);
        assert_eq!(plan.workers_hired, 0);
        assert_eq!(plan.production, 0.0);
    }

    #[test]
    fn test_target_beyond_line_count_is_rejected() {
        let prod = ProductionAssumptions::default();
        let err = plan_capacity(1e15, &initial_fleet(), initial_workforce(), &prod).unwrap_err();
        assert!(matches!(err, ProjectionError::CapacityOutOfRange { resource: "lines", .. }));
    }

    #[test]
    fn test_line_count_overflow_is_rejected() {
        let prod = ProductionAssumptions::default();
        let fleet = LineFleet::new([u32::MAX, 0, 0, 0, 0]);
        // A fleet already at u32::MAX lines cannot take one more
        let target = prod.line_capacity(u32::MAX) + prod.units_per_line;
        let err = plan_capacity(target, &fleet, Workforce::new(0), &prod).unwrap_err();
        assert!(matches!(err, ProjectionError::CapacityOutOfRange { resource: "lines", .. }));
    }

    #[test]
    fn test_worker_count_overflow_is_rejected() {
        let prod = ProductionAssumptions {
            units_per_line: 1e9,
            ..Default::default()
        };
        // About 9,991 lines fit; roughly 7e8 hires on top of u32::MAX - 10 workers do not
        let err = plan_capacity(1e13, &initial_fleet(), Workforce::new(u32::MAX - 10), &prod).unwrap_err();
        assert!(matches!(err, ProjectionError::CapacityOutOfRange { resource: "workers", .. }));
    }
}
