//! Per-year outputs and the multi-year projection result

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::cash::CashFlowStatement;
use super::income::{IncomeStatement, InventoryFlow};
use super::state::CompanyState;
use crate::assumptions::LINE_USEFUL_LIFE_YEARS;
use crate::company::BalanceSheet;
use crate::error::Result;

/// Movement of production lines and line capacity over the year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetFlow {
    /// Lines by age at the start of the year
    pub opening_composition: [u32; LINE_USEFUL_LIFE_YEARS],
    pub opening_lines: u32,
    pub opening_capacity: f64,
    pub purchased: u32,
    pub capacity_purchased: f64,
    pub capacity_during_year: f64,
    pub scrapped: u32,
    pub capacity_scrapped: f64,
    pub ending_lines: u32,
    pub capacity_next_year: f64,
    /// Lines by age after year-end aging
    pub closing_composition: [u32; LINE_USEFUL_LIFE_YEARS],
}

/// Headline ratios on the closing balance sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub return_on_equity: f64,
    pub current_ratio: f64,
}

impl FinancialRatios {
    pub fn from_balance_sheet(sheet: &BalanceSheet) -> Self {
        Self {
            return_on_equity: sheet.return_on_equity(),
            current_ratio: sheet.current_ratio(),
        }
    }
}

/// Everything computed for one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOutputs {
    /// 1-based index of the projected year
    pub year_index: u32,
    /// Display label, e.g. "X7"
    pub label: String,
    pub production: f64,
    pub workers: u32,
    pub workers_hired: u32,
    pub income: IncomeStatement,
    pub cash_flow: CashFlowStatement,
    pub closing_balance_sheet: BalanceSheet,
    pub fleet_flow: FleetFlow,
    pub inventory_flow: InventoryFlow,
    pub ratios: FinancialRatios,
}

/// Result of a multi-year projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub years: Vec<YearOutputs>,
    /// State after the last projected year
    pub final_state: CompanyState,
}

impl ProjectionResult {
    pub fn total_net_income(&self) -> f64 {
        self.years.iter().map(|y| y.income.net_income).sum()
    }

    pub fn total_dividends(&self) -> f64 {
        self.years.iter().map(|y| y.cash_flow.dividends_paid).sum()
    }

    /// Flat rows, one per year
    pub fn summary_rows(&self) -> Vec<YearSummaryRow> {
        self.years.iter().map(YearSummaryRow::from).collect()
    }

    /// Write one CSV row per year
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in self.summary_rows() {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Flat per-year figures for CSV output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummaryRow {
    pub year: String,
    pub production: f64,
    pub units_sold: f64,
    pub lines_in_service: u32,
    pub lines_purchased: u32,
    pub lines_scrapped: u32,
    pub workers: u32,
    pub sales_revenue: f64,
    pub operating_revenue: f64,
    pub operating_expense: f64,
    pub ebit: f64,
    pub financial_charges: f64,
    pub income_tax: f64,
    pub net_income: f64,
    pub operating_cash_flow: f64,
    pub investing_cash_flow: f64,
    pub financing_cash_flow: f64,
    pub ending_net_cash: f64,
    pub cash: f64,
    pub bank_overdraft: f64,
    pub total_assets: f64,
    pub total_equity: f64,
    pub total_liabilities: f64,
    pub return_on_equity: f64,
    pub current_ratio: f64,
}

impl From<&YearOutputs> for YearSummaryRow {
    fn from(y: &YearOutputs) -> Self {
        let bs = &y.closing_balance_sheet;
        Self {
            year: y.label.clone(),
            production: y.production,
            units_sold: y.inventory_flow.finished_sold,
            lines_in_service: y.fleet_flow.opening_lines + y.fleet_flow.purchased,
            lines_purchased: y.fleet_flow.purchased,
            lines_scrapped: y.fleet_flow.scrapped,
            workers: y.workers,
            sales_revenue: y.income.sales_revenue,
            operating_revenue: y.income.operating_revenue,
            operating_expense: y.income.operating_expense,
            ebit: y.income.ebit,
            financial_charges: y.income.financial_charges,
            income_tax: y.income.income_tax,
            net_income: y.income.net_income,
            operating_cash_flow: y.cash_flow.operating_cash_flow,
            investing_cash_flow: y.cash_flow.investing_cash_flow,
            financing_cash_flow: y.cash_flow.financing_cash_flow,
            ending_net_cash: y.cash_flow.ending_net_cash,
            cash: bs.cash,
            bank_overdraft: bs.bank_overdraft,
            total_assets: bs.total_assets(),
            total_equity: bs.total_equity(),
            total_liabilities: bs.total_liabilities(),
            return_on_equity: y.ratios.return_on_equity,
            current_ratio: y.ratios.current_ratio,
        }
    }
}
