use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use agrolytics_budget::{
    BudgetLine, GlobalSummary, MonthlyExecution, TransactionRecord, VarianceAnalyzer,
    VarianceResult, filter_categories, write_csv,
};
use agrolytics_core::{AnalyticsConfig, DomainResult, HealthThresholds, ParcelId};
use agrolytics_growth::{GrowthProjection, GrowthRates, GrowthScenario, SimulationRecord, simulate};
use agrolytics_health::{
    ActivityRecord, DisplayCategory, StatusLabelSet, StatusSummary, classify_display,
    evaluate_parcels_with, summarize,
};

use crate::cli::{Cli, Command, LedgerArgs, SimulateArgs};
use crate::input::{load_config, load_json, resolve_now};

/// Health of one parcel as shown on dashboards and maps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelStatus {
    pub labels: StatusLabelSet,
    pub display: DisplayCategory,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub evaluated_at: DateTime<Utc>,
    pub parcels: BTreeMap<ParcelId, ParcelStatus>,
    pub summary: StatusSummary,
}

/// Classify every parcel in `records` against one reference instant.
pub fn health_report(
    records: &[ActivityRecord],
    now: DateTime<Utc>,
    thresholds: &HealthThresholds,
) -> HealthReport {
    let labels = evaluate_parcels_with(records, now, thresholds);
    let summary = summarize(&labels);
    let parcels = labels
        .into_iter()
        .map(|(id, labels)| {
            let display = classify_display(&labels);
            let status = ParcelStatus {
                labels,
                display,
                color: display.color(),
            };
            (id, status)
        })
        .collect();

    HealthReport {
        evaluated_at: now,
        parcels,
        summary,
    }
}

pub fn variance_report(
    analyzer: &VarianceAnalyzer,
    budgets: &[BudgetLine],
    transactions: &[TransactionRecord],
    year: i32,
    parcel_id: Option<ParcelId>,
    filter: Option<&str>,
) -> Vec<VarianceResult> {
    let results = analyzer.compare_by_category(budgets, transactions, year, parcel_id);
    match filter {
        Some(needle) => filter_categories(&results, needle)
            .into_iter()
            .cloned()
            .collect(),
        None => results,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimulationOutput {
    Projection { results: GrowthProjection },
    Record(SimulationRecord),
}

pub fn simulation_output(args: &SimulateArgs, today: NaiveDate) -> DomainResult<SimulationOutput> {
    let scenario = GrowthScenario::new(
        args.start_year.unwrap_or(today.year()),
        args.years,
        args.initial,
        GrowthRates::new(args.birth_rate, args.sale_rate, args.mortality_rate),
    );
    let results = simulate(&scenario)?;

    if !args.record {
        return Ok(SimulationOutput::Projection { results });
    }

    let mut record = SimulationRecord::new(scenario, results, today);
    if let Some(name) = &args.name {
        record = record.with_name(name.as_str());
    }
    Ok(SimulationOutput::Record(record))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to encode output")
}

fn load_ledger(args: &LedgerArgs) -> Result<(Vec<BudgetLine>, Vec<TransactionRecord>)> {
    let budgets: Vec<BudgetLine> = load_json(&args.budgets)?;
    let transactions: Vec<TransactionRecord> = load_json(&args.transactions)?;
    Ok((budgets, transactions))
}

/// Execute one CLI command. `clock` is the run's only wall-clock sample.
pub fn run(cli: &Cli, clock: DateTime<Utc>) -> Result<String> {
    let config: AnalyticsConfig = load_config(cli.config.as_deref())?;
    let analyzer = VarianceAnalyzer::new().with_policy(config.variance);
    let current_year = clock.year();

    match &cli.command {
        Command::Classify { activities, now } => {
            let records: Vec<ActivityRecord> = load_json(activities)?;
            let now = resolve_now(now.as_deref(), clock)?;
            let report = health_report(&records, now, &config.health);
            info!(
                parcels = report.parcels.len(),
                critical = report.summary.critical,
                "classified parcels"
            );
            to_json(&report)
        }

        Command::Variance {
            ledger,
            filter,
            csv,
        } => {
            let (budgets, transactions) = load_ledger(ledger)?;
            let year = ledger.year.unwrap_or(current_year);
            let results = variance_report(
                &analyzer,
                &budgets,
                &transactions,
                year,
                ledger.parcel.map(ParcelId::new),
                filter.as_deref(),
            );
            info!(year, categories = results.len(), "compared budget by category");

            if *csv {
                let mut buf = Vec::new();
                write_csv(&results, &mut buf)?;
                Ok(String::from_utf8(buf)?)
            } else {
                to_json(&results)
            }
        }

        Command::Summary { ledger } => {
            let (budgets, transactions) = load_ledger(ledger)?;
            let year = ledger.year.unwrap_or(current_year);
            let summary: GlobalSummary = analyzer.global_summary(
                &budgets,
                &transactions,
                year,
                ledger.parcel.map(ParcelId::new),
            );
            info!(year, alert = summary.global_alert, "computed global budget summary");
            to_json(&summary)
        }

        Command::Monthly {
            transactions,
            year,
            category,
            parcel,
        } => {
            let transactions: Vec<TransactionRecord> = load_json(transactions)?;
            let year = year.unwrap_or(current_year);
            let months: Vec<MonthlyExecution> = analyzer.monthly_breakdown(
                &transactions,
                year,
                category.as_deref(),
                parcel.map(ParcelId::new),
            );
            info!(year, months = months.len(), "computed monthly execution");
            to_json(&months)
        }

        Command::Simulate(args) => {
            let output = simulation_output(args, clock.date_naive())?;
            info!(horizon = args.years, record = args.record, "simulated growth");
            to_json(&output)
        }
    }
}
