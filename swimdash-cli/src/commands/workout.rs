//! Per-workout views: the workout picker, the workout cards and the stroke chart.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use swimdash_core::format::{breakdown_title, group_thousands, workout_card, WorkoutCard};
use swimdash_core::{workout_options, DistanceUnit, Scope, StrokeShare, WorkoutSummary};

use super::{load_dashboard, print_json, GlobalArgs};

#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Workout date as listed by `swimdash workouts` (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    pub date: Option<String>,
}

#[derive(Parser, Debug)]
pub struct StrokesArgs {
    /// Workout date; omit for every workout
    #[arg(long, short = 'd')]
    pub date: Option<String>,
}

#[derive(Serialize)]
struct SummaryOutput {
    summary: WorkoutSummary,
    card: WorkoutCard,
}

#[derive(Serialize)]
struct StrokesOutput {
    title: String,
    scope: Scope,
    shares: Vec<StrokeShare>,
}

pub fn run_summary(args: SummaryArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let dashboard = load_dashboard(&config)?;

    let summary = dashboard.workout(args.date.as_deref());
    let card = workout_card(&summary, config.display.distance_units);

    if global.json {
        return print_json(&SummaryOutput { summary, card });
    }

    println!("Date:      {}", card.date);
    println!("Distance:  {}", card.yardage);
    println!("Duration:  {}", card.duration);
    Ok(())
}

pub fn run_strokes(args: StrokesArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let dashboard = load_dashboard(&config)?;
    let (scope, shares) = dashboard.strokes(args.date.as_deref());

    if global.json {
        return print_json(&StrokesOutput {
            title: breakdown_title(&scope),
            scope,
            shares,
        });
    }

    println!("{}", breakdown_title(&scope));
    for line in share_lines(&shares, config.display.distance_units) {
        println!("  {}", line);
    }
    Ok(())
}

pub fn run_workouts(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let dashboard = load_dashboard(&config)?;
    let options = workout_options(dashboard.records());

    if global.json {
        return print_json(&options);
    }

    for date in options {
        println!("{}", date);
    }
    Ok(())
}

/// One aligned line per slice with its share of the total.
fn share_lines(shares: &[StrokeShare], unit: DistanceUnit) -> Vec<String> {
    if shares.iter().all(StrokeShare::is_placeholder) {
        return shares.iter().map(|s| s.label.clone()).collect();
    }

    let total: f64 = shares.iter().map(|s| s.total_distance).sum();
    let width = shares.iter().map(|s| s.label.len()).max().unwrap_or(0);

    shares
        .iter()
        .map(|share| {
            format!(
                "{:<width$}  {:>10} {}  ({:.1}%)",
                share.label,
                group_thousands(unit.convert(share.total_distance), 0),
                unit,
                share.total_distance / total * 100.0,
                width = width
            )
        })
        .collect()
}
