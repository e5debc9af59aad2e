//! Period totals and the year picker.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use swimdash_core::catalog::ALL_YEARS_LABEL;
use swimdash_core::format::{totals_card, TotalsCard};
use swimdash_core::{year_options, PeriodSummary, Scope};

use super::{load_dashboard, print_json, GlobalArgs};

#[derive(Parser, Debug)]
pub struct TotalsArgs {
    /// Year to total, or "all" (default: all years)
    #[arg(long, short = 'y')]
    pub year: Option<String>,
}

#[derive(Serialize)]
struct TotalsOutput {
    scope: Scope,
    summary: PeriodSummary,
    card: TotalsCard,
}

pub fn run_totals(args: TotalsArgs, global: &GlobalArgs) -> Result<()> {
    // Reject a bad year before touching the data files.
    let scope = Scope::from_year_selection(args.year.as_deref())?;

    let config = global.load_config()?;
    let dashboard = load_dashboard(&config)?;
    let summary = dashboard.totals(args.year.as_deref())?;
    let card = totals_card(&summary, config.display.distance_units);

    if global.json {
        return print_json(&TotalsOutput {
            scope,
            summary,
            card,
        });
    }

    let period = match scope {
        Scope::Year(year) => year.to_string(),
        _ => ALL_YEARS_LABEL.to_string(),
    };
    println!("Period:          {}", period);
    println!("Workouts:        {}", card.workouts);
    println!("Total time:      {}", card.time);
    println!("Total distance:  {}", card.distance);
    println!("Avg duration:    {}", card.avg_duration);
    println!("Avg distance:    {}", card.avg_distance);
    Ok(())
}

pub fn run_years(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let dashboard = load_dashboard(&config)?;
    let options = year_options(dashboard.records());

    if global.json {
        return print_json(&options);
    }

    for option in options {
        println!("{}", option.label);
    }
    Ok(())
}
