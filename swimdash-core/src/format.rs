//! Display strings for the dashboard cards.
//!
//! The query engine returns numbers and sentinels; this module turns them into
//! the text the cards show: thousands separators, unit suffixes, `--` for an
//! undefined average and a prompt when no workout is selected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::query::{Average, PeriodSummary, WorkoutSummary};
use crate::scope::Scope;

/// Shown in place of an undefined average.
pub const PLACEHOLDER: &str = "--";
/// Shown in every workout card slot while nothing is selected.
pub const SELECT_PROMPT: &str = "Select a workout";

pub const METERS_PER_YARD: f64 = 0.9144;

/// Unit for per-workout distances on screen. Computation always stays in
/// yards; period totals stay in 1650-yard miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Yards,
    Meters,
}

impl DistanceUnit {
    pub fn convert(self, yards: f64) -> f64 {
        match self {
            Self::Yards => yards,
            Self::Meters => yards * METERS_PER_YARD,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Yards => "yards",
            Self::Meters => "meters",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yards" | "yard" | "yd" => Ok(Self::Yards),
            "meters" | "meter" | "metres" | "m" => Ok(Self::Meters),
            other => Err(format!("unknown distance unit '{}' (yards or meters)", other)),
        }
    }
}

/// `1234567.891` with 2 decimals becomes `1,234,567.89`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let rounds_to_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !rounds_to_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// Text for the three workout cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutCard {
    pub date: String,
    pub yardage: String,
    pub duration: String,
}

pub fn workout_card(summary: &WorkoutSummary, unit: DistanceUnit) -> WorkoutCard {
    match summary {
        WorkoutSummary::NoSelection => WorkoutCard {
            date: SELECT_PROMPT.to_string(),
            yardage: SELECT_PROMPT.to_string(),
            duration: SELECT_PROMPT.to_string(),
        },
        WorkoutSummary::Selected {
            date,
            total_yardage,
            total_duration,
        } => WorkoutCard {
            date: date.clone(),
            yardage: format!(
                "{} {}",
                group_thousands(unit.convert(*total_yardage), 0),
                unit
            ),
            duration: format!("{} minutes", group_thousands(*total_duration, 0)),
        },
    }
}

/// Text for the yearly totals panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsCard {
    pub workouts: String,
    pub time: String,
    pub distance: String,
    pub avg_duration: String,
    pub avg_distance: String,
}

fn average_text(avg: Average, suffix: &str) -> String {
    match avg {
        Average::Defined(v) => format!("{} {}", group_thousands(v, 0), suffix),
        Average::Undefined => PLACEHOLDER.to_string(),
    }
}

pub fn totals_card(summary: &PeriodSummary, unit: DistanceUnit) -> TotalsCard {
    TotalsCard {
        workouts: summary.count.to_string(),
        time: format!("{} hours", group_thousands(summary.total_time_hours, 2)),
        distance: format!("{} miles", group_thousands(summary.total_distance_miles, 2)),
        avg_duration: average_text(summary.avg_duration_minutes, "min"),
        avg_distance: average_text(
            summary.avg_distance_yards.map(|y| unit.convert(y)),
            unit.suffix(),
        ),
    }
}

/// Heading of the stroke chart for a workout selection.
pub fn breakdown_title(scope: &Scope) -> String {
    match scope.selected_date() {
        Some(date) => format!("Stroke Breakdown - {}", date),
        None => "Overall Swim Stroke Breakdown".to_string(),
    }
}
