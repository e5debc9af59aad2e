//! Query engine: pure, total functions over resolved views.
//!
//! Nothing here fails. Empty views produce sentinels (`NoSelection`, the
//! "No Data" placeholder, `Average::Undefined`) that the presentation layer
//! renders as placeholders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scope::{AggregateView, RecordView, Scope};

/// Yards per "mile" in period totals. Pool-swim convention carried over from
/// the dashboard this replaces; not the statute 1760.
pub const YARDS_PER_MILE: f64 = 1650.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Label of the placeholder slice returned when no stroke data matches.
pub const NO_DATA_LABEL: &str = "No Data";
/// Nominal value of the placeholder slice, so a pie chart still renders.
pub const NO_DATA_VALUE: f64 = 1.0;

/// Result of a single-workout lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkoutSummary {
    /// Nothing selected, or the selected date has no workout.
    NoSelection,
    Selected {
        date: String,
        /// Yards.
        total_yardage: f64,
        /// Minutes, from `total_time_minutes`.
        total_duration: f64,
    },
}

impl WorkoutSummary {
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

/// One slice of a stroke breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeShare {
    pub label: String,
    /// Yards.
    pub total_distance: f64,
}

impl StrokeShare {
    pub fn new(label: impl Into<String>, total_distance: f64) -> Self {
        Self {
            label: label.into(),
            total_distance,
        }
    }

    pub fn no_data() -> Self {
        Self::new(NO_DATA_LABEL, NO_DATA_VALUE)
    }

    pub fn is_placeholder(&self) -> bool {
        self.label == NO_DATA_LABEL && self.total_distance == NO_DATA_VALUE
    }
}

/// A mean that may have had nothing to average.
///
/// Serialises as a number, or `null` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Average {
    Defined(f64),
    Undefined,
}

impl Average {
    /// Mean of the present values; missing values are skipped, not zeroed.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let (sum, n) = values
            .into_iter()
            .flatten()
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        if n == 0 {
            Self::Undefined
        } else {
            Self::Defined(sum / n as f64)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }

    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Defined(v) => Self::Defined(f(v)),
            Self::Undefined => Self::Undefined,
        }
    }
}

/// Totals and per-workout averages over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub count: usize,
    pub total_time_hours: f64,
    pub total_distance_miles: f64,
    pub avg_duration_minutes: Average,
    pub avg_distance_yards: Average,
}

/// Sum of the present values; an all-missing column sums to `0.0`.
fn sum(values: impl Iterator<Item = Option<f64>>) -> f64 {
    // fold from +0.0: `Sum` starts at -0.0, which would render as "-0.00"
    values.flatten().fold(0.0, |acc, v| acc + v)
}

/// Distance and duration of the selected workout.
///
/// Duration is the sum of `total_time_minutes`; the period summary uses
/// `total_elapsed_time` instead, and the two are not interchangeable.
pub fn workout_summary(view: &RecordView<'_>) -> WorkoutSummary {
    if !matches!(view.scope(), Scope::SingleWorkout(_)) {
        return WorkoutSummary::NoSelection;
    }
    let Some(first) = view.records().first() else {
        return WorkoutSummary::NoSelection;
    };

    WorkoutSummary::Selected {
        date: first.display_date.clone(),
        total_yardage: sum(view.iter().map(|r| r.total_distance)),
        total_duration: sum(view.iter().map(|r| r.total_time_minutes)),
    }
}

/// Distance per stroke, sorted by label.
///
/// Rows without a stroke or with non-positive distance are dropped before
/// grouping. Labels are title-cased so `freestyle` and `FREESTYLE` share a
/// slice. An empty result is replaced by the single "No Data" placeholder.
pub fn stroke_breakdown(view: &AggregateView<'_>) -> Vec<StrokeShare> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();

    for row in view.iter().filter(|row| row.is_countable()) {
        let (Some(stroke), Some(distance)) = (row.swim_stroke.as_deref(), row.total_distance)
        else {
            continue;
        };
        let label = canonical_label(stroke);
        if label.is_empty() {
            continue;
        }
        *totals.entry(label).or_insert(0.0) += distance;
    }

    if totals.is_empty() {
        return vec![StrokeShare::no_data()];
    }

    totals
        .into_iter()
        .map(|(label, total)| StrokeShare::new(label, total))
        .collect()
}

/// Count, totals and averages for a period view.
pub fn period_summary(view: &RecordView<'_>) -> PeriodSummary {
    let elapsed = || view.iter().map(|r| r.total_elapsed_time);
    let distance = || view.iter().map(|r| r.total_distance);

    PeriodSummary {
        count: view.len(),
        total_time_hours: sum(elapsed()) / SECONDS_PER_HOUR,
        total_distance_miles: sum(distance()) / YARDS_PER_MILE,
        avg_duration_minutes: Average::of(elapsed()).map(|secs| secs / SECONDS_PER_MINUTE),
        avg_distance_yards: Average::of(distance()),
    }
}

/// Title-case a stroke label: words split on whitespace, `_` and `-`.
pub fn canonical_label(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::load_aggregates;
    use crate::record::load_records;
    use crate::scope::resolve_scope;

    const RECORDS: &str = "\
date,total_distance,total_elapsed_time,total_time_minutes
2024-01-01,2000,3600,55
";

    const AGGREGATES: &str = "\
date,swim_stroke,total_distance
01/01/2024,freestyle,1500
01/01/2024,Freestyle,100
01/01/2024,backstroke,500
01/01/2024,,250
01/01/2024,butterfly,0
01/01/2024,breaststroke,-20
02/02/2024,individual_medley,400
";

    #[test]
    fn period_summary_matches_worked_example() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        let summary = period_summary(&resolve_scope(&store, &Scope::AllWorkouts));

        assert_eq!(summary.count, 1);
        assert_eq!(summary.total_time_hours, 1.0);
        assert_eq!(summary.total_distance_miles, 2000.0 / 1650.0);
        assert_eq!(format!("{:.2}", summary.total_distance_miles), "1.21");
        assert_eq!(summary.avg_duration_minutes, Average::Defined(60.0));
        assert_eq!(summary.avg_distance_yards, Average::Defined(2000.0));
    }

    #[test]
    fn period_summary_over_empty_view_is_undefined() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        let summary = period_summary(&resolve_scope(&store, &Scope::Year(1999)));

        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_time_hours, 0.0);
        assert_eq!(summary.total_distance_miles, 0.0);
        assert_eq!(summary.avg_duration_minutes, Average::Undefined);
        assert_eq!(summary.avg_distance_yards, Average::Undefined);
    }

    #[test]
    fn averages_skip_missing_values() {
        let csv = "date,total_distance,total_elapsed_time,total_time_minutes\n\
                   2024-01-01,1000,,10\n\
                   2024-01-02,3000,,20\n\
                   2024-01-03,,,30\n";
        let store = load_records(csv.as_bytes()).unwrap();
        let summary = period_summary(&resolve_scope(&store, &Scope::AllYears));

        assert_eq!(summary.count, 3);
        assert_eq!(summary.avg_distance_yards, Average::Defined(2000.0));
        assert_eq!(summary.avg_duration_minutes, Average::Undefined);
        assert_eq!(summary.total_time_hours, 0.0);
    }

    #[test]
    fn workout_summary_for_selected_date() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        let view = resolve_scope(&store, &Scope::SingleWorkout("2024-01-01".into()));

        assert_eq!(
            workout_summary(&view),
            WorkoutSummary::Selected {
                date: "2024-01-01".into(),
                total_yardage: 2000.0,
                total_duration: 55.0,
            }
        );
    }

    #[test]
    fn workout_summary_without_match_is_no_selection() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        let missing = resolve_scope(&store, &Scope::SingleWorkout("1999-01-01".into()));
        assert_eq!(workout_summary(&missing), WorkoutSummary::NoSelection);

        let everything = resolve_scope(&store, &Scope::AllWorkouts);
        assert_eq!(workout_summary(&everything), WorkoutSummary::NoSelection);
    }

    #[test]
    fn zero_distance_workout_is_still_selected() {
        let csv = "date,total_distance,total_elapsed_time,total_time_minutes\n2024-05-05,0,0,0\n";
        let store = load_records(csv.as_bytes()).unwrap();
        let view = resolve_scope(&store, &Scope::SingleWorkout("2024-05-05".into()));
        let summary = workout_summary(&view);

        assert!(summary.is_selected());
        assert_ne!(summary, WorkoutSummary::NoSelection);
    }

    #[test]
    fn breakdown_groups_filters_and_sorts() {
        let store = load_aggregates(AGGREGATES.as_bytes()).unwrap();
        let shares = stroke_breakdown(&resolve_scope(
            &store,
            &Scope::SingleWorkout("2024-01-01".into()),
        ));

        assert_eq!(
            shares,
            vec![
                StrokeShare::new("Backstroke", 500.0),
                StrokeShare::new("Freestyle", 1600.0),
            ]
        );
    }

    #[test]
    fn breakdown_over_all_workouts() {
        let store = load_aggregates(AGGREGATES.as_bytes()).unwrap();
        let shares = stroke_breakdown(&resolve_scope(&store, &Scope::AllWorkouts));
        let labels: Vec<&str> = shares.iter().map(|s| s.label.as_str()).collect();

        assert_eq!(labels, vec!["Backstroke", "Freestyle", "Individual Medley"]);
        assert!(shares.iter().all(|s| s.total_distance > 0.0));
    }

    #[test]
    fn breakdown_placeholder_when_nothing_counts() {
        let store = load_aggregates(AGGREGATES.as_bytes()).unwrap();
        let shares = stroke_breakdown(&resolve_scope(
            &store,
            &Scope::SingleWorkout("1999-01-01".into()),
        ));

        assert_eq!(shares, vec![StrokeShare::new("No Data", 1.0)]);
        assert!(shares[0].is_placeholder());
    }

    #[test]
    fn canonical_label_title_cases() {
        assert_eq!(canonical_label("freestyle"), "Freestyle");
        assert_eq!(canonical_label("BACKSTROKE"), "Backstroke");
        assert_eq!(canonical_label("individual_medley"), "Individual Medley");
        assert_eq!(canonical_label("  drill  kick "), "Drill Kick");
        assert_eq!(canonical_label("   "), "");
    }

    #[test]
    fn average_serialises_undefined_as_null() {
        let json = serde_json::to_string(&Average::Undefined).unwrap();
        assert_eq!(json, "null");
        let json = serde_json::to_string(&Average::Defined(12.5)).unwrap();
        assert_eq!(json, "12.5");
    }
}
