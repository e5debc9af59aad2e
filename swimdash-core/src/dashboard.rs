//! The loaded data set: both stores, built once and shared read-only.

use std::time::Instant;

use tracing::info;

use crate::aggregate::{load_aggregates_from_path, AggregateStore};
use crate::config::DataConfig;
use crate::error::{Result, ScopeParseError};
use crate::query::{period_summary, stroke_breakdown, workout_summary};
use crate::query::{PeriodSummary, StrokeShare, WorkoutSummary};
use crate::record::{load_records_from_path, RecordStore};
use crate::scope::{resolve_scope, Scope};

/// Both stores. Cheap to share behind an `Arc`; never mutated after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    records: RecordStore,
    aggregates: AggregateStore,
}

impl Dashboard {
    pub fn from_parts(records: RecordStore, aggregates: AggregateStore) -> Self {
        Self {
            records,
            aggregates,
        }
    }

    /// Read both source tables. Either failing aborts the whole load.
    pub fn load(data: &DataConfig) -> Result<Self> {
        let started = Instant::now();
        let records = load_records_from_path(&data.records)?;
        let aggregates = load_aggregates_from_path(&data.aggregates)?;

        info!(
            records = records.len(),
            aggregates = aggregates.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dashboard data loaded"
        );
        Ok(Self::from_parts(records, aggregates))
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn aggregates(&self) -> &AggregateStore {
        &self.aggregates
    }

    /// Workout cards for the workout picker's value.
    pub fn workout(&self, selected: Option<&str>) -> WorkoutSummary {
        match selected.map(str::trim).filter(|s| !s.is_empty()) {
            Some(date) => {
                let scope = Scope::SingleWorkout(date.to_string());
                workout_summary(&resolve_scope(&self.records, &scope))
            }
            None => WorkoutSummary::NoSelection,
        }
    }

    /// Stroke chart for the workout picker's value; no selection covers
    /// every workout.
    pub fn strokes(&self, selected: Option<&str>) -> (Scope, Vec<StrokeShare>) {
        let scope = Scope::from_workout_selection(selected);
        let shares = stroke_breakdown(&resolve_scope(&self.aggregates, &scope));
        (scope, shares)
    }

    /// Totals panel for the year picker's value.
    pub fn totals(
        &self,
        selected_year: Option<&str>,
    ) -> std::result::Result<PeriodSummary, ScopeParseError> {
        let scope = Scope::from_year_selection(selected_year)?;
        Ok(period_summary(&resolve_scope(&self.records, &scope)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::load_aggregates;
    use crate::query::Average;
    use crate::record::load_records;

    fn dashboard() -> Dashboard {
        let records = load_records(
            "date,total_distance,total_elapsed_time,total_time_minutes\n\
             2023-06-01,1000,1800,29\n\
             2024-01-01,2000,3600,55\n"
                .as_bytes(),
        )
        .unwrap();
        let aggregates = load_aggregates(
            "date,swim_stroke,total_distance\n\
             06/01/2023,freestyle,1000\n\
             01/01/2024,freestyle,1200\n\
             01/01/2024,backstroke,800\n"
                .as_bytes(),
        )
        .unwrap();
        Dashboard::from_parts(records, aggregates)
    }

    #[test]
    fn workout_without_selection() {
        let dash = dashboard();
        assert_eq!(dash.workout(None), WorkoutSummary::NoSelection);
        assert_eq!(dash.workout(Some("")), WorkoutSummary::NoSelection);
        assert!(dash.workout(Some("2024-01-01")).is_selected());
    }

    #[test]
    fn strokes_follow_selection() {
        let dash = dashboard();
        let (scope, all) = dash.strokes(None);
        assert_eq!(scope, Scope::AllWorkouts);
        assert_eq!(all[1], StrokeShare::new("Freestyle", 2200.0));

        let (_, one) = dash.strokes(Some("2023-06-01"));
        assert_eq!(one, vec![StrokeShare::new("Freestyle", 1000.0)]);
    }

    #[test]
    fn totals_by_year() {
        let dash = dashboard();
        assert_eq!(dash.totals(Some("all")).unwrap().count, 2);

        let year = dash.totals(Some("2023")).unwrap();
        assert_eq!(year.count, 1);
        assert_eq!(year.avg_duration_minutes, Average::Defined(30.0));

        assert!(dash.totals(Some("recent")).is_err());
    }
}
