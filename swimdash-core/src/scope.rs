//! Scope resolution: turn a UI selection into a filtered, borrowed view.
//!
//! A scope that matches nothing is not an error. It resolves to an empty view
//! and the query engine answers with its sentinel results.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{AggregateStore, StrokeAggregateRow};
use crate::date::parse_calendar_date;
use crate::error::ScopeParseError;
use crate::record::{RecordStore, WorkoutRecord};

/// Which slice of the data a query runs over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Scope {
    AllWorkouts,
    /// A workout picked by its display date (`YYYY-MM-DD`).
    SingleWorkout(String),
    Year(i32),
    AllYears,
}

impl Scope {
    /// Scope for the workout picker. No selection means every workout.
    pub fn from_workout_selection(selected: Option<&str>) -> Self {
        match selected.map(str::trim) {
            Some(date) if !date.is_empty() => Self::SingleWorkout(date.to_string()),
            _ => Self::AllWorkouts,
        }
    }

    /// Scope for the year picker: `None` or `"all"` selects every year.
    pub fn from_year_selection(selected: Option<&str>) -> Result<Self, ScopeParseError> {
        let Some(raw) = selected.map(str::trim) else {
            return Ok(Self::AllYears);
        };
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Ok(Self::AllYears);
        }
        raw.parse::<i32>()
            .map(Self::Year)
            .map_err(|_| ScopeParseError {
                value: raw.to_string(),
            })
    }

    /// The selected display date, for single-workout scopes.
    pub fn selected_date(&self) -> Option<&str> {
        match self {
            Self::SingleWorkout(date) => Some(date),
            _ => None,
        }
    }

    fn date_matcher(&self) -> Option<DateMatch<'_>> {
        self.selected_date().map(|raw| match parse_calendar_date(raw) {
            Some(date) => DateMatch::Day(date),
            None => DateMatch::Text(raw),
        })
    }
}

/// How a single-workout selection is compared against stored rows.
///
/// A selection that parses is matched on the calendar day, whatever spelling
/// each table uses. One that does not parse falls back to comparing text.
#[derive(Debug, Clone, Copy)]
enum DateMatch<'s> {
    Day(NaiveDate),
    Text(&'s str),
}

/// Records selected by a scope, borrowed from a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct RecordView<'a> {
    scope: Scope,
    records: Vec<&'a WorkoutRecord>,
}

impl<'a> RecordView<'a> {
    pub fn new(scope: Scope, records: Vec<&'a WorkoutRecord>) -> Self {
        Self { scope, records }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn records(&self) -> &[&'a WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a WorkoutRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Aggregate rows selected by a scope, borrowed from an [`AggregateStore`].
#[derive(Debug, Clone)]
pub struct AggregateView<'a> {
    scope: Scope,
    rows: Vec<&'a StrokeAggregateRow>,
}

impl<'a> AggregateView<'a> {
    pub fn new(scope: Scope, rows: Vec<&'a StrokeAggregateRow>) -> Self {
        Self { scope, rows }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn rows(&self) -> &[&'a StrokeAggregateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a StrokeAggregateRow> + '_ {
        self.rows.iter().copied()
    }
}

/// A store that can be narrowed by a [`Scope`].
pub trait Resolve {
    type View<'a>
    where
        Self: 'a;

    fn resolve<'a>(&'a self, scope: &Scope) -> Self::View<'a>;
}

impl Resolve for RecordStore {
    type View<'a> = RecordView<'a>;

    fn resolve<'a>(&'a self, scope: &Scope) -> Self::View<'a> {
        let records: Vec<&WorkoutRecord> = match (scope, scope.date_matcher()) {
            (Scope::AllWorkouts | Scope::AllYears, _) => self.iter().collect(),
            (Scope::Year(year), _) => self.iter().filter(|r| r.year == *year).collect(),
            (Scope::SingleWorkout(_), Some(DateMatch::Day(day))) => {
                self.get(day).into_iter().collect()
            }
            (Scope::SingleWorkout(_), Some(DateMatch::Text(raw))) => {
                self.iter().filter(|r| r.display_date == raw).collect()
            }
            (Scope::SingleWorkout(_), None) => Vec::new(),
        };

        debug!(?scope, matched = records.len(), "resolved record scope");
        RecordView::new(scope.clone(), records)
    }
}

impl Resolve for AggregateStore {
    type View<'a> = AggregateView<'a>;

    fn resolve<'a>(&'a self, scope: &Scope) -> Self::View<'a> {
        let rows: Vec<&StrokeAggregateRow> = match (scope, scope.date_matcher()) {
            (Scope::AllWorkouts | Scope::AllYears, _) => self.iter().collect(),
            (Scope::Year(year), _) => self
                .iter()
                .filter(|row| row.date_key.year() == *year)
                .collect(),
            (Scope::SingleWorkout(_), Some(DateMatch::Day(day))) => {
                self.iter().filter(|row| row.date_key == day).collect()
            }
            (Scope::SingleWorkout(_), Some(DateMatch::Text(raw))) => {
                self.iter().filter(|row| row.date == raw).collect()
            }
            (Scope::SingleWorkout(_), None) => Vec::new(),
        };

        debug!(?scope, matched = rows.len(), "resolved aggregate scope");
        AggregateView::new(scope.clone(), rows)
    }
}

/// Narrow `store` to the rows `scope` selects.
pub fn resolve_scope<'a, S: Resolve>(store: &'a S, scope: &Scope) -> S::View<'a> {
    store.resolve(scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::load_aggregates;
    use crate::record::load_records;

    const RECORDS: &str = "\
date,total_distance,total_elapsed_time,total_time_minutes
2023-11-04,1800,2400,38
2024-01-01,2000,3600,55
2024-03-15,2500,4000,64
";

    const AGGREGATES: &str = "\
date,swim_stroke,total_distance
11/04/2023,freestyle,1800
01/01/2024,freestyle,1500
01/01/2024,backstroke,500
03/15/2024,kick,100
";

    fn aggregates() -> AggregateStore {
        load_aggregates(AGGREGATES.as_bytes()).unwrap()
    }

    #[test]
    fn workout_selection_descriptor() {
        assert_eq!(Scope::from_workout_selection(None), Scope::AllWorkouts);
        assert_eq!(Scope::from_workout_selection(Some("  ")), Scope::AllWorkouts);
        assert_eq!(
            Scope::from_workout_selection(Some("2024-01-01")),
            Scope::SingleWorkout("2024-01-01".into())
        );
    }

    #[test]
    fn year_selection_descriptor() {
        assert_eq!(Scope::from_year_selection(None).unwrap(), Scope::AllYears);
        assert_eq!(Scope::from_year_selection(Some("all")).unwrap(), Scope::AllYears);
        assert_eq!(Scope::from_year_selection(Some("2024")).unwrap(), Scope::Year(2024));
        assert!(Scope::from_year_selection(Some("last year")).is_err());
    }

    #[test]
    fn identity_scopes_cover_every_record() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        assert_eq!(resolve_scope(&store, &Scope::AllWorkouts).len(), 3);
        assert_eq!(resolve_scope(&store, &Scope::AllYears).len(), 3);
    }

    #[test]
    fn year_scope_filters_records() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        let view = resolve_scope(&store, &Scope::Year(2024));
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.year == 2024));
        assert!(resolve_scope(&store, &Scope::Year(1990)).is_empty());
    }

    #[test]
    fn single_workout_matches_display_date() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        let view = resolve_scope(&store, &Scope::SingleWorkout("2024-01-01".into()));
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].total_distance, Some(2000.0));

        let missing = resolve_scope(&store, &Scope::SingleWorkout("1999-01-01".into()));
        assert!(missing.is_empty());
    }

    #[test]
    fn single_workout_joins_aggregates_across_date_spellings() {
        let store = aggregates();
        let view = resolve_scope(&store, &Scope::SingleWorkout("2024-01-01".into()));
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|row| row.date == "01/01/2024"));
    }

    #[test]
    fn unparsable_selection_falls_back_to_text() {
        let store = aggregates();
        let view = resolve_scope(&store, &Scope::SingleWorkout("latest".into()));
        assert!(view.is_empty());

        let records = load_records(RECORDS.as_bytes()).unwrap();
        assert!(resolve_scope(&records, &Scope::SingleWorkout("latest".into())).is_empty());
    }

    #[test]
    fn aggregate_year_scope_uses_date_key() {
        let store = aggregates();
        assert_eq!(resolve_scope(&store, &Scope::Year(2023)).len(), 1);
        assert_eq!(resolve_scope(&store, &Scope::Year(2024)).len(), 3);
    }

    #[test]
    fn view_remembers_scope() {
        let store = load_records(RECORDS.as_bytes()).unwrap();
        let scope = Scope::SingleWorkout("2024-03-15".into());
        assert_eq!(resolve_scope(&store, &scope).scope(), &scope);
    }
}
