use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use swimdash_core::{
    load_aggregates, load_records, period_summary, resolve_scope, stroke_breakdown, Scope,
};

const STROKES: &[&str] = &["freestyle", "Backstroke", "BREASTSTROKE", "butterfly", "im", ""];

#[derive(Debug, Clone)]
struct Workout {
    distance: Option<u32>,
    elapsed: u32,
    minutes: u32,
}

fn arb_workout() -> impl Strategy<Value = Workout> {
    (proptest::option::of(0u32..10_000), 0u32..20_000, 0u32..300).prop_map(
        |(distance, elapsed, minutes)| Workout {
            distance,
            elapsed,
            minutes,
        },
    )
}

fn workout_date(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(i as i64 * 3)
}

fn records_csv(workouts: &[Workout], scale: u32) -> String {
    let mut csv = String::from("date,total_distance,total_elapsed_time,total_time_minutes\n");
    for (i, w) in workouts.iter().enumerate() {
        let distance = w
            .distance
            .map(|d| (d as u64 * scale as u64).to_string())
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{}\n",
            workout_date(i).format("%Y-%m-%d"),
            distance,
            w.elapsed,
            w.minutes
        ));
    }
    csv
}

fn arb_aggregate_row() -> impl Strategy<Value = (usize, usize, Option<i32>)> {
    (0usize..5, 0..STROKES.len(), proptest::option::of(-500i32..5_000))
}

fn aggregates_csv(rows: &[(usize, usize, Option<i32>)]) -> String {
    let mut csv = String::from("date,swim_stroke,total_distance\n");
    for (day, stroke, distance) in rows {
        csv.push_str(&format!(
            "{},{},{}\n",
            workout_date(*day).format("%m/%d/%Y"),
            STROKES[*stroke],
            distance.map(|d| d.to_string()).unwrap_or_default()
        ));
    }
    csv
}

proptest! {
    /// Property: the all-workouts period counts every record
    #[test]
    fn prop_all_workouts_counts_everything(workouts in prop::collection::vec(arb_workout(), 0..60)) {
        let store = load_records(records_csv(&workouts, 1).as_bytes()).unwrap();
        let summary = period_summary(&resolve_scope(&store, &Scope::AllWorkouts));

        prop_assert_eq!(summary.count, store.len());
        prop_assert_eq!(summary.count, workouts.len());
    }

    /// Property: miles are the yard total over 1650, and scale linearly
    #[test]
    fn prop_miles_scale_linearly(
        workouts in prop::collection::vec(arb_workout(), 1..40),
        k in 1u32..50,
    ) {
        let yards: u64 = workouts.iter().filter_map(|w| w.distance).map(u64::from).sum();

        let base = load_records(records_csv(&workouts, 1).as_bytes()).unwrap();
        let scaled = load_records(records_csv(&workouts, k).as_bytes()).unwrap();
        let base_miles = period_summary(&resolve_scope(&base, &Scope::AllYears)).total_distance_miles;
        let scaled_miles = period_summary(&resolve_scope(&scaled, &Scope::AllYears)).total_distance_miles;

        prop_assert_eq!(base_miles, yards as f64 / 1650.0);
        let expected = base_miles * k as f64;
        prop_assert!((scaled_miles - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    /// Property: breakdown slices are labelled and positive, or the lone placeholder
    #[test]
    fn prop_breakdown_only_positive_labelled(rows in prop::collection::vec(arb_aggregate_row(), 0..80)) {
        let store = load_aggregates(aggregates_csv(&rows).as_bytes()).unwrap();
        let shares = stroke_breakdown(&resolve_scope(&store, &Scope::AllWorkouts));

        let any_countable = rows
            .iter()
            .any(|(_, stroke, d)| !STROKES[*stroke].is_empty() && d.is_some_and(|d| d > 0));

        if any_countable {
            for share in &shares {
                prop_assert!(share.total_distance > 0.0);
                prop_assert!(!share.label.is_empty());
                prop_assert!(!share.is_placeholder());
            }
            let mut labels: Vec<&str> = shares.iter().map(|s| s.label.as_str()).collect();
            let before = labels.clone();
            labels.sort();
            prop_assert_eq!(labels, before);
        } else {
            prop_assert_eq!(shares.len(), 1);
            prop_assert_eq!(shares[0].label.as_str(), "No Data");
            prop_assert_eq!(shares[0].total_distance, 1.0);
        }
    }

    /// Property: a single-workout breakdown never exceeds the overall one
    #[test]
    fn prop_single_workout_is_subset(rows in prop::collection::vec(arb_aggregate_row(), 1..80), day in 0usize..5) {
        let store = load_aggregates(aggregates_csv(&rows).as_bytes()).unwrap();
        let overall = stroke_breakdown(&resolve_scope(&store, &Scope::AllWorkouts));
        let selected = workout_date(day).format("%Y-%m-%d").to_string();
        let single = stroke_breakdown(&resolve_scope(&store, &Scope::SingleWorkout(selected)));

        for share in single.iter().filter(|s| !s.is_placeholder()) {
            let total = overall
                .iter()
                .find(|o| o.label == share.label)
                .map(|o| o.total_distance);
            prop_assert!(total.is_some_and(|t| t + 1e-9 >= share.total_distance));
        }
    }

    /// Property: loading the same source twice answers every query identically
    #[test]
    fn prop_loading_is_idempotent(workouts in prop::collection::vec(arb_workout(), 0..30), year in 2019i32..2022) {
        let csv = records_csv(&workouts, 1);
        let a = load_records(csv.as_bytes()).unwrap();
        let b = load_records(csv.as_bytes()).unwrap();

        prop_assert_eq!(&a, &b);
        for scope in [Scope::AllWorkouts, Scope::AllYears, Scope::Year(year)] {
            prop_assert_eq!(
                period_summary(&resolve_scope(&a, &scope)),
                period_summary(&resolve_scope(&b, &scope))
            );
        }
    }

    /// Property: loading the same aggregate source twice gives identical breakdowns
    #[test]
    fn prop_aggregate_loading_is_idempotent(rows in prop::collection::vec(arb_aggregate_row(), 0..60), day in 0usize..5) {
        let csv = aggregates_csv(&rows);
        let a = load_aggregates(csv.as_bytes()).unwrap();
        let b = load_aggregates(csv.as_bytes()).unwrap();

        prop_assert_eq!(&a, &b);
        let selected = workout_date(day).format("%Y-%m-%d").to_string();
        for scope in [Scope::AllWorkouts, Scope::SingleWorkout(selected)] {
            prop_assert_eq!(
                stroke_breakdown(&resolve_scope(&a, &scope)),
                stroke_breakdown(&resolve_scope(&b, &scope))
            );
        }
    }
}

#[test]
fn empty_period_has_undefined_averages() {
    let store = load_records(records_csv(&[], 1).as_bytes()).unwrap();
    let summary = period_summary(&resolve_scope(&store, &Scope::AllWorkouts));

    assert_eq!(summary.count, 0);
    assert!(!summary.avg_distance_yards.is_defined());
    assert!(!summary.avg_duration_minutes.is_defined());
}
