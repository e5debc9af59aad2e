//! Record store: one row per workout session.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::date::{display_date, parse_calendar_date};
use crate::error::{DataLoadError, Result};
use crate::table::{self, Columns};

const TABLE: &str = "workout records";

/// Columns the loader types itself; everything else lands in `extra`.
const TYPED_COLUMNS: &[&str] = &[
    "date",
    "total_distance",
    "total_elapsed_time",
    "total_time_minutes",
    "max_heart_rate",
    "num_lengths",
    "swim_stroke",
    "total_distance_miles",
];

/// A single swim workout.
///
/// `year` and `display_date` are derived from `date` when the store is built
/// and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    pub display_date: String,
    pub year: i32,
    /// Yards.
    pub total_distance: Option<f64>,
    /// Seconds.
    pub total_elapsed_time: Option<f64>,
    /// Minutes, as supplied by the source. Not `total_elapsed_time / 60`.
    pub total_time_minutes: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub num_lengths: Option<f64>,
    pub swim_stroke: Option<String>,
    pub total_distance_miles: Option<f64>,
    /// Untyped passthrough columns, raw cell text keyed by header name.
    pub extra: BTreeMap<String, String>,
}

/// Immutable, in-memory table of workouts in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<WorkoutRecord>,
    by_date: HashMap<NaiveDate, usize>,
}

impl RecordStore {
    /// Build a store from already-typed records.
    ///
    /// Fails if two records share a calendar date.
    pub fn from_records(records: Vec<WorkoutRecord>) -> Result<Self> {
        let mut by_date = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if by_date.insert(record.date, i).is_some() {
                return Err(DataLoadError::duplicate_date(
                    record.display_date.clone(),
                    TABLE,
                    i + 1,
                ));
            }
        }
        Ok(Self { records, by_date })
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look a workout up by its calendar date.
    pub fn get(&self, date: NaiveDate) -> Option<&WorkoutRecord> {
        self.by_date.get(&date).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkoutRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a WorkoutRecord;
    type IntoIter = std::slice::Iter<'a, WorkoutRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

struct RecordColumns {
    date: usize,
    total_distance: usize,
    total_elapsed_time: usize,
    total_time_minutes: usize,
    max_heart_rate: Option<usize>,
    num_lengths: Option<usize>,
    swim_stroke: Option<usize>,
    total_distance_miles: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl RecordColumns {
    fn locate(columns: &Columns) -> Result<Self> {
        let extra = columns
            .names()
            .iter()
            .enumerate()
            .filter(|(_, name)| !TYPED_COLUMNS.contains(&name.as_str()))
            .map(|(i, name)| (i, name.clone()))
            .collect();

        Ok(Self {
            date: columns.require("date")?,
            total_distance: columns.require("total_distance")?,
            total_elapsed_time: columns.require("total_elapsed_time")?,
            total_time_minutes: columns.require("total_time_minutes")?,
            max_heart_rate: columns.optional("max_heart_rate"),
            num_lengths: columns.optional("num_lengths"),
            swim_stroke: columns.optional("swim_stroke"),
            total_distance_miles: columns.optional("total_distance_miles"),
            extra,
        })
    }
}

/// Load the per-workout table from any CSV reader.
pub fn load_records<R: Read>(source: R) -> Result<RecordStore> {
    let (columns, rows) = table::read_all(TABLE, source)?;
    let layout = RecordColumns::locate(&columns)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row_no = i + 1;
        let raw_date = row.get(layout.date).unwrap_or_default();
        let date = parse_calendar_date(raw_date)
            .ok_or_else(|| DataLoadError::invalid_date(raw_date, TABLE, row_no))?;

        let extra = layout
            .extra
            .iter()
            .filter_map(|(idx, name)| row.get(*idx).map(|raw| (name.clone(), raw.to_string())))
            .collect();

        records.push(WorkoutRecord {
            date,
            display_date: display_date(date),
            year: date.year(),
            total_distance: table::number(row, layout.total_distance, &columns, row_no)?,
            total_elapsed_time: table::number(row, layout.total_elapsed_time, &columns, row_no)?,
            total_time_minutes: table::number(row, layout.total_time_minutes, &columns, row_no)?,
            max_heart_rate: table::optional_number(row, layout.max_heart_rate, &columns, row_no)?,
            num_lengths: table::optional_number(row, layout.num_lengths, &columns, row_no)?,
            swim_stroke: layout
                .swim_stroke
                .and_then(|idx| table::text(row, idx))
                .map(str::to_string),
            total_distance_miles: table::optional_number(
                row,
                layout.total_distance_miles,
                &columns,
                row_no,
            )?,
            extra,
        });
    }

    debug!(columns = columns.names().len(), "parsed workout record rows");
    let store = RecordStore::from_records(records)?;
    info!(records = store.len(), "loaded workout records");
    Ok(store)
}

/// Load the per-workout table from a CSV file on disk.
pub fn load_records_from_path(path: impl AsRef<Path>) -> Result<RecordStore> {
    let path = path.as_ref();
    info!("loading workout records from {}", path.display());
    load_records(table::open(path)?)
}
