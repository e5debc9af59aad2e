//! Aggregate store: distance per stroke within each workout.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::date::parse_calendar_date;
use crate::error::{DataLoadError, Result};
use crate::table;

const TABLE: &str = "stroke aggregates";

/// One workout × stroke row.
///
/// `date` keeps the source spelling (typically `MM/DD/YYYY`); `date_key` is the
/// same day parsed once at load so scope matching never reparses it.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeAggregateRow {
    pub date: String,
    pub date_key: NaiveDate,
    pub swim_stroke: Option<String>,
    /// Yards.
    pub total_distance: Option<f64>,
}

impl StrokeAggregateRow {
    /// Rows that may take part in a breakdown: labelled, with positive distance.
    pub fn is_countable(&self) -> bool {
        self.swim_stroke.is_some() && self.total_distance.is_some_and(|d| d > 0.0)
    }
}

/// Immutable table of per-stroke rows in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStore {
    rows: Vec<StrokeAggregateRow>,
}

impl AggregateStore {
    pub fn from_rows(rows: Vec<StrokeAggregateRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[StrokeAggregateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StrokeAggregateRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a AggregateStore {
    type Item = &'a StrokeAggregateRow;
    type IntoIter = std::slice::Iter<'a, StrokeAggregateRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Load the per-stroke table from any CSV reader.
pub fn load_aggregates<R: Read>(source: R) -> Result<AggregateStore> {
    let (columns, rows) = table::read_all(TABLE, source)?;
    let date_col = columns.require("date")?;
    let stroke_col = columns.require("swim_stroke")?;
    let distance_col = columns.require("total_distance")?;

    let mut parsed = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let row_no = i + 1;
        let raw_date = row.get(date_col).unwrap_or_default().trim();
        let date_key = parse_calendar_date(raw_date)
            .ok_or_else(|| DataLoadError::invalid_date(raw_date, TABLE, row_no))?;

        parsed.push(StrokeAggregateRow {
            date: raw_date.to_string(),
            date_key,
            swim_stroke: table::text(row, stroke_col).map(str::to_string),
            total_distance: table::number(row, distance_col, &columns, row_no)?,
        });
    }

    let store = AggregateStore::from_rows(parsed);
    info!(rows = store.len(), "loaded stroke aggregates");
    Ok(store)
}

/// Load the per-stroke table from a CSV file on disk.
pub fn load_aggregates_from_path(path: impl AsRef<Path>) -> Result<AggregateStore> {
    let path = path.as_ref();
    info!("loading stroke aggregates from {}", path.display());
    load_aggregates(table::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
date,swim_stroke,total_distance,workout_id
01/01/2024,freestyle,1500,7
01/01/2024,backstroke,500,7
01/01/2024,,200,7
02/10/2024,breaststroke,0,8
";

    #[test]
    fn keeps_raw_date_and_parses_key() {
        let store = load_aggregates(SAMPLE.as_bytes()).unwrap();
        assert_eq!(store.len(), 4);

        let first = &store.rows()[0];
        assert_eq!(first.date, "01/01/2024");
        assert_eq!(first.date_key, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn two_digit_years_join_the_right_workout() {
        let csv = "date,swim_stroke,total_distance\n1/5/24,freestyle,100\n01/05/24 7:05,kick,50\n";
        let store = load_aggregates(csv.as_bytes()).unwrap();
        let jan_5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert!(store.iter().all(|row| row.date_key == jan_5));
        assert_eq!(store.rows()[0].date, "1/5/24");
    }

    #[test]
    fn countable_rows_need_label_and_positive_distance() {
        let store = load_aggregates(SAMPLE.as_bytes()).unwrap();
        let countable: Vec<bool> = store.iter().map(StrokeAggregateRow::is_countable).collect();
        assert_eq!(countable, vec![true, true, false, false]);
    }

    #[test]
    fn unparsable_date_fails_the_load() {
        let csv = "date,swim_stroke,total_distance\n99/99/2024,freestyle,100\n";
        let err = load_aggregates(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn missing_stroke_column_fails_the_load() {
        let csv = "date,total_distance\n01/01/2024,100\n";
        let err = load_aggregates(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingColumn {
                column: "swim_stroke",
                ..
            }
        ));
    }
}
