//! Read-only listings over the record store: picker options, the yardage
//! series and the paged records table.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{RecordStore, WorkoutRecord};

/// Rows per page of the records table unless the caller asks otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Label of the catch-all entry at the top of the year picker.
pub const ALL_YEARS_LABEL: &str = "All Years";

/// One entry of the year picker. `value` is what goes back into
/// [`Scope::from_year_selection`](crate::Scope::from_year_selection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOption {
    pub label: String,
    pub value: String,
}

/// Display dates of every workout, in source order, without repeats.
pub fn workout_options(store: &RecordStore) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut options = Vec::with_capacity(store.len());
    for record in store {
        if seen.insert(record.display_date.as_str()) {
            options.push(record.display_date.clone());
        }
    }
    options
}

/// Distinct workout years, ascending.
pub fn years(store: &RecordStore) -> Vec<i32> {
    store
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Year picker entries: "All Years" first, then each year ascending.
pub fn year_options(store: &RecordStore) -> Vec<YearOption> {
    std::iter::once(YearOption {
        label: ALL_YEARS_LABEL.to_string(),
        value: "all".to_string(),
    })
    .chain(years(store).into_iter().map(|year| YearOption {
        label: year.to_string(),
        value: year.to_string(),
    }))
    .collect()
}

/// One point of the yardage-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YardagePoint {
    pub date: String,
    pub total_distance: f64,
}

/// `(date, total_distance)` in source order; workouts without a distance are
/// left out rather than plotted as zero.
pub fn yardage_series(store: &RecordStore) -> Vec<YardagePoint> {
    store
        .iter()
        .filter_map(|r| {
            r.total_distance.map(|total_distance| YardagePoint {
                date: r.display_date.clone(),
                total_distance,
            })
        })
        .collect()
}

/// Sortable columns of the records table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordColumn {
    #[default]
    Date,
    TotalDistance,
    MaxHeartRate,
    NumLengths,
    SwimStroke,
    TotalDistanceMiles,
    TotalTimeMinutes,
}

impl RecordColumn {
    pub const ALL: [RecordColumn; 7] = [
        Self::Date,
        Self::TotalDistance,
        Self::MaxHeartRate,
        Self::NumLengths,
        Self::SwimStroke,
        Self::TotalDistanceMiles,
        Self::TotalTimeMinutes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::TotalDistance => "total_distance",
            Self::MaxHeartRate => "max_heart_rate",
            Self::NumLengths => "num_lengths",
            Self::SwimStroke => "swim_stroke",
            Self::TotalDistanceMiles => "total_distance_miles",
            Self::TotalTimeMinutes => "total_time_minutes",
        }
    }

    /// Column heading as the table shows it.
    pub fn title(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::TotalDistance => "Total Distance",
            Self::MaxHeartRate => "Max Heart Rate",
            Self::NumLengths => "Number of Lengths",
            Self::SwimStroke => "Stroke Type",
            Self::TotalDistanceMiles => "Distance (Miles)",
            Self::TotalTimeMinutes => "Time (Minutes)",
        }
    }

    fn number(self, record: &WorkoutRecord) -> Option<f64> {
        match self {
            Self::TotalDistance => record.total_distance,
            Self::MaxHeartRate => record.max_heart_rate,
            Self::NumLengths => record.num_lengths,
            Self::TotalDistanceMiles => record.total_distance_miles,
            Self::TotalTimeMinutes => record.total_time_minutes,
            Self::Date | Self::SwimStroke => None,
        }
    }

    /// Ascending comparison; missing values always sort after present ones.
    fn compare(self, a: &WorkoutRecord, b: &WorkoutRecord, descending: bool) -> Ordering {
        let flip = |ord: Ordering| if descending { ord.reverse() } else { ord };
        match self {
            Self::Date => flip(a.date.cmp(&b.date)),
            Self::SwimStroke => nulls_last(a.swim_stroke.as_ref(), b.swim_stroke.as_ref(), |x, y| {
                flip(x.cmp(y))
            }),
            _ => nulls_last(self.number(a), self.number(b), |x, y| flip(x.total_cmp(&y))),
        }
    }
}

fn nulls_last<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FromStr for RecordColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|col| col.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown column '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// The visible columns of one workout in the records table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub date: String,
    pub total_distance: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub num_lengths: Option<f64>,
    pub swim_stroke: Option<String>,
    pub total_distance_miles: Option<f64>,
    pub total_time_minutes: Option<f64>,
}

impl From<&WorkoutRecord> for RecordRow {
    fn from(r: &WorkoutRecord) -> Self {
        Self {
            date: r.display_date.clone(),
            total_distance: r.total_distance,
            max_heart_rate: r.max_heart_rate,
            num_lengths: r.num_lengths,
            swim_stroke: r.swim_stroke.clone(),
            total_distance_miles: r.total_distance_miles,
            total_time_minutes: r.total_time_minutes,
        }
    }
}

/// Sort and paging request for the records table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRequest {
    pub sort: Option<RecordColumn>,
    pub descending: bool,
    /// Zero-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableRequest {
    fn default() -> Self {
        Self {
            sort: None,
            descending: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of the records table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    pub rows: Vec<RecordRow>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

/// Sort (stable, source order without a sort column) and slice the table.
///
/// A page past the end comes back empty; a zero page size is treated as the
/// default.
pub fn records_page(store: &RecordStore, request: &TableRequest) -> RecordPage {
    let page_size = if request.page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        request.page_size
    };

    let mut ordered: Vec<&WorkoutRecord> = store.iter().collect();
    if let Some(column) = request.sort {
        ordered.sort_by(|a, b| column.compare(a, b, request.descending));
    }

    let total_rows = ordered.len();
    let rows = ordered
        .into_iter()
        .skip(request.page.saturating_mul(page_size))
        .take(page_size)
        .map(RecordRow::from)
        .collect();

    RecordPage {
        rows,
        page: request.page,
        page_size,
        total_rows,
        total_pages: total_rows.div_ceil(page_size),
    }
}
