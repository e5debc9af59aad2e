pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod date;
pub mod error;
pub mod format;
pub mod query;
pub mod record;
pub mod scope;
mod table;

pub use aggregate::{load_aggregates, load_aggregates_from_path, AggregateStore, StrokeAggregateRow};
pub use catalog::{
    records_page, workout_options, year_options, yardage_series, RecordColumn, RecordPage,
    TableRequest, YardagePoint, YearOption,
};
pub use config::{DashConfig, DataConfig};
pub use dashboard::Dashboard;
pub use error::{DataLoadError, ScopeParseError};
pub use format::DistanceUnit;
pub use query::{
    period_summary, stroke_breakdown, workout_summary, Average, PeriodSummary, StrokeShare,
    WorkoutSummary,
};
pub use record::{load_records, load_records_from_path, RecordStore, WorkoutRecord};
pub use scope::{resolve_scope, AggregateView, RecordView, Resolve, Scope};
pub use table::is_null;
