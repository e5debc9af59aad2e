//! CSV plumbing shared by the record and aggregate loaders.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;

use crate::error::{DataLoadError, Result};

/// Cell spellings read as missing data, matching what spreadsheet and
/// dataframe exports write for empty values.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// True when a raw cell should be treated as missing.
pub fn is_null(raw: &str) -> bool {
    NULL_MARKERS.contains(&raw.trim())
}

/// Header lookup for one source table.
#[derive(Debug, Clone)]
pub(crate) struct Columns {
    table: &'static str,
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Columns {
    /// Blank header cells become `Unnamed: <n>`, the name an exported
    /// dataframe index column gets when read back.
    pub(crate) fn new(table: &'static str, headers: &StringRecord) -> Self {
        let names: Vec<String> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.trim();
                if name.is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    name.to_string()
                }
            })
            .collect();

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }

        Self {
            table,
            names,
            index,
        }
    }

    pub(crate) fn require(&self, column: &'static str) -> Result<usize> {
        self.index
            .get(column)
            .copied()
            .ok_or_else(|| DataLoadError::missing_column(column, self.table))
    }

    pub(crate) fn optional(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn table(&self) -> &'static str {
        self.table
    }
}

/// Non-null, trimmed cell text.
pub(crate) fn text(record: &StringRecord, idx: usize) -> Option<&str> {
    record
        .get(idx)
        .filter(|raw| !is_null(raw))
        .map(str::trim)
}

/// Numeric cell; nulls (including a literal NaN) come back as `None`.
pub(crate) fn number(
    record: &StringRecord,
    idx: usize,
    columns: &Columns,
    row: usize,
) -> Result<Option<f64>> {
    let Some(raw) = text(record, idx) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(DataLoadError::invalid_number(
            raw,
            columns.names()[idx].clone(),
            columns.table(),
            row,
        )),
    }
}

/// Same as [`number`] but for a column that may be absent from the header.
pub(crate) fn optional_number(
    record: &StringRecord,
    idx: Option<usize>,
    columns: &Columns,
    row: usize,
) -> Result<Option<f64>> {
    match idx {
        Some(idx) => number(record, idx, columns, row),
        None => Ok(None),
    }
}

/// Open a CSV source file.
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| DataLoadError::io(path, err))
}

/// Build a CSV reader with the settings both tables share.
pub(crate) fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

/// Read the header row and every data row up front.
///
/// Row numbers reported in errors are 1-based data rows (the header is row 0).
pub(crate) fn read_all<R: Read>(
    table: &'static str,
    source: R,
) -> Result<(Columns, Vec<StringRecord>)> {
    let mut rdr = reader(source);
    let headers = rdr
        .headers()
        .map_err(|err| DataLoadError::csv(table, err))?
        .clone();
    let columns = Columns::new(table, &headers);

    let rows = rdr
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|err| DataLoadError::csv(table, err))?;

    Ok((columns, rows))
}
