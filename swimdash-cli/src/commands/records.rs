//! The "All Records" table, one page at a time.

use anyhow::{Context, Result};
use clap::Parser;
use swimdash_core::catalog::{RecordRow, DEFAULT_PAGE_SIZE};
use swimdash_core::format::group_thousands;
use swimdash_core::{records_page, RecordColumn, RecordPage, TableRequest};

use super::{load_dashboard, print_json, GlobalArgs};

#[derive(Parser, Debug)]
pub struct RecordsArgs {
    /// Column to sort by (date, total_distance, max_heart_rate, num_lengths,
    /// swim_stroke, total_distance_miles, total_time_minutes)
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page number, starting at 1
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

impl RecordsArgs {
    fn request(&self) -> Result<TableRequest> {
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<RecordColumn>)
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("Invalid --sort")?;

        Ok(TableRequest {
            sort,
            descending: self.desc,
            page: self.page.saturating_sub(1),
            page_size: self.page_size,
        })
    }
}

pub fn run_records(args: RecordsArgs, global: &GlobalArgs) -> Result<()> {
    let request = args.request()?;
    let config = global.load_config()?;
    let dashboard = load_dashboard(&config)?;
    let page = records_page(dashboard.records(), &request);

    if global.json {
        return print_json(&page);
    }

    for line in render_table(&page) {
        println!("{}", line);
    }
    Ok(())
}

fn number(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| group_thousands(v, decimals))
        .unwrap_or_default()
}

fn cells(row: &RecordRow) -> [String; 7] {
    [
        row.date.clone(),
        number(row.total_distance, 0),
        number(row.max_heart_rate, 0),
        number(row.num_lengths, 0),
        row.swim_stroke.clone().unwrap_or_default(),
        number(row.total_distance_miles, 2),
        number(row.total_time_minutes, 0),
    ]
}

/// Header, separator, one line per row and a page footer.
fn render_table(page: &RecordPage) -> Vec<String> {
    let header: Vec<String> = RecordColumn::ALL
        .iter()
        .map(|c| c.title().to_string())
        .collect();
    let rows: Vec<[String; 7]> = page.rows.iter().map(cells).collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let join = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(join(&header[..]));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|r| join(&r[..])));
    lines.push(format!(
        "Page {} of {} ({} records)",
        page.page + 1,
        page.total_pages.max(1),
        page.total_rows
    ));
    lines
}
