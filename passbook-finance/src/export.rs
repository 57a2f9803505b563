//! CSV export of parsed transactions.

use anyhow::{Context, Result};
use passbook_core::{Direction, Transaction};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: &'a str,
    iso_date: Option<String>,
    #[serde(rename = "type")]
    direction: Direction,
    amount: Option<&'a str>,
    category: &'a str,
    description: &'a str,
}

/// Write one CSV row per transaction, in statement order.
///
/// `iso_date` is filled when `default_year` is given and the date token names
/// a real day; year-less tokens take that year.
pub fn write_csv<W: Write>(
    writer: W,
    txns: &[Transaction],
    default_year: Option<i32>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for t in txns {
        let iso_date = default_year
            .and_then(|year| t.calendar_date(year))
            .map(|d| d.format("%Y-%m-%d").to_string());

        wtr.serialize(CsvRow {
            date: &t.date,
            iso_date,
            direction: t.direction,
            amount: t.amount.as_deref(),
            category: &t.category,
            description: &t.description,
        })
        .with_context(|| format!("writing CSV row for {}", t.date))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}
