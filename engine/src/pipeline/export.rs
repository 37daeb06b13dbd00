// Writers for the output table: JSON for the chart front end, CSV for spreadsheets.
use std::io::Write;

use shared::models::OutputTable;

use crate::error::EngineError;

const CSV_HEADER: [&str; 9] = ["Date", "Open", "High", "Low", "Close", "SMA", "RSI", "MACD_Diff", "Signal"];

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Undefined values are written as empty cells, the signal as 1 / -1 / 0.
pub fn write_csv<W: Write>(table: &OutputTable, writer: W) -> Result<(), EngineError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in &table.rows {
        wtr.write_record([
            row.timestamp.format("%Y-%m-%d").to_string(),
            cell(row.open),
            cell(row.high),
            cell(row.low),
            row.close.to_string(),
            cell(row.sma),
            cell(row.rsi),
            cell(row.macd_diff),
            row.signal.code().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(table: &OutputTable, writer: W) -> Result<(), EngineError> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}
