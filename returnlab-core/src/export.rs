//! CSV export of pipeline tables.
//!
//! Output only. Exported files are never read back by the pipeline.

use crate::data::DataError;
use crate::table::PriceTable;
use std::io::Write;
use std::path::Path;

/// Serialize a table as CSV: `Date,<symbol>...`, missing cells empty.
pub fn write_table<W: Write>(table: &PriceTable, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Date".to_string()];
    header.extend(table.symbols().into_iter().map(String::from));
    wtr.write_record(&header)?;

    for (row, date) in table.dates().iter().enumerate() {
        let mut record = vec![date.format("%Y-%m-%d").to_string()];
        record.extend(
            table
                .row(row)
                .into_iter()
                .map(|cell| cell.map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(table: &PriceTable) -> Result<String, DataError> {
    let mut buf = Vec::new();
    write_table(table, &mut buf).map_err(|e| DataError::Csv {
        path: "<memory>".into(),
        message: e.to_string(),
    })?;
    String::from_utf8(buf).map_err(|e| DataError::Csv {
        path: "<memory>".into(),
        message: e.to_string(),
    })
}

pub fn write_csv(table: &PriceTable, path: &Path) -> Result<(), DataError> {
    let file = std::fs::File::create(path)?;
    write_table(table, file).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
