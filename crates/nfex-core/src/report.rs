//! Report writers for the extraction table.
//!
//! All writers render the same fixed columns in batch order; the total
//! value column carries currency text rather than a number, matching the
//! on-screen table.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::models::batch::ExtractionBatch;
use crate::models::invoice::COLUMNS;

/// Sheet name used in the exported spreadsheet.
pub const SHEET_NAME: &str = "Notas Fiscais";

/// Default file name for the exported spreadsheet.
pub const DEFAULT_XLSX_NAME: &str = "extracao_notas_fiscais.xlsx";

/// Write the batch table as a single-sheet spreadsheet.
pub fn write_xlsx(batch: &ExtractionBatch, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (row, record) in batch.records.iter().enumerate() {
        for (col, cell) in record.row().iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, cell.as_str())?;
        }
    }
    sheet.autofit();

    workbook.save(path)?;
    Ok(())
}

/// Render the batch table as CSV text.
pub fn to_csv(batch: &ExtractionBatch) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(COLUMNS)?;
        for record in &batch.records {
            wtr.write_record(record.row())?;
        }
        wtr.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Render the whole batch, records plus failures, as pretty JSON.
pub fn to_json(batch: &ExtractionBatch) -> Result<String> {
    Ok(serde_json::to_string_pretty(batch)?)
}
