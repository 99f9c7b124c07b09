//! Writes an [`ExportSheet`] to an `.xlsx` workbook on disk.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

use stockmap_core::export::{CellValue, ExportSheet};

use crate::error::DashboardError;

const DEFAULT_COLUMN_WIDTH: f64 = 16.0;

/// Write `sheet` into `dir` under its file name and return the full path.
pub fn write_sheet(sheet: &ExportSheet, dir: &Path) -> Result<PathBuf, DashboardError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&sheet.file_name);

    let header = Format::new().set_bold();
    let wrapped = Format::new().set_text_wrap();

    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.sheet_name)?;

        for (col, title) in sheet.headers.iter().enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, DEFAULT_COLUMN_WIDTH)?;
            worksheet.write_string_with_format(0, col, *title, &header)?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    // Multi-line location lists need wrapping to stay readable.
                    CellValue::Text(text) if text.contains('\n') => {
                        worksheet.write_string_with_format(r, col, text, &wrapped)?;
                    }
                    CellValue::Text(text) => {
                        worksheet.write_string(r, col, text)?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(r, col, *n)?;
                    }
                }
            }
        }
    }

    workbook.save(&path)?;
    tracing::info!(
        path = %path.display(),
        sheet = sheet.sheet_name,
        rows = sheet.rows.len(),
        "Export written",
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use stockmap_core::export::item_sheet;
    use stockmap_core::location_code::LocationQuantity;
    use stockmap_core::report::ItemSummary;

    use super::*;

    #[test]
    fn writes_workbook_named_after_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let item = ItemSummary {
            barcode: "C1".into(),
            name: "Gear".into(),
            description: String::new(),
            unit: "pcs".into(),
            category: String::new(),
            safe_stock: 2,
            total_qty: 5,
            locations: vec![
                LocationQuantity::new("L01", 3),
                LocationQuantity::new("L02", 2),
            ],
        };
        let sheet = item_sheet(&[item], NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());

        let path = write_sheet(&sheet, dir.path()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "庫存報表_料件總表_20240309.xlsx"
        );
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports/daily");
        let sheet = item_sheet(&[], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let path = write_sheet(&sheet, &nested).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
