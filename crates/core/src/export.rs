//! Spreadsheet export projection.
//!
//! Shapes the active report projection into a single sheet: fixed column
//! headers, typed cells, and a dated file name. Writing the workbook is
//! the caller's job.

use chrono::NaiveDate;

use crate::inventory::{BomEntry, InventoryRow};
use crate::location_code::join_display;
use crate::report::{
    flatten_bom, summarize_by_item, summarize_by_location, BomRow, ItemSummary, LocationRecord,
    ReportTab,
};

/// Title prefix shared by every export file name.
pub const REPORT_TITLE: &str = "庫存報表";

/// Extension of the written workbook.
pub const EXPORT_EXTENSION: &str = "xlsx";

pub const ITEM_HEADERS: &[&str] = &[
    "元件品號", "品名", "規格", "庫存單位", "庫別名稱", "儲位代碼", "數量", "安全庫存",
];

pub const LOCATION_HEADERS: &[&str] = &[
    "儲位代碼", "元件品號", "品名", "規格", "庫存單位", "庫別名稱", "數量",
];

pub const BOM_HEADERS: &[&str] = &[
    "主件品號",
    "元件品號",
    "品名",
    "規格",
    "單/複數單位",
    "取替代品群組",
    "屬性",
    "組成用量",
    "當前庫存量",
    "安全庫存",
    "儲位",
];

/// Fixed `單/複數單位` value of every BOM line.
const BOM_UNIT_KIND: &str = "單一";
/// Fixed `屬性` value of every BOM line.
const BOM_SOURCING: &str = "廠內";

/// A typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One-sheet workbook ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub sheet_name: &'static str,
    pub file_name: String,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<CellValue>>,
}

/// Sheet name of each projection.
pub fn sheet_label(tab: ReportTab) -> &'static str {
    match tab {
        ReportTab::Item => "料件總表",
        ReportTab::Location => "儲位總表",
        ReportTab::Bom => "主件總表",
    }
}

/// `庫存報表_<sheet>_<YYYYMMDD>.xlsx`
pub fn export_file_name(tab: ReportTab, date: NaiveDate) -> String {
    format!(
        "{REPORT_TITLE}_{}_{}.{EXPORT_EXTENSION}",
        sheet_label(tab),
        date.format("%Y%m%d")
    )
}

fn sheet(tab: ReportTab, date: NaiveDate, headers: &'static [&'static str]) -> ExportSheet {
    ExportSheet {
        sheet_name: sheet_label(tab),
        file_name: export_file_name(tab, date),
        headers,
        rows: Vec::new(),
    }
}

pub fn item_sheet(items: &[ItemSummary], date: NaiveDate) -> ExportSheet {
    let mut out = sheet(ReportTab::Item, date, ITEM_HEADERS);
    out.rows = items
        .iter()
        .map(|i| {
            vec![
                i.barcode.as_str().into(),
                i.name.as_str().into(),
                i.description.as_str().into(),
                i.unit.as_str().into(),
                i.category.as_str().into(),
                join_display(&i.locations, "\n").into(),
                i.total_qty.into(),
                i.safe_stock.into(),
            ]
        })
        .collect();
    out
}

pub fn location_sheet(records: &[LocationRecord], date: NaiveDate) -> ExportSheet {
    let mut out = sheet(ReportTab::Location, date, LOCATION_HEADERS);
    out.rows = records
        .iter()
        .map(|l| {
            vec![
                l.code.as_str().into(),
                l.barcode.as_str().into(),
                l.name.as_str().into(),
                l.description.as_str().into(),
                l.unit.as_str().into(),
                l.category.as_str().into(),
                l.quantity.into(),
            ]
        })
        .collect();
    out
}

/// Every BOM line carries its main barcode in the exported sheet.
pub fn bom_sheet(rows: &[BomRow], date: NaiveDate) -> ExportSheet {
    let mut out = sheet(ReportTab::Bom, date, BOM_HEADERS);
    out.rows = rows
        .iter()
        .map(|b| {
            vec![
                b.main_barcode.as_str().into(),
                b.component_barcode.as_str().into(),
                b.component_name.as_str().into(),
                b.description.as_str().into(),
                BOM_UNIT_KIND.into(),
                "".into(),
                BOM_SOURCING.into(),
                b.required_qty.into(),
                b.current_stock.into(),
                b.safe_stock.into(),
                b.locations.as_str().into(),
            ]
        })
        .collect();
    out
}

/// Shape the projection for `tab` from a fetched snapshot.
pub fn build_export(
    tab: ReportTab,
    rows: &[InventoryRow],
    bom: &[BomEntry],
    date: NaiveDate,
) -> ExportSheet {
    match tab {
        ReportTab::Item => item_sheet(&summarize_by_item(rows), date),
        ReportTab::Location => location_sheet(&summarize_by_location(rows), date),
        ReportTab::Bom => bom_sheet(&flatten_bom(bom), date),
    }
}
