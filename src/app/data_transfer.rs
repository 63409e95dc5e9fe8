//! Excel template / export / import use cases.

use crate::app::item::{item_create, item_list, ItemCreateReq, ItemDto};
use crate::error::AppError;
use crate::infra::xlsx::{read_item_sheet, write_item_sheet, SheetRow, XLSX_CONTENT_TYPE};
use crate::infra::DbPool;
use serde::Serialize;
use std::path::Path;

pub const TEMPLATE_FILE_NAME: &str = "items_template.xlsx";
pub const DATA_FILE_NAME: &str = "items_data.xlsx";
pub const TEMPLATE_SAMPLE_NAME: &str = "New Item";
pub const TEMPLATE_SAMPLE_DESCRIPTION: &str = "This will create a new item";

/// A generated workbook ready to be sent as an attachment.
#[derive(Debug)]
pub struct SpreadsheetFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
pub struct ItemImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub items: Vec<ItemDto>,
    pub message: String,
}

/// Blank import template: header row plus one sample row.
pub fn excel_template() -> Result<SpreadsheetFile, AppError> {
    let sample = [SheetRow {
        name: TEMPLATE_SAMPLE_NAME.to_string(),
        description: Some(TEMPLATE_SAMPLE_DESCRIPTION.to_string()),
    }];
    Ok(SpreadsheetFile {
        file_name: TEMPLATE_FILE_NAME,
        content_type: XLSX_CONTENT_TYPE,
        bytes: write_item_sheet("Items Template", &sample)?,
    })
}

/// All items as a workbook. Ids are left out so the file can be re-imported.
pub fn export_items_xlsx(pool: &DbPool) -> Result<SpreadsheetFile, AppError> {
    let rows: Vec<SheetRow> = item_list(pool)?
        .into_iter()
        .map(|item| SheetRow {
            name: item.name,
            description: item.description,
        })
        .collect();
    log::info!("Exporting {} items to Excel", rows.len());
    Ok(SpreadsheetFile {
        file_name: DATA_FILE_NAME,
        content_type: XLSX_CONTENT_TYPE,
        bytes: write_item_sheet("Items Data", &rows)?,
    })
}

fn has_xlsx_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Insert every row of an uploaded workbook as a new item.
///
/// Rows without a name are skipped and counted; everything else is created
/// one row at a time, so rows inserted before a failure stay inserted.
pub fn import_items_xlsx(
    pool: &DbPool,
    file_name: &str,
    bytes: &[u8],
) -> Result<ItemImportResult, AppError> {
    if !has_xlsx_extension(file_name) {
        return Err(AppError::UnsupportedFormat(format!(
            "only .xlsx files are allowed (got '{}')",
            file_name
        )));
    }

    let rows = read_item_sheet(bytes)?;

    let mut items = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        if row.name.is_empty() {
            log::warn!("Row {}: missing name, skipping", row.row_number);
            skipped += 1;
            continue;
        }
        let item = item_create(
            pool,
            ItemCreateReq {
                name: row.name,
                description: row.description,
            },
        )?;
        log::info!("Created item {} from row {}", item.id, row.row_number);
        items.push(item);
    }

    let message = import_message(items.len(), skipped);
    log::info!("{}", message);
    Ok(ItemImportResult {
        imported: items.len(),
        skipped,
        items,
        message,
    })
}

fn import_message(imported: usize, skipped: usize) -> String {
    let mut parts = Vec::new();
    if imported > 0 {
        parts.push(format!("{} new items created", imported));
    }
    if skipped > 0 {
        parts.push(format!("{} rows skipped", skipped));
    }
    if parts.is_empty() {
        return "Successfully processed Excel file: no rows found".to_string();
    }
    format!("Successfully processed Excel file: {}", parts.join(", "))
}
