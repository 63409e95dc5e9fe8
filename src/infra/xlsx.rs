//! Two-column item sheet codec: write styled workbooks, read uploaded ones.

use crate::error::AppError;
use calamine::{Data, Range, Reader, Xlsx};
use chrono::NaiveTime;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use std::io::Cursor;

pub const HEADERS: [&str; 2] = ["Name", "Description"];

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADER_FILL: u32 = 0x366092;
const WIDTH_PADDING: usize = 2;
const MAX_COLUMN_WIDTH: usize = 50;
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Longest string Excel stores in a single cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// One data row as it appears in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub name: String,
    pub description: Option<String>,
}

/// A data row read back from an uploaded sheet. Values are trimmed; blank
/// cells become `None` / empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// 1-based row number as shown in Excel.
    pub row_number: u32,
    pub name: String,
    pub description: Option<String>,
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Width for a column holding `cells`: longest value plus padding, capped.
pub fn column_width<'a>(cells: impl IntoIterator<Item = &'a str>) -> usize {
    let longest = cells
        .into_iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    (longest + WIDTH_PADDING).min(MAX_COLUMN_WIDTH)
}

/// Build a single-sheet workbook with the styled header row followed by `rows`.
pub fn write_item_sheet(sheet_name: &str, rows: &[SheetRow]) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name).map_err(xlsx_write_error)?;

        let header_format = header_format();
        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(xlsx_write_error)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let excel_row = (idx + 1) as u32;
            worksheet
                .write_string(excel_row, 0, &row.name)
                .map_err(xlsx_write_error)?;
            if let Some(description) = &row.description {
                worksheet
                    .write_string(excel_row, 1, description)
                    .map_err(xlsx_write_error)?;
            }
        }

        let name_width = column_width(
            std::iter::once(HEADERS[0]).chain(rows.iter().map(|r| r.name.as_str())),
        );
        let description_width = column_width(
            std::iter::once(HEADERS[1])
                .chain(rows.iter().filter_map(|r| r.description.as_deref())),
        );
        worksheet
            .set_column_width(0, name_width as f64)
            .map_err(xlsx_write_error)?;
        worksheet
            .set_column_width(1, description_width as f64)
            .map_err(xlsx_write_error)?;
    }

    workbook.save_to_buffer().map_err(xlsx_write_error)
}

fn xlsx_write_error(e: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::Spreadsheet(e.to_string())
}

/// Read the data rows of the first sheet of an xlsx workbook.
///
/// The first populated row must be the `Name`, `Description` header (any
/// case); columns past the second are ignored and fully blank rows dropped.
pub fn read_item_sheet(bytes: &[u8]) -> Result<Vec<ParsedRow>, AppError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::Parse(format!("not a valid xlsx workbook ({})", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Parse("workbook has no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AppError::Parse(format!("failed to read sheet '{}': {}", sheet_name, e)))?;

    let (header_row, _) = range
        .start()
        .ok_or_else(|| AppError::Parse("sheet is empty; expected a header row".into()))?;
    let (last_row, _) = range.end().unwrap_or((header_row, 0));

    check_header(&range, header_row)?;

    let mut rows = Vec::new();
    for row in (header_row + 1)..=last_row {
        let name = cell_text(&range, row, 0).unwrap_or_default();
        let description = cell_text(&range, row, 1);
        if name.is_empty() && description.is_none() {
            continue;
        }
        rows.push(ParsedRow {
            row_number: row + 1,
            name,
            description,
        });
    }
    Ok(rows)
}

fn check_header(range: &Range<Data>, header_row: u32) -> Result<(), AppError> {
    for (col, expected) in HEADERS.iter().enumerate() {
        let found = cell_text(range, header_row, col as u32).unwrap_or_default();
        if !found.eq_ignore_ascii_case(expected) {
            return Err(AppError::Parse(format!(
                "expected header '{}' in column {}, found '{}'",
                expected,
                col + 1,
                found
            )));
        }
    }
    Ok(())
}

/// Whole numbers print without a fractional part, but only while they are
/// exactly representable; larger values keep their full decimal form.
fn float_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Trimmed text of a cell at an absolute position; `None` when blank.
fn cell_text(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    let text = match range.get_value((row, col))? {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_text(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if naive.time() == NaiveTime::MIN => {
                naive.format("%Y-%m-%d").to_string()
            }
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => float_text(dt.as_f64()),
        },
        Data::Error(_) | Data::Empty => return None,
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
