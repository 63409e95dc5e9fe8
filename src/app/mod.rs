//! Application use cases.

mod data_transfer;
mod item;

pub use data_transfer::{
    excel_template, export_items_xlsx, import_items_xlsx, ItemImportResult, SpreadsheetFile,
    DATA_FILE_NAME, TEMPLATE_FILE_NAME, TEMPLATE_SAMPLE_DESCRIPTION, TEMPLATE_SAMPLE_NAME,
};
pub use item::{
    item_create, item_delete, item_delete_many, item_get, item_list, item_update, ItemCreateReq,
    ItemDeleteManyReq, ItemDeleteManyResult, ItemDto, ItemUpdateReq,
};
