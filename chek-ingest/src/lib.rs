//! chek-ingest: receipt page extraction and fiscal receipt text parsing.

pub mod types;
pub mod parsers;

pub use types::{Receipt, ReceiptItem, ReceiptMeta};
pub use parsers::fiscal_text::parse_receipt_text;
pub use parsers::store_page::{date_from_store_page, fiscal_link_from_store_page, receipt_text_from_page};
