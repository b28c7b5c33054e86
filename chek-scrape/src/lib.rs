//! chek-scrape: HTTP fetching, receipt processing and spreadsheet export.

pub mod client;
pub mod export;
pub mod processor;

pub use client::{ClientOptions, ReceiptClient};
pub use export::{SpreadsheetExport, EXPORT_COLUMNS};
pub use processor::{ScrapeProcessor, extract_receipt};
