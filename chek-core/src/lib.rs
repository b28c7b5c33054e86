//! chek-core: link records, period selection and the record store for the receipt scraper

pub mod batch;
pub mod error;
pub mod intake;
pub mod link;
pub mod merge;
pub mod period;
pub mod record;
pub mod store;

pub use batch::{BatchReport, ReceiptProcessor, process_period, run_batch};
pub use error::ChekError;
pub use intake::{DateResolver, accept_link};
pub use link::{date_from_url, detect_link_type, parse_lenient, parse_receipt_date};
pub use merge::{MergeSummary, Outcome, apply_outcomes, index_records, merge_one};
pub use period::{Period, Selection, select, select_urls};
pub use record::{LinkRecord, LinkStatus, LinkType};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
