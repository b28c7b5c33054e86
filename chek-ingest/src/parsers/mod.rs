pub mod fiscal_text;
pub mod store_page;
