//! Receipt processing: resolve the fiscal receipt, read its items, export them.

use anyhow::Result;
use chek_core::link::DATE_FORMAT;
use chek_core::{LinkRecord, LinkType, Outcome, ReceiptProcessor, date_from_url};
use chek_ingest::{Receipt, ReceiptMeta, fiscal_link_from_store_page, parse_receipt_text, receipt_text_from_page};
use log::{info, warn};

use crate::client::ReceiptClient;
use crate::export::SpreadsheetExport;

/// Parse a fetched fiscal receipt page. `None` when the page holds no receipt
/// text or no items (not formed yet, captcha).
///
/// The date column comes from the fiscal URL, falling back to the stored date.
pub fn extract_receipt(
    record: &LinkRecord,
    fiscal_url: &str,
    page_html: &str,
    check_number: usize,
) -> Result<Option<Receipt>> {
    let Some(text) = receipt_text_from_page(page_html) else {
        return Ok(None);
    };

    let date = date_from_url(fiscal_url)
        .ok()
        .or_else(|| record.purchase_date().map(|d| d.format(DATE_FORMAT).to_string()))
        .unwrap_or_default();
    let meta = ReceiptMeta {
        date,
        source_url: fiscal_url.to_string(),
        check_number,
    };

    let receipt = parse_receipt_text(&text, &meta)?;
    if receipt.items.is_empty() {
        return Ok(None);
    }
    Ok(Some(receipt))
}

/// Scrapes receipts over HTTP and appends their items to the spreadsheet.
#[derive(Debug, Clone)]
pub struct ScrapeProcessor {
    client: ReceiptClient,
    export: SpreadsheetExport,
}

impl ScrapeProcessor {
    pub fn new(client: ReceiptClient, export: SpreadsheetExport) -> Self {
        Self { client, export }
    }

    pub fn export(&self) -> &SpreadsheetExport {
        &self.export
    }

    async fn fiscal_url(&self, record: &LinkRecord) -> Result<Option<String>> {
        match record.link_type {
            LinkType::TaxPortal => Ok(Some(record.url.clone())),
            LinkType::SilpoStore | LinkType::ForaStore => {
                let page = self.client.fetch_html(&record.url).await?;
                Ok(fiscal_link_from_store_page(&page))
            }
            LinkType::Unknown => Ok(None),
        }
    }
}

impl ReceiptProcessor for ScrapeProcessor {
    async fn process(&mut self, record: &LinkRecord, check_number: usize) -> Result<Outcome> {
        if record.link_type == LinkType::Unknown {
            return Ok(Outcome::Failed(format!("unsupported link type: {}", record.url)));
        }

        let Some(fiscal_url) = self.fiscal_url(record).await? else {
            warn!("no fiscal receipt link on {}", record.url);
            return Ok(Outcome::NotReady);
        };

        let page = self.client.fetch_html(&fiscal_url).await?;
        let Some(receipt) = extract_receipt(record, &fiscal_url, &page, check_number)? else {
            return Ok(Outcome::NotReady);
        };

        let written = self.export.append(&receipt.items)?;
        info!("{}: {} items from {}", record.url, written, receipt.shop);
        Ok(Outcome::Success)
    }
}
