//! Accepting a new receipt link into the store.

use std::future::Future;

use log::info;

use crate::error::ChekError;
use crate::link::{date_from_url, detect_link_type, parse_receipt_date};
use crate::record::{LinkRecord, LinkType};
use crate::store::RecordStore;

/// Looks up the purchase date printed on a store receipt page.
pub trait DateResolver {
    fn date_from_page(&self, url: &str) -> impl Future<Output = Result<String, ChekError>>;
}

/// Classify, de-duplicate, date and persist a new link.
///
/// Rejections (unrecognized URL, duplicate) and date failures leave the store untouched.
pub async fn accept_link<S, R>(store: &S, resolver: &R, url: &str) -> Result<LinkRecord, ChekError>
where
    S: RecordStore,
    R: DateResolver,
{
    let url = url.trim();
    let link_type = detect_link_type(url)?;

    // checked before any network round trip
    if store.contains(url)? {
        return Err(ChekError::Duplicate(url.to_string()));
    }

    let date_str = match link_type {
        LinkType::TaxPortal => date_from_url(url)?,
        _ => resolver.date_from_page(url).await?,
    };
    if parse_receipt_date(&date_str).is_none() {
        return Err(ChekError::InvalidDate(date_str));
    }

    let record = LinkRecord::new(url, link_type, date_str);
    store.append_one(record.clone())?;
    info!("stored {} ({}) dated {}", record.url, link_type.label(), record.date_str);
    Ok(record)
}
