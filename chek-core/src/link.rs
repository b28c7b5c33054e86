//! URL classification and purchase-date extraction.

use chrono::NaiveDate;
use url::{ParseError, Url};

use crate::error::ChekError;
use crate::record::LinkType;

const TAX_PORTAL_HOST: &str = "cabinet.tax.gov.ua";
const SILPO_HOST: &str = "receipt.silpo.elkasa.com.ua";
const FORA_HOST: &str = "receipt.fora.elkasa.com.ua";

/// Stored date format, e.g. `30.07.2025`
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Classify a receipt URL by portal. Never yields `LinkType::Unknown`.
pub fn detect_link_type(url: &str) -> Result<LinkType, ChekError> {
    if url.contains(TAX_PORTAL_HOST) {
        Ok(LinkType::TaxPortal)
    } else if url.contains(SILPO_HOST) {
        Ok(LinkType::SilpoStore)
    } else if url.contains(FORA_HOST) {
        Ok(LinkType::ForaStore)
    } else {
        Err(ChekError::UnrecognizedUrl(url.to_string()))
    }
}

/// Parse a link, assuming `https://` when the scheme was left off
/// (e.g. `cabinet.tax.gov.ua/cashregs/check?...`).
pub fn parse_lenient(url: &str) -> Result<Url, ChekError> {
    let url = url.trim();
    match Url::parse(url) {
        Ok(u) => Ok(u),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{url}"))
            .map_err(|_| ChekError::MalformedUrl(url.to_string())),
        Err(_) => Err(ChekError::MalformedUrl(url.to_string())),
    }
}

/// Read the `date=YYYYMMDD` query parameter of a tax portal link as `DD.MM.YYYY`.
pub fn date_from_url(url: &str) -> Result<String, ChekError> {
    let parsed = parse_lenient(url)?;
    let raw = parsed
        .query_pairs()
        .find(|(k, _)| k == "date")
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| ChekError::NoDateParam(url.to_string()))?;

    let date = NaiveDate::parse_from_str(&raw, "%Y%m%d")
        .map_err(|_| ChekError::InvalidDate(raw.clone()))?;
    Ok(date.format(DATE_FORMAT).to_string())
}

/// Parse a stored date string. Only the last whitespace-delimited token counts,
/// so `22:51:16 30.07.2025` reads as 30 July 2025.
pub fn parse_receipt_date(date_str: &str) -> Option<NaiveDate> {
    let token = date_str.split_whitespace().last()?;
    NaiveDate::parse_from_str(token, DATE_FORMAT).ok()
}
