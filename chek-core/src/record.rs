//! Persisted link records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::link::parse_receipt_date;

/// Origin portal of a receipt link. Stored as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LinkType {
    Unknown,
    TaxPortal,
    SilpoStore,
    ForaStore,
}

impl LinkType {
    pub fn code(self) -> u8 {
        match self {
            LinkType::Unknown => 0,
            LinkType::TaxPortal => 1,
            LinkType::SilpoStore => 2,
            LinkType::ForaStore => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LinkType::Unknown => "unknown",
            LinkType::TaxPortal => "tax.gov.ua",
            LinkType::SilpoStore => "Silpo",
            LinkType::ForaStore => "Fora",
        }
    }
}

impl From<LinkType> for u8 {
    fn from(t: LinkType) -> u8 {
        t.code()
    }
}

impl TryFrom<u8> for LinkType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LinkType::Unknown),
            1 => Ok(LinkType::TaxPortal),
            2 => Ok(LinkType::SilpoStore),
            3 => Ok(LinkType::ForaStore),
            other => Err(format!("unknown link type code {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    #[default]
    Pending,
    Done,
}

/// One stored receipt URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Unique key within the store
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    /// `DD.MM.YYYY`, optionally preceded by a time token
    pub date_str: String,
    #[serde(default)]
    pub status: LinkStatus,
}

impl LinkRecord {
    pub fn new(url: impl Into<String>, link_type: LinkType, date_str: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            link_type,
            date_str: date_str.into(),
            status: LinkStatus::Pending,
        }
    }

    pub fn purchase_date(&self) -> Option<NaiveDate> {
        parse_receipt_date(&self.date_str)
    }

    pub fn is_done(&self) -> bool {
        self.status == LinkStatus::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let mut r = LinkRecord::new(
            "https://receipt.silpo.elkasa.com.ua/?id=1",
            LinkType::SilpoStore,
            "22:51:16 30.07.2025",
        );
        r.status = LinkStatus::Done;

        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["type"], 2);
        assert_eq!(v["date_str"], "22:51:16 30.07.2025");
        assert_eq!(v["status"], "done");
        assert_eq!(v["url"], "https://receipt.silpo.elkasa.com.ua/?id=1");
    }

    #[test]
    fn test_missing_status_defaults_to_pending() {
        let json = r#"{"url":"u","type":1,"date_str":"01.02.2025"}"#;
        let r: LinkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.status, LinkStatus::Pending);
        assert_eq!(r.link_type, LinkType::TaxPortal);
    }

    #[test]
    fn test_out_of_range_type_rejected() {
        let json = r#"{"url":"u","type":7,"date_str":"01.02.2025","status":"pending"}"#;
        assert!(serde_json::from_str::<LinkRecord>(json).is_err());
    }

    #[test]
    fn test_purchase_date_strips_time() {
        let r = LinkRecord::new("u", LinkType::ForaStore, "08:00:01 05.01.2026");
        assert_eq!(r.purchase_date(), NaiveDate::from_ymd_opt(2026, 1, 5));
        assert!(!r.is_done());
    }
}
