use serde::{Deserialize, Serialize};

/// Context the receipt text itself does not carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptMeta {
    /// Purchase date as `DD.MM.YYYY` (empty when unknown)
    pub date: String,
    /// Fiscal receipt URL the text was read from
    pub source_url: String,
    /// 1-based receipt number used in the spreadsheet link label
    pub check_number: usize,
}

impl ReceiptMeta {
    /// Spreadsheet hyperlink formula pointing back at the fiscal receipt.
    pub fn source_formula(&self) -> String {
        format!(
            "=HYPERLINK(\"{}\", \"чек{}\")",
            self.source_url, self.check_number
        )
    }
}

/// One purchased line. Numeric fields keep the receipt's digits with a decimal comma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub date: String,
    /// 1-based position within the receipt
    pub position: usize,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub unit_price: String,
    pub sum: String,
    /// Article (barcode) number printed after `АРТ.№`
    pub article: String,
    pub shop: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    pub shop: String,
    pub items: Vec<ReceiptItem>,
}
