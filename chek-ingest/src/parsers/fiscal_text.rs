//! Fiscal receipt text parser
//!
//! Expected receipt text (as printed by the tax portal):
//!   ТОВ "СІЛЬПО-ФУД"
//!   ...
//!   АРТ.№ 4820000191   Молоко 2.5% 900г
//!   2 x 41.50 = 83.00
//!   АРТ.№ 2000000041   Банани вагові
//!   1.235 x 69.90 = 86.33
//!
//! Each `АРТ.№` header opens an item; the following quantity line closes it.

use anyhow::Result;
use regex::Regex;

use crate::types::{Receipt, ReceiptItem, ReceiptMeta};

const SHOP_PREFIX: &str = "ТОВ ";
const UNIT: &str = "шт";

fn decimal_comma(s: &str) -> String {
    s.replace('.', ",")
}

/// Parse receipt text into line items. Headers without a quantity line are dropped.
pub fn parse_receipt_text(text: &str, meta: &ReceiptMeta) -> Result<Receipt> {
    let item_re = Regex::new(r"^АРТ\.№\s*(?P<article>\d+)\s+(?P<name>.+)$")?;
    let qty_re = Regex::new(concat!(
        r"(?P<qty>\d+[.,]?\d*)\s*[xх×]\s*",
        r"(?P<price>\d+[.,]?\d*)\s*=\s*",
        r"(?P<sum>\d+[.,]?\d*)"
    ))?;

    let shop = text
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with(SHOP_PREFIX))
        .unwrap_or("")
        .to_string();
    let source = meta.source_formula();

    let mut items = Vec::new();
    let mut current: Option<(String, String)> = None;
    let mut position = 0;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = item_re.captures(line) {
            position += 1;
            current = Some((caps["article"].to_string(), caps["name"].trim().to_string()));
            continue;
        }

        let Some(caps) = qty_re.captures(line) else {
            continue;
        };
        let Some((article, name)) = current.take() else {
            continue;
        };

        items.push(ReceiptItem {
            date: meta.date.clone(),
            position,
            name,
            quantity: decimal_comma(&caps["qty"]),
            unit: UNIT.to_string(),
            unit_price: decimal_comma(&caps["price"]),
            sum: decimal_comma(&caps["sum"]),
            article,
            shop: shop.clone(),
            source: source.clone(),
        });
    }

    Ok(Receipt { shop, items })
}
