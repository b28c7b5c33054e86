//! Spreadsheet export: extracted line items appended to a CSV file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chek_ingest::ReceiptItem;
use serde::Serialize;

/// Header row, in column order
pub const EXPORT_COLUMNS: [&str; 10] = [
    "Дата",
    "№",
    "Наименование товара",
    "Количество",
    "Ед. изм.",
    "Цена за ед. (грн)",
    "Сумма (грн)",
    "Штрих-код",
    "Магазин",
    "Источник",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    date: &'a str,
    position: usize,
    name: &'a str,
    quantity: &'a str,
    unit: &'a str,
    unit_price: &'a str,
    sum: &'a str,
    article: &'a str,
    shop: &'a str,
    source: &'a str,
}

impl<'a> From<&'a ReceiptItem> for ExportRow<'a> {
    fn from(i: &'a ReceiptItem) -> Self {
        Self {
            date: &i.date,
            position: i.position,
            name: &i.name,
            quantity: &i.quantity,
            unit: &i.unit,
            unit_price: &i.unit_price,
            sum: &i.sum,
            article: &i.article,
            shop: &i.shop,
            source: &i.source,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpreadsheetExport {
    path: PathBuf,
}

impl SpreadsheetExport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_new(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true)
    }

    /// Append `items`; the header is written only when the file is new or empty.
    pub fn append(&self, items: &[ReceiptItem]) -> Result<usize> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
            }
        }

        let fresh = self.is_new();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if fresh {
            wtr.write_record(EXPORT_COLUMNS)?;
        }
        for item in items {
            wtr.serialize(ExportRow::from(item))?;
        }
        wtr.flush()
            .with_context(|| format!("write {}", self.path.display()))?;

        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn item(position: usize, name: &str) -> ReceiptItem {
        ReceiptItem {
            date: "30.07.2025".to_string(),
            position,
            name: name.to_string(),
            quantity: "1".to_string(),
            unit: "шт".to_string(),
            unit_price: "10,50".to_string(),
            sum: "10,50".to_string(),
            article: "4820000191".to_string(),
            shop: "ТОВ \"СІЛЬПО-ФУД\"".to_string(),
            source: "=HYPERLINK(\"https://cabinet.tax.gov.ua/x\", \"чек1\")".to_string(),
        }
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let export = SpreadsheetExport::new(dir.path().join("out").join("Result.csv"));

        assert_eq!(export.append(&[item(1, "Хліб")]).unwrap(), 1);
        assert_eq!(export.append(&[item(1, "Сир"), item(2, "Кава")]).unwrap(), 2);

        let mut rdr = csv::Reader::from_path(export.path()).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, EXPORT_COLUMNS.to_vec());

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][2], "Сир");
        assert_eq!(&rows[2][1], "2");
        assert_eq!(&rows[0][5], "10,50");
        assert_eq!(&rows[0][9], "=HYPERLINK(\"https://cabinet.tax.gov.ua/x\", \"чек1\")");
    }
}
