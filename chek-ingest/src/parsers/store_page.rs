//! HTML extraction for receipt pages.
//!
//! Silpo/Fora store pages (`receipt.*.elkasa.com.ua`) list device info as
//! `<td class="device-info-line-item">` pairs and embed the fiscal receipt URL in
//! the QR block:
//!
//!   <td class="device-info-line-item">ЧАС</td>
//!   <td class="device-info-line-item">22:51:16 30.07.2025</td>
//!   <div data-code-type="QR" data-render-data="https://cabinet.tax.gov.ua/..."></div>
//!
//! Fiscal receipt pages render the receipt as a `<pre>` block, older layouts as
//! a plain `<div>`.

use scraper::{ElementRef, Html, Selector};

const TIME_LABEL: &str = "ЧАС";

fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Purchase date-time from a store page, e.g. `22:51:16 30.07.2025`.
pub fn date_from_store_page(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let cells = Selector::parse("td.device-info-line-item").expect("device info selector");

    let texts: Vec<String> = doc.select(&cells).map(cell_text).collect();
    let label = texts.iter().position(|t| t.contains(TIME_LABEL))?;
    texts
        .get(label + 1)
        .filter(|t| !t.is_empty())
        .cloned()
}

/// Fiscal receipt URL behind the store page's QR code.
pub fn fiscal_link_from_store_page(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let qr = Selector::parse(r#"div[data-code-type="QR"]"#).expect("qr selector");

    doc.select(&qr)
        .next()?
        .value()
        .attr("data-render-data")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Raw receipt text from a fiscal receipt page, one printed line per line.
pub fn receipt_text_from_page(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let pre = Selector::parse("pre").expect("pre selector");
    let div = Selector::parse("div").expect("div selector");

    let block = doc.select(&pre).next().or_else(|| {
        doc.select(&div).find(|d| {
            let text: String = d.text().collect();
            text.contains("ТОВ") && text.contains("ЧЕК")
        })
    })?;

    Some(block.text().collect::<Vec<_>>().join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE_PAGE: &str = r#"
<html><body>
  <table>
    <tr><td class="device-info-line-item">ФН</td><td class="device-info-line-item">4000123456</td></tr>
    <tr><td class="device-info-line-item"> ЧАС </td><td class="device-info-line-item">22:51:16 30.07.2025</td></tr>
  </table>
  <div class="qr" data-code-type="QR" data-render-data="https://cabinet.tax.gov.ua/cashregs/check?fn=4000123456&amp;id=77&amp;date=20250730"></div>
</body></html>"#;

    #[test]
    fn test_date_from_store_page() {
        assert_eq!(
            date_from_store_page(STORE_PAGE).as_deref(),
            Some("22:51:16 30.07.2025")
        );
    }

    #[test]
    fn test_date_missing_when_label_is_last_cell() {
        let html = r#"<table><tr><td class="device-info-line-item">ЧАС</td></tr></table>"#;
        assert_eq!(date_from_store_page(html), None);
        assert_eq!(date_from_store_page("<p>nothing</p>"), None);
    }

    #[test]
    fn test_fiscal_link_from_store_page() {
        assert_eq!(
            fiscal_link_from_store_page(STORE_PAGE).as_deref(),
            Some("https://cabinet.tax.gov.ua/cashregs/check?fn=4000123456&id=77&date=20250730")
        );
        assert_eq!(fiscal_link_from_store_page(r#"<div data-code-type="QR"></div>"#), None);
    }

    #[test]
    fn test_receipt_text_prefers_pre() {
        let html = "<html><body><div>ТОВ ЧЕК header</div><pre>ТОВ \"СІЛЬПО-ФУД\"\nАРТ.№ 1 Хліб\n1 x 30.00 = 30.00</pre></body></html>";
        let text = receipt_text_from_page(html).unwrap();
        assert!(text.starts_with("ТОВ \"СІЛЬПО-ФУД\""));
        assert!(text.contains("АРТ.№ 1 Хліб"));
    }

    #[test]
    fn test_receipt_text_div_fallback() {
        let html = "<html><body><div><span>ТОВ \"ФОРА\"</span><span>ФІСКАЛЬНИЙ ЧЕК</span></div></body></html>";
        let text = receipt_text_from_page(html).unwrap();
        assert_eq!(text, "ТОВ \"ФОРА\"\nФІСКАЛЬНИЙ ЧЕК");
    }

    #[test]
    fn test_receipt_text_absent() {
        assert_eq!(receipt_text_from_page("<html><body><div>captcha</div></body></html>"), None);
    }
}
