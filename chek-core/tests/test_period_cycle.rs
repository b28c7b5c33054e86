use chek_core::{
    JsonFileStore, LinkRecord, LinkStatus, LinkType, Outcome, ReceiptProcessor, RecordStore,
    apply_outcomes, process_period, select_urls,
};
use chrono::{Duration, Local, NaiveDate};
use tempfile::TempDir;

fn fmt(d: NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

/// Succeeds for URLs containing "ok", reports everything else as not ready.
struct ByName;

impl ReceiptProcessor for ByName {
    async fn process(&mut self, record: &LinkRecord, _check_number: usize) -> anyhow::Result<Outcome> {
        if record.url.contains("ok") {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::NotReady)
        }
    }
}

/// Relative-date scenario: yesterday / today / tomorrow.
#[test]
fn test_relative_day_scenario() {
    let today = Local::now().date_naive();
    let yesterday = today - Duration::days(1);
    let tomorrow = today + Duration::days(1);

    let records = vec![
        LinkRecord::new("y", LinkType::TaxPortal, fmt(yesterday)),
        LinkRecord::new("t", LinkType::TaxPortal, fmt(today)),
        LinkRecord::new("f", LinkType::TaxPortal, fmt(tomorrow)),
    ];

    assert_eq!(select_urls(today, today, &records), vec!["t"]);
    assert_eq!(select_urls(yesterday, today, &records), vec!["y", "t"]);
    let beyond = tomorrow + Duration::days(1);
    assert!(select_urls(beyond, beyond, &records).is_empty());
}

/// Merge then persist: the written set is the whole collection with updated statuses.
#[test]
fn test_merge_then_write_all() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("link_data.json"));
    store
        .write_all(&[
            LinkRecord::new("a", LinkType::TaxPortal, "01.01.2025"),
            LinkRecord::new("b", LinkType::TaxPortal, "01.01.2025"),
        ])
        .unwrap();

    let mut records = store.load_all().unwrap();
    apply_outcomes(
        &mut records,
        &[
            ("a".to_string(), Outcome::Success),
            ("b".to_string(), Outcome::Failed("captcha".into())),
        ],
    );
    store.write_all(&records).unwrap();

    let reloaded = store.load_all().unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!((reloaded[0].url.as_str(), reloaded[0].status), ("a", LinkStatus::Done));
    assert_eq!((reloaded[1].url.as_str(), reloaded[1].status), ("b", LinkStatus::Pending));
}

#[tokio::test]
async fn test_period_run_against_file_store() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("link_data.json"));
    let day = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();

    for (url, date) in [
        ("https://receipt.silpo.elkasa.com.ua/?ok=1", "22:51:16 30.07.2025"),
        ("https://receipt.fora.elkasa.com.ua/?late=1", "30.07.2025"),
        ("https://cabinet.tax.gov.ua/?ok=2&date=20250729", "29.07.2025"),
        ("https://receipt.fora.elkasa.com.ua/?ok=3", "not-a-date"),
    ] {
        let t = chek_core::detect_link_type(url).unwrap();
        store.append_one(LinkRecord::new(url, t, date)).unwrap();
    }

    let report = process_period(&store, &mut ByName, day, day).await.unwrap();
    assert_eq!(report.total(), 2);
    assert_eq!(report.done(), 1);
    assert_eq!(report.pending(), 1);
    assert_eq!(report.unparseable.len(), 1);

    let saved = store.load_all().unwrap();
    let statuses: Vec<_> = saved.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![LinkStatus::Done, LinkStatus::Pending, LinkStatus::Pending, LinkStatus::Pending]
    );
    // the malformed record is still stored, untouched
    assert_eq!(saved[3].date_str, "not-a-date");
}
