//! Batch run over a period: select, process one URL at a time, merge, write back.

use std::future::Future;

use chrono::NaiveDate;
use log::{info, warn};

use crate::error::ChekError;
use crate::merge::{Outcome, index_records, merge_one};
use crate::period::select;
use crate::record::LinkRecord;
use crate::store::RecordStore;

/// Scrapes one receipt. `check_number` is the record's 1-based position in the
/// full store, used to label exported rows.
pub trait ReceiptProcessor {
    fn process(
        &mut self,
        record: &LinkRecord,
        check_number: usize,
    ) -> impl Future<Output = anyhow::Result<Outcome>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Outcome per selected URL, in processing order
    pub entries: Vec<(String, Outcome)>,
    /// Records skipped by the selector because their date does not parse
    pub unparseable: Vec<String>,
    /// Selected URLs with no stored record at merge time; their update is lost
    pub missing: Vec<String>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn done(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn pending(&self) -> usize {
        self.total() - self.done()
    }
}

/// Process `urls` strictly in order. Each outcome is merged into `records`
/// before the next URL starts; a processor error marks that record pending and
/// the loop continues.
pub async fn run_batch<P: ReceiptProcessor>(
    processor: &mut P,
    records: &mut [LinkRecord],
    urls: &[String],
) -> BatchReport {
    let index = index_records(records);
    let mut report = BatchReport::default();

    for url in urls {
        let Some(&pos) = index.get(url) else {
            warn!("selected link vanished before processing: {url}");
            report.missing.push(url.clone());
            continue;
        };

        let outcome = match processor.process(&records[pos], pos + 1).await {
            Ok(o) => o,
            Err(e) => Outcome::Failed(format!("{e:#}")),
        };
        info!("{url}: {outcome:?}");

        merge_one(&index, records, url, &outcome);
        report.entries.push((url.clone(), outcome));
    }

    report
}

/// Full cycle against a store: load all, select `[start, end]`, process, write all.
///
/// Only store I/O errors propagate; per-URL failures end up in the report.
pub async fn process_period<S, P>(
    store: &S,
    processor: &mut P,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BatchReport, ChekError>
where
    S: RecordStore,
    P: ReceiptProcessor,
{
    let mut records = store.load_all()?;
    let selection = select(start, end, &records);
    info!(
        "processing {} links dated {} ..= {}",
        selection.urls.len(),
        start,
        end
    );

    let mut report = run_batch(processor, &mut records, &selection.urls).await;
    report.unparseable = selection.unparseable;

    store.write_all(&records)?;
    Ok(report)
}
