//! Folding processing outcomes back into the loaded record set.

use std::collections::HashMap;

use log::debug;

use crate::record::{LinkRecord, LinkStatus};

/// Per-URL result of receipt processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Line items were extracted and exported
    Success,
    /// The receipt is not available yet (not formed, captcha, empty)
    NotReady,
    Failed(String),
}

impl Outcome {
    pub fn status(&self) -> LinkStatus {
        match self {
            Outcome::Success => LinkStatus::Done,
            Outcome::NotReady | Outcome::Failed(_) => LinkStatus::Pending,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub updated: usize,
    /// Outcome URLs with no matching record; their update is dropped.
    pub missing: Vec<String>,
}

/// url -> position in `records`, built once per merge operation.
pub fn index_records(records: &[LinkRecord]) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (r.url.clone(), i))
        .collect()
}

/// Set the status of the record addressed by `url`. Returns false, leaving
/// `records` untouched, when the url has no record.
pub fn merge_one(
    index: &HashMap<String, usize>,
    records: &mut [LinkRecord],
    url: &str,
    outcome: &Outcome,
) -> bool {
    match index.get(url).and_then(|&i| records.get_mut(i)) {
        Some(record) => {
            record.status = outcome.status();
            true
        }
        None => {
            debug!("no stored record for {url}; outcome dropped");
            false
        }
    }
}

/// Set each addressed record's status from its outcome. Records not named by any
/// outcome keep their status.
pub fn apply_outcomes(records: &mut [LinkRecord], outcomes: &[(String, Outcome)]) -> MergeSummary {
    let index = index_records(records);

    let mut summary = MergeSummary::default();
    for (url, outcome) in outcomes {
        if merge_one(&index, records, url, outcome) {
            summary.updated += 1;
        } else {
            summary.missing.push(url.clone());
        }
    }
    summary
}
