//! Period selection: which stored links fall inside an inclusive date range.

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use log::warn;

use crate::record::LinkRecord;

/// Result of a period query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected URLs, in store order
    pub urls: Vec<String>,
    /// URLs whose stored date could not be parsed. They stay in the store.
    pub unparseable: Vec<String>,
}

/// Select records whose purchase date lies in `[start, end]` (both inclusive).
///
/// Records with an unparseable `date_str` are skipped and reported, never fatal.
/// `start > end` yields an empty selection.
pub fn select(start: NaiveDate, end: NaiveDate, records: &[LinkRecord]) -> Selection {
    let mut out = Selection::default();

    for record in records {
        let Some(date) = record.purchase_date() else {
            warn!("skipping {}: unparseable date '{}'", record.url, record.date_str);
            out.unparseable.push(record.url.clone());
            continue;
        };

        if start <= date && date <= end {
            out.urls.push(record.url.clone());
        }
    }

    out
}

/// URLs of records dated within `[start, end]`.
pub fn select_urls(start: NaiveDate, end: NaiveDate, records: &[LinkRecord]) -> Vec<String> {
    select(start, end, records).urls
}

/// Named processing windows offered by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Yesterday,
    /// Seven days before today through today
    LastWeek,
    /// Thirty days before today through today
    LastMonth,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Inclusive `(start, end)` relative to `today`.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match *self {
            Period::Today => (today, today),
            Period::Yesterday => {
                let y = today - Duration::days(1);
                (y, y)
            }
            Period::LastWeek => (today - Duration::days(7), today),
            Period::LastMonth => (today - Duration::days(30), today),
            Period::Custom { start, end } => (start, end),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "today" => Ok(Period::Today),
            "yesterday" => Ok(Period::Yesterday),
            "last-week" | "week" => Ok(Period::LastWeek),
            "last-month" | "month" => Ok(Period::LastMonth),
            other => Err(format!(
                "unknown period '{other}' (expected today, yesterday, last-week, last-month)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LinkType;

    fn rec(url: &str, date_str: &str) -> LinkRecord {
        LinkRecord::new(url, LinkType::TaxPortal, date_str)
    }

    fn fmt(d: NaiveDate) -> String {
        d.format(crate::link::DATE_FORMAT).to_string()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_select_urls_inclusive() {
        let today = day(2025, 7, 30);
        let yesterday = today - Duration::days(1);
        let tomorrow = today + Duration::days(1);
        let records = vec![
            rec("y", &fmt(yesterday)),
            rec("t", &fmt(today)),
            rec("f", &fmt(tomorrow)),
        ];

        assert_eq!(select_urls(today, today, &records), vec!["t"]);
        assert_eq!(select_urls(yesterday, yesterday, &records), vec!["y"]);
        assert_eq!(select_urls(yesterday, today, &records), vec!["y", "t"]);
        let after = tomorrow + Duration::days(1);
        assert!(select_urls(after, after, &records).is_empty());
    }

    #[test]
    fn test_time_prefixed_dates() {
        let records = vec![
            rec("a", "22:51:16 30.07.2025"),
            rec("b", "00:00:01 31.07.2025"),
        ];
        assert_eq!(
            select_urls(day(2025, 7, 30), day(2025, 7, 30), &records),
            vec!["a"]
        );
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let records = vec![rec("a", "10.01.2025"), rec("b", "11.01.2025")];
        assert!(select_urls(day(2025, 1, 11), day(2025, 1, 10), &records).is_empty());
    }

    #[test]
    fn test_empty_records() {
        assert!(select_urls(day(2025, 1, 1), day(2025, 12, 31), &[]).is_empty());
    }

    #[test]
    fn test_malformed_date_is_skipped_and_reported() {
        let records = vec![
            rec("bad", "not-a-date"),
            rec("ok", "15.03.2025"),
            rec("empty", ""),
        ];
        let sel = select(day(2025, 1, 1), day(2025, 12, 31), &records);
        assert_eq!(sel.urls, vec!["ok"]);
        assert_eq!(sel.unparseable, vec!["bad", "empty"]);
    }

    #[test]
    fn test_output_preserves_store_order() {
        let records = vec![
            rec("c", "03.05.2025"),
            rec("a", "01.05.2025"),
            rec("b", "02.05.2025"),
        ];
        assert_eq!(
            select_urls(day(2025, 5, 1), day(2025, 5, 3), &records),
            vec!["c", "a", "b"]
        );
    }

    #[test]
    fn test_period_bounds() {
        let today = day(2025, 3, 1);
        assert_eq!(Period::Today.bounds(today), (today, today));
        assert_eq!(Period::Yesterday.bounds(today), (day(2025, 2, 28), day(2025, 2, 28)));
        assert_eq!(Period::LastWeek.bounds(today), (day(2025, 2, 22), today));
        assert_eq!(Period::LastMonth.bounds(today), (day(2025, 1, 30), today));

        let custom = Period::Custom { start: day(2024, 1, 1), end: day(2024, 1, 31) };
        assert_eq!(custom.bounds(today), (day(2024, 1, 1), day(2024, 1, 31)));
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("today".parse::<Period>().unwrap(), Period::Today);
        assert_eq!("last_week".parse::<Period>().unwrap(), Period::LastWeek);
        assert_eq!("Last-Month".parse::<Period>().unwrap(), Period::LastMonth);
        assert!("fortnight".parse::<Period>().is_err());
    }
}
