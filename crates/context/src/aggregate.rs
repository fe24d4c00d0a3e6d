//! Numeric and categorical summaries over the record bundle.
//!
//! Pure functions of (records, now). Records with unparseable dates are
//! excluded from date-bucketed stats but still count toward totals and
//! rate sums.

use crate::datefmt;
use callsheet_core::records::{Event, Job};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// How many month buckets the rendered histogram keeps (most recent first).
const MAX_MONTH_BUCKETS: usize = 6;

/// Aggregated business statistics for one bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Sum of all job rates; absent or non-numeric rates contribute 0.
    pub total_income: f64,
    pub total_jobs: usize,
    /// Jobs whose parsed date is strictly after `now`.
    pub upcoming_jobs: usize,
    /// Jobs dated on/before `now`, plus jobs with unparseable dates.
    pub completed_jobs: usize,
    pub total_events: usize,
    /// `"YYYY-MM"` → occurrence count over jobs and events, ascending by key.
    pub by_month: BTreeMap<String, u32>,
}

/// Compute all aggregates in one pass over jobs and events.
pub fn aggregate(jobs: &[Job], events: &[Event], now: DateTime<Utc>) -> Stats {
    let mut total_income = 0.0;
    let mut upcoming_jobs = 0;
    let mut by_month: BTreeMap<String, u32> = BTreeMap::new();

    for job in jobs {
        total_income += job.rate.unwrap_or(0.0);

        if let Some(raw) = job.date.as_deref() {
            if let Some(when) = datefmt::parse_when(raw) {
                if when > now {
                    upcoming_jobs += 1;
                }
            }
            if let Some(key) = datefmt::month_key(raw) {
                *by_month.entry(key).or_insert(0) += 1;
            }
        }
    }

    for event in events {
        if let Some(key) = event.date.as_deref().and_then(datefmt::month_key) {
            *by_month.entry(key).or_insert(0) += 1;
        }
    }

    Stats {
        total_income,
        total_jobs: jobs.len(),
        upcoming_jobs,
        completed_jobs: jobs.len() - upcoming_jobs,
        total_events: events.len(),
        by_month,
    }
}

/// Render the statistics block (without its section label).
pub fn render_stats(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total income: {:.2}\n", stats.total_income));
    out.push_str(&format!("Total jobs: {}\n", stats.total_jobs));
    out.push_str(&format!("Upcoming jobs: {}\n", stats.upcoming_jobs));
    out.push_str(&format!("Completed jobs: {}\n", stats.completed_jobs));
    out.push_str(&format!("Total events: {}\n", stats.total_events));

    if !stats.by_month.is_empty() {
        out.push_str("Activity by month:\n");
        // Keep ascending key order but only the most recent buckets.
        let skip = stats.by_month.len().saturating_sub(MAX_MONTH_BUCKETS);
        for (month, count) in stats.by_month.iter().skip(skip) {
            out.push_str(&format!("- {month}: {count}\n"));
        }
    }

    out
}
