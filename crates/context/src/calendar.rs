//! Unified upcoming-calendar view over jobs, events, and meetings.
//!
//! "Upcoming" means the parsed date is strictly greater than `now`,
//! where `now` is read once per invocation so every comparison uses the
//! same cutoff. Entries without a parseable date cannot be upcoming and
//! are excluded.

use crate::datefmt;
use callsheet_core::records::{Event, Job, Meeting};
use chrono::{DateTime, Utc};

/// Maximum entries in the rendered calendar.
pub const MAX_UPCOMING: usize = 10;

/// Which record category a calendar entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryCategory {
    Job,
    Event,
    Meeting,
}

impl EntryCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Job => "Job",
            Self::Event => "Event",
            Self::Meeting => "Meeting",
        }
    }
}

/// One upcoming item in the merged calendar.
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    pub category: EntryCategory,
    pub title: String,
    pub when: DateTime<Utc>,
    pub time: Option<String>,
    pub location: Option<String>,
}

/// Merge jobs, events, and meetings into one sorted upcoming list.
///
/// The sort is stable and compares dates only, so entries sharing a date
/// keep jobs-before-events-before-meetings input order. That tie-break
/// is part of the contract, not an accident.
pub fn upcoming_calendar(
    jobs: &[Job],
    events: &[Event],
    meetings: &[Meeting],
    now: DateTime<Utc>,
) -> Vec<CalendarEntry> {
    let mut entries: Vec<CalendarEntry> = Vec::new();

    for job in jobs {
        if let Some(when) = parse_future(job.date.as_deref(), now) {
            entries.push(CalendarEntry {
                category: EntryCategory::Job,
                title: title_from(job.client_name.as_deref(), None),
                when,
                time: None,
                location: job.location.clone(),
            });
        }
    }

    for event in events {
        if let Some(when) = parse_future(event.date.as_deref(), now) {
            entries.push(CalendarEntry {
                category: EntryCategory::Event,
                title: title_from(event.client_name.as_deref(), event.event_type.as_deref()),
                when,
                time: event.start_time.clone(),
                location: event.location.clone(),
            });
        }
    }

    for meeting in meetings {
        if let Some(when) = parse_future(meeting.date.as_deref(), now) {
            entries.push(CalendarEntry {
                category: EntryCategory::Meeting,
                title: title_from(meeting.client_name.as_deref(), None),
                when,
                time: meeting.time.clone(),
                location: meeting.location.clone(),
            });
        }
    }

    entries.sort_by_key(|e| e.when);
    entries.truncate(MAX_UPCOMING);
    entries
}

/// Render the merged calendar (without its section label).
pub fn render_calendar(entries: &[CalendarEntry]) -> String {
    if entries.is_empty() {
        return "No upcoming events.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "- [{}] {} — {}",
            entry.category.label(),
            entry.title,
            datefmt::render_date(entry.when)
        ));
        if let Some(time) = entry.time.as_deref().filter(|t| !t.trim().is_empty()) {
            out.push_str(&format!(" at {}", datefmt::format_time(Some(time))));
        }
        if let Some(loc) = entry.location.as_deref().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!(" ({loc})"));
        }
        out.push('\n');
    }
    out
}

fn parse_future(raw: Option<&str>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    raw.and_then(datefmt::parse_when).filter(|when| *when > now)
}

fn title_from(client: Option<&str>, fallback: Option<&str>) -> String {
    client
        .filter(|c| !c.trim().is_empty())
        .or(fallback)
        .unwrap_or("Untitled")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn job(client: &str, date: &str) -> Job {
        Job {
            client_name: Some(client.into()),
            date: Some(date.into()),
            ..Job::default()
        }
    }

    fn event(client: &str, date: &str) -> Event {
        Event {
            client_name: Some(client.into()),
            date: Some(date.into()),
            ..Event::default()
        }
    }

    fn meeting(client: &str, date: &str) -> Meeting {
        Meeting {
            client_name: Some(client.into()),
            date: Some(date.into()),
            ..Meeting::default()
        }
    }

    #[test]
    fn filters_to_strictly_future_dates() {
        let jobs = vec![job("Past", "2020-01-01"), job("Future", "2025-07-01")];
        let entries = upcoming_calendar(&jobs, &[], &[], test_now());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Future");
    }

    #[test]
    fn excludes_unparseable_and_missing_dates() {
        let jobs = vec![job("Bad", "not-a-date"), Job::default()];
        let entries = upcoming_calendar(&jobs, &[], &[], test_now());
        assert!(entries.is_empty());
    }

    #[test]
    fn equal_dates_keep_category_order() {
        let jobs = vec![job("J", "2025-07-01")];
        let events = vec![event("E", "2025-07-01")];
        let meetings = vec![meeting("M", "2025-07-01")];
        let entries = upcoming_calendar(&jobs, &events, &meetings, test_now());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].category, EntryCategory::Job);
        assert_eq!(entries[1].category, EntryCategory::Event);
        assert_eq!(entries[2].category, EntryCategory::Meeting);
    }

    #[test]
    fn sorts_ascending_by_date() {
        let jobs = vec![job("Later", "2025-08-01"), job("Sooner", "2025-07-01")];
        let entries = upcoming_calendar(&jobs, &[], &[], test_now());
        assert_eq!(entries[0].title, "Sooner");
        assert_eq!(entries[1].title, "Later");
    }

    #[test]
    fn truncates_to_ten() {
        let jobs: Vec<Job> = (1..=15)
            .map(|d| job(&format!("Client {d}"), &format!("2025-07-{d:02}")))
            .collect();
        let entries = upcoming_calendar(&jobs, &[], &[], test_now());
        assert_eq!(entries.len(), MAX_UPCOMING);
        assert_eq!(entries[0].title, "Client 1");
    }

    #[test]
    fn empty_calendar_renders_sentence() {
        assert_eq!(render_calendar(&[]), "No upcoming events.\n");
    }

    #[test]
    fn render_includes_time_and_location_when_known() {
        let mut ev = event("Vogue", "2025-07-01");
        ev.start_time = Some("14:30".into());
        ev.location = Some("Milan".into());
        let entries = upcoming_calendar(&[], &[ev], &[], test_now());
        let out = render_calendar(&entries);
        assert!(out.contains("[Event] Vogue — Tuesday, July 1, 2025 at 14:30 (Milan)"));
    }
}
