//! Per-category section formatters.
//!
//! Each formatter renders one record collection into a bounded text
//! block: a header line carrying the total count, then one block per
//! record up to the category's cap. Missing values become literal
//! placeholders; purely optional lines (notes, commission) are omitted
//! instead. An empty collection short-circuits to a single "No X found."
//! sentence with no header and no blocks.
//!
//! Formatters return `Result` so the assembler can fold any failure into
//! a per-category placeholder without aborting the other sections.

use crate::datefmt;
use callsheet_core::error::ContextError;
use callsheet_core::records::{
    Agency, AgentContact, AiJob, Event, Job, Meeting, Shooting, Stay, UserProfile,
};

/// Record caps per category. Jobs, agencies, and agents are unbounded.
pub const MAX_AI_JOBS: usize = 5;
pub const MAX_EVENTS: usize = 20;
pub const MAX_MEETINGS: usize = 10;
pub const MAX_STAYS: usize = 10;
pub const MAX_SHOOTINGS: usize = 10;

type SectionResult = Result<String, ContextError>;

fn text_or<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value {
        Some(s) if !s.trim().is_empty() => s.as_str(),
        _ => placeholder,
    }
}

/// Money rendering: two decimals plus the currency when known.
fn amount(value: Option<f64>, currency: &Option<String>) -> String {
    match value {
        Some(v) => match currency {
            Some(c) if !c.trim().is_empty() => format!("{v:.2} {c}"),
            _ => format!("{v:.2}"),
        },
        None => "TBD".to_string(),
    }
}

pub fn profile_section(profile: Option<&UserProfile>) -> SectionResult {
    let Some(profile) = profile else {
        return Ok("No profile information found.\n".to_string());
    };

    let mut out = String::new();
    out.push_str(&format!("Name: {}\n", text_or(&profile.name, "TBD")));
    out.push_str(&format!(
        "Display name: {}\n",
        text_or(&profile.display_name, "TBD")
    ));
    out.push_str(&format!("Email: {}\n", text_or(&profile.email, "TBD")));
    out.push_str(&format!("Phone: {}\n", text_or(&profile.phone, "TBD")));
    Ok(out)
}

pub fn jobs_section(jobs: &[Job]) -> SectionResult {
    if jobs.is_empty() {
        return Ok("No jobs found.\n".to_string());
    }

    let mut out = format!("Total jobs: {}\n", jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        out.push_str(&format!("\nJob {}:\n", i + 1));
        out.push_str(&format!(
            "- Client: {}\n",
            text_or(&job.client_name, "Unknown client")
        ));
        out.push_str(&format!(
            "- Type: {}\n",
            text_or(&job.job_type, "Not specified")
        ));
        out.push_str(&format!(
            "- Date: {}\n",
            datefmt::format_record_date(job.date.as_deref())
        ));
        out.push_str(&format!("- Rate: {}\n", amount(job.rate, &job.currency)));
        out.push_str(&format!("- Status: {}\n", text_or(&job.status, "TBD")));
        out.push_str(&format!(
            "- Payment: {}\n",
            text_or(&job.payment_status, "TBD")
        ));
        out.push_str(&format!(
            "- Location: {}\n",
            text_or(&job.location, "Not specified")
        ));
        if let Some(notes) = job.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            out.push_str(&format!("- Notes: {notes}\n"));
        }
    }
    Ok(out)
}

pub fn events_section(events: &[Event]) -> SectionResult {
    if events.is_empty() {
        return Ok("No events found.\n".to_string());
    }

    let mut out = format!("Total events: {}\n", events.len());
    for (i, event) in events.iter().take(MAX_EVENTS).enumerate() {
        out.push_str(&format!("\nEvent {}:\n", i + 1));
        out.push_str(&format!(
            "- Type: {}\n",
            text_or(&event.event_type, "Not specified")
        ));
        out.push_str(&format!(
            "- Client: {}\n",
            text_or(&event.client_name, "Unknown client")
        ));
        out.push_str(&format!(
            "- Date: {}\n",
            datefmt::format_record_date(event.date.as_deref())
        ));
        out.push_str(&format!(
            "- Start time: {}\n",
            datefmt::format_time(event.start_time.as_deref())
        ));
        out.push_str(&format!(
            "- Location: {}\n",
            text_or(&event.location, "Not specified")
        ));
        out.push_str(&format!(
            "- Day rate: {}\n",
            amount(event.day_rate, &event.currency)
        ));
        if let Some(notes) = event.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            out.push_str(&format!("- Notes: {notes}\n"));
        }
    }
    Ok(out)
}

pub fn ai_jobs_section(ai_jobs: &[AiJob]) -> SectionResult {
    if ai_jobs.is_empty() {
        return Ok("No AI jobs found.\n".to_string());
    }

    let mut out = format!("Total AI jobs: {}\n", ai_jobs.len());
    for (i, job) in ai_jobs.iter().take(MAX_AI_JOBS).enumerate() {
        out.push_str(&format!("\nAI job {}:\n", i + 1));
        out.push_str(&format!(
            "- Client: {}\n",
            text_or(&job.client_name, "Unknown client")
        ));
        out.push_str(&format!(
            "- Type: {}\n",
            text_or(&job.label, "Not specified")
        ));
        out.push_str(&format!(
            "- Date: {}\n",
            datefmt::format_record_date(job.date.as_deref())
        ));
        out.push_str(&format!("- Rate: {}\n", amount(job.rate, &job.currency)));
        out.push_str(&format!("- Status: {}\n", text_or(&job.status, "TBD")));
        out.push_str(&format!(
            "- Payment: {}\n",
            text_or(&job.payment_status, "TBD")
        ));
        if let Some(notes) = job.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            out.push_str(&format!("- Notes: {notes}\n"));
        }
    }
    Ok(out)
}

pub fn agencies_section(agencies: &[Agency]) -> SectionResult {
    if agencies.is_empty() {
        return Ok("No agencies found.\n".to_string());
    }

    let mut out = format!("Total agencies: {}\n", agencies.len());
    for (i, agency) in agencies.iter().enumerate() {
        out.push_str(&format!("\nAgency {}:\n", i + 1));
        out.push_str(&format!(
            "- Name: {}\n",
            text_or(&agency.name, "Unknown agency")
        ));
        out.push_str(&format!(
            "- City: {}\n",
            text_or(&agency.city, "Not specified")
        ));
        out.push_str(&format!(
            "- Country: {}\n",
            text_or(&agency.country, "Not specified")
        ));
        // Commission only when meaningful.
        if let Some(rate) = agency.commission_rate.filter(|r| *r > 0.0) {
            out.push_str(&format!("- Commission: {rate}%\n"));
        }
    }
    Ok(out)
}

pub fn agents_section(agents: &[AgentContact]) -> SectionResult {
    if agents.is_empty() {
        return Ok("No agents found.\n".to_string());
    }

    let mut out = format!("Total agents: {}\n", agents.len());
    for (i, agent) in agents.iter().enumerate() {
        out.push_str(&format!("\nAgent {}:\n", i + 1));
        out.push_str(&format!(
            "- Name: {}\n",
            text_or(&agent.name, "Unknown agent")
        ));
        out.push_str(&format!("- Email: {}\n", text_or(&agent.email, "TBD")));
        out.push_str(&format!("- Phone: {}\n", text_or(&agent.phone, "TBD")));
        out.push_str(&format!(
            "- City: {}\n",
            text_or(&agent.city, "Not specified")
        ));
        out.push_str(&format!(
            "- Country: {}\n",
            text_or(&agent.country, "Not specified")
        ));
    }
    Ok(out)
}

pub fn meetings_section(meetings: &[Meeting]) -> SectionResult {
    if meetings.is_empty() {
        return Ok("No meetings found.\n".to_string());
    }

    let mut out = format!("Total meetings: {}\n", meetings.len());
    for (i, meeting) in meetings.iter().take(MAX_MEETINGS).enumerate() {
        out.push_str(&format!("\nMeeting {}:\n", i + 1));
        out.push_str(&format!(
            "- Client: {}\n",
            text_or(&meeting.client_name, "Unknown client")
        ));
        out.push_str(&format!(
            "- Date: {}\n",
            datefmt::format_record_date(meeting.date.as_deref())
        ));
        out.push_str(&format!(
            "- Time: {}\n",
            datefmt::format_time(meeting.time.as_deref())
        ));
        out.push_str(&format!(
            "- Location: {}\n",
            text_or(&meeting.location, "Not specified")
        ));
    }
    Ok(out)
}

pub fn stays_section(stays: &[Stay]) -> SectionResult {
    if stays.is_empty() {
        return Ok("No stays found.\n".to_string());
    }

    let mut out = format!("Total stays: {}\n", stays.len());
    for (i, stay) in stays.iter().take(MAX_STAYS).enumerate() {
        out.push_str(&format!("\nStay {}:\n", i + 1));
        out.push_str(&format!(
            "- Location: {}\n",
            text_or(&stay.location_name, "Unknown location")
        ));
        out.push_str(&format!(
            "- Check-in: {}\n",
            datefmt::format_record_date(stay.check_in_date.as_deref())
        ));
        out.push_str(&format!(
            "- Check-out: {}\n",
            datefmt::format_record_date(stay.check_out_date.as_deref())
        ));
        out.push_str(&format!("- Cost: {}\n", amount(stay.cost, &stay.currency)));
    }
    Ok(out)
}

pub fn shootings_section(shootings: &[Shooting]) -> SectionResult {
    if shootings.is_empty() {
        return Ok("No shootings found.\n".to_string());
    }

    let mut out = format!("Total shootings: {}\n", shootings.len());
    for (i, shooting) in shootings.iter().take(MAX_SHOOTINGS).enumerate() {
        out.push_str(&format!("\nShooting {}:\n", i + 1));
        out.push_str(&format!(
            "- Client: {}\n",
            text_or(&shooting.client_name, "Unknown client")
        ));
        out.push_str(&format!(
            "- Date: {}\n",
            datefmt::format_record_date(shooting.date.as_deref())
        ));
        out.push_str(&format!(
            "- Location: {}\n",
            text_or(&shooting.location, "Not specified")
        ));
        out.push_str(&format!(
            "- Rate: {}\n",
            amount(shooting.rate, &shooting.currency)
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collections_short_circuit() {
        assert_eq!(jobs_section(&[]).unwrap(), "No jobs found.\n");
        assert_eq!(events_section(&[]).unwrap(), "No events found.\n");
        assert_eq!(ai_jobs_section(&[]).unwrap(), "No AI jobs found.\n");
        assert_eq!(agencies_section(&[]).unwrap(), "No agencies found.\n");
        assert_eq!(agents_section(&[]).unwrap(), "No agents found.\n");
        assert_eq!(meetings_section(&[]).unwrap(), "No meetings found.\n");
        assert_eq!(stays_section(&[]).unwrap(), "No stays found.\n");
        assert_eq!(shootings_section(&[]).unwrap(), "No shootings found.\n");
        assert_eq!(
            profile_section(None).unwrap(),
            "No profile information found.\n"
        );
    }

    #[test]
    fn empty_section_has_no_header_or_blocks() {
        let out = jobs_section(&[]).unwrap();
        assert!(!out.contains("Total jobs"));
        assert!(!out.contains("Job 1"));
    }

    #[test]
    fn job_block_lists_known_fields_with_placeholders() {
        let jobs = vec![Job {
            client_name: Some("Acme".into()),
            date: Some("2025-09-09".into()),
            rate: Some(2500.0),
            currency: Some("EUR".into()),
            ..Job::default()
        }];
        let out = jobs_section(&jobs).unwrap();
        assert!(out.starts_with("Total jobs: 1\n"));
        assert!(out.contains("- Client: Acme"));
        assert!(out.contains("- Date: Tuesday, September 9, 2025"));
        assert!(out.contains("- Rate: 2500.00 EUR"));
        assert!(out.contains("- Type: Not specified"));
        assert!(out.contains("- Status: TBD"));
        // Notes line omitted entirely, not placeholdered.
        assert!(!out.contains("Notes:"));
    }

    #[test]
    fn malformed_job_date_renders_raw_string() {
        let jobs = vec![Job {
            date: Some("not-a-date".into()),
            ..Job::default()
        }];
        let out = jobs_section(&jobs).unwrap();
        assert!(out.contains("- Date: not-a-date"));
    }

    #[test]
    fn events_capped_at_twenty_with_full_count_in_header() {
        let events: Vec<Event> = (0..25)
            .map(|i| Event {
                client_name: Some(format!("Client {i}")),
                ..Event::default()
            })
            .collect();
        let out = events_section(&events).unwrap();
        assert!(out.contains("Total events: 25"));
        assert!(out.contains("Event 20:"));
        assert!(!out.contains("Event 21:"));
    }

    #[test]
    fn ai_jobs_capped_at_five() {
        let ai_jobs: Vec<AiJob> = (0..8).map(|_| AiJob::default()).collect();
        let out = ai_jobs_section(&ai_jobs).unwrap();
        assert!(out.contains("Total AI jobs: 8"));
        assert!(out.contains("AI job 5:"));
        assert!(!out.contains("AI job 6:"));
    }

    #[test]
    fn commission_rendered_only_when_positive() {
        let agencies = vec![
            Agency {
                name: Some("Elite".into()),
                commission_rate: Some(20.0),
                ..Agency::default()
            },
            Agency {
                name: Some("Indie".into()),
                commission_rate: Some(0.0),
                ..Agency::default()
            },
            Agency {
                name: Some("Side".into()),
                ..Agency::default()
            },
        ];
        let out = agencies_section(&agencies).unwrap();
        assert!(out.contains("- Commission: 20%"));
        assert_eq!(out.matches("Commission").count(), 1);
    }

    #[test]
    fn stay_check_in_uses_shared_date_format() {
        let stays = vec![Stay {
            location_name: Some("Hotel Krone".into()),
            check_in_date: Some("2025-09-09".into()),
            ..Stay::default()
        }];
        let out = stays_section(&stays).unwrap();
        assert!(out.contains("Check-in: Tuesday, September 9, 2025"));
        assert!(out.contains("Check-out: Date TBD"));
    }

    #[test]
    fn meeting_time_rendered_24h() {
        let meetings = vec![Meeting {
            client_name: Some("Vogue".into()),
            time: Some("9:30".into()),
            ..Meeting::default()
        }];
        let out = meetings_section(&meetings).unwrap();
        assert!(out.contains("- Time: 09:30"));
    }
}
