//! Context assembly — the single entry point the relay calls.
//!
//! Concatenates every section in a fixed order, separated by literal
//! section labels. The labels are a wire contract: the surrounding
//! prompt template depends on them, so they must be reproduced verbatim.
//!
//! # Failure policy
//!
//! A failed section folds into a one-line "(error loading X data)"
//! placeholder; the rest of the context is still assembled. The returned
//! string is always usable — this function has no error path.
//!
//! # Determinism
//!
//! The wall clock is read exactly once per invocation, so every
//! "upcoming" comparison inside one build uses the same cutoff.

use crate::{aggregate, calendar, datefmt, sections};
use callsheet_core::error::ContextError;
use callsheet_core::records::RecordBundle;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Section labels, in assembly order.
pub mod labels {
    pub const PROFILE: &str = "USER PROFILE:";
    pub const JOBS: &str = "JOBS DATA:";
    pub const EVENTS: &str = "EVENTS DATA:";
    pub const AI_JOBS: &str = "AI JOBS DATA:";
    pub const AGENCIES: &str = "AGENCIES DATA:";
    pub const AGENTS: &str = "AGENTS DATA:";
    pub const MEETINGS: &str = "MEETINGS DATA:";
    pub const STAYS: &str = "STAYS DATA:";
    pub const SHOOTINGS: &str = "SHOOTINGS DATA:";
    pub const STATISTICS: &str = "STATISTICS:";
    pub const CALENDAR: &str = "UPCOMING CALENDAR:";

    /// All record-section labels, for consumers that validate structure.
    pub const RECORD_SECTIONS: [&str; 9] = [
        PROFILE, JOBS, EVENTS, AI_JOBS, AGENCIES, AGENTS, MEETINGS, STAYS, SHOOTINGS,
    ];
}

const PREAMBLE: &str = "You are a personal business assistant for a professional model. \
The following is a structured summary of the user's current business records.";

const CLOSING: &str = "Use the data above when answering the user's questions. \
Refer to specific records where relevant, quote amounts with their currency, \
and point out upcoming items the user should prepare for. If the records do \
not contain the answer, say so instead of guessing.";

/// Build the full user-context string, reading the wall clock once.
pub fn build_user_context(bundle: Option<&RecordBundle>) -> String {
    build_user_context_at(bundle, Utc::now())
}

/// Build the context against an explicit "now" (used directly by tests).
pub fn build_user_context_at(bundle: Option<&RecordBundle>, now: DateTime<Utc>) -> String {
    let empty = RecordBundle::default();
    let bundle = bundle.unwrap_or(&empty);

    let mut out = String::new();
    out.push_str(PREAMBLE);
    out.push_str("\n\n");

    push_section(
        &mut out,
        labels::PROFILE,
        "profile",
        sections::profile_section(bundle.user_profile.as_ref()),
    );
    push_section(
        &mut out,
        labels::JOBS,
        "jobs",
        sections::jobs_section(&bundle.jobs),
    );
    push_section(
        &mut out,
        labels::EVENTS,
        "events",
        sections::events_section(&bundle.events),
    );
    push_section(
        &mut out,
        labels::AI_JOBS,
        "AI jobs",
        sections::ai_jobs_section(&bundle.ai_jobs),
    );
    push_section(
        &mut out,
        labels::AGENCIES,
        "agencies",
        sections::agencies_section(&bundle.agencies),
    );
    push_section(
        &mut out,
        labels::AGENTS,
        "agents",
        sections::agents_section(&bundle.agents),
    );
    push_section(
        &mut out,
        labels::MEETINGS,
        "meetings",
        sections::meetings_section(&bundle.meetings),
    );
    push_section(
        &mut out,
        labels::STAYS,
        "stays",
        sections::stays_section(&bundle.stays),
    );
    push_section(
        &mut out,
        labels::SHOOTINGS,
        "shootings",
        sections::shootings_section(&bundle.shootings),
    );

    let stats = aggregate::aggregate(&bundle.jobs, &bundle.events, now);
    push_section(
        &mut out,
        labels::STATISTICS,
        "statistics",
        Ok(aggregate::render_stats(&stats)),
    );

    let upcoming =
        calendar::upcoming_calendar(&bundle.jobs, &bundle.events, &bundle.meetings, now);
    push_section(
        &mut out,
        labels::CALENDAR,
        "calendar",
        Ok(calendar::render_calendar(&upcoming)),
    );

    out.push_str(&format!(
        "Current date: {}\nCurrent time: {}\n\n",
        datefmt::render_date(now),
        datefmt::render_time(now)
    ));
    out.push_str(CLOSING);
    out
}

/// Append one labeled section, folding failures into a placeholder line.
fn push_section(
    out: &mut String,
    label: &str,
    category: &str,
    body: Result<String, ContextError>,
) {
    out.push_str(label);
    out.push('\n');
    match body {
        Ok(text) => out.push_str(&text),
        Err(err) => {
            warn!(category, error = %err, "Section build failed, using placeholder");
            out.push_str(&format!("(error loading {category} data)\n"));
        }
    }
    out.push('\n');
}
