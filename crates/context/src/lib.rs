//! Record aggregation and prompt-context assembly.
//!
//! This crate turns a [`RecordBundle`](callsheet_core::RecordBundle) into
//! the text block prepended to a chat request as system-level
//! instructions. Four components, leaves first:
//!
//! 1. **Aggregator** — totals, upcoming/completed counts, month histogram
//! 2. **Section formatters** — one bounded text block per record category
//! 3. **Calendar merger** — jobs + events + meetings into one sorted
//!    upcoming list
//! 4. **Assembler** — fixed-order concatenation with verbatim section
//!    labels
//!
//! The whole build is a single synchronous pure computation: no I/O, no
//! shared state, wall clock read once. Safe to call concurrently from
//! any number of in-flight requests.

pub mod aggregate;
pub mod assembler;
pub mod calendar;
pub mod datefmt;
pub mod sections;

pub use assembler::{build_user_context, build_user_context_at, labels};
