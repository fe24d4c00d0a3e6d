//! # Callsheet Core
//!
//! Domain types, traits, and error definitions for the Callsheet relay.
//! This crate has **zero framework dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The record bundle is a transient, per-request value object: the HTTP
//! layer owns it for the duration of one request, and nothing in the
//! system persists or mutates it. The LLM backend is defined as a trait
//! here; implementations live in `callsheet-providers`.

pub mod error;
pub mod message;
pub mod provider;
pub mod records;

// Re-export key types at crate root for ergonomics
pub use error::{ContextError, Error, ProviderError, Result};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use records::{
    Agency, AgentContact, AiJob, Event, Job, Meeting, RecordBundle, Shooting, Stay, UserProfile,
};
