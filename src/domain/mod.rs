//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, validation errors)
//! - `faq` - Catalog entries and the exact/fuzzy matcher
//! - `conversation` - Chat turns and model context assembly
//! - `routing` - Sanitizing, answer recovery, retry policy and escalation rules

pub mod conversation;
pub mod faq;
pub mod foundation;
pub mod routing;
