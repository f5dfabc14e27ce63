//! Support Router - Message routing and escalation engine for customer support chat.
//!
//! Each customer message is sanitized, matched against a curated FAQ catalog, and
//! otherwise answered by an LLM whose reply is recovered into a structured answer and
//! passed through deterministic escalation rules.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
