//! Escalation Adapters
//!
//! - `InMemoryEscalationQueue` - keeps opened tickets in memory

mod in_memory;

pub use in_memory::InMemoryEscalationQueue;
