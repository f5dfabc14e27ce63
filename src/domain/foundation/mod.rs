//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and validation errors
//! that form the vocabulary of the routing domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{EscalationId, FaqId, SessionId};
pub use timestamp::Timestamp;
