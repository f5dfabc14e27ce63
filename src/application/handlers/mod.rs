//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod route_message;
mod search_faq;
mod suggested_questions;

pub use route_message::{
    ResolutionSource, RouteMessageCommand, RouteMessageHandler, RoutedMessage,
};
pub use search_faq::{SearchFaqHandler, SearchFaqQuery, DEFAULT_SEARCH_LIMIT};
pub use suggested_questions::{
    SuggestedQuestionsHandler, SuggestedQuestionsQuery, DEFAULT_SUGGESTION_LIMIT,
};
