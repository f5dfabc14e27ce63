//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
pub mod model_client;

pub use handlers::{
    ResolutionSource, RouteMessageCommand, RouteMessageHandler, RoutedMessage, SearchFaqHandler,
    SearchFaqQuery, SuggestedQuestionsHandler, SuggestedQuestionsQuery,
};
pub use model_client::{HealthReport, HealthStatus, ModelClient};
