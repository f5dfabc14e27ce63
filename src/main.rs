//! Support Router CLI - route customer messages from the command line.
//!
//! Commands: route, chat, health, suggest, search. Results are printed to stdout as JSON;
//! logs go to stderr.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use support_router::adapters::ai::{InMemoryUsageRecorder, OpenRouterConfig, OpenRouterProvider};
use support_router::adapters::escalation::InMemoryEscalationQueue;
use support_router::adapters::storage::{
    load_catalog, CatalogLoadError, InMemoryConversationHistory, InMemoryFaqCatalog,
};
use support_router::adapters::time::TokioSleeper;
use support_router::application::{
    HealthStatus, ModelClient, RouteMessageCommand, RouteMessageHandler, SearchFaqHandler,
    SearchFaqQuery, SuggestedQuestionsHandler, SuggestedQuestionsQuery,
};
use support_router::config::{AppConfig, ConfigError, ValidationError};
use support_router::domain::foundation::SessionId;
use support_router::ports::{CatalogError, ProviderError, UsageRecorder};
use support_router::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "support-router")]
#[command(version, about = "Customer-support message router with FAQ fast path and escalation rules")]
struct Cli {
    /// YAML FAQ catalog (overrides SUPPORT_ROUTER__CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a single message and print the result
    Route {
        /// Customer message
        message: String,
        /// Session to attach the message to (default: new session)
        #[arg(long)]
        session: Option<SessionId>,
        /// Customer identifier recorded on escalations
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Route every line read from stdin within one session
    Chat {
        /// Session id (default: new session)
        #[arg(long)]
        session: Option<SessionId>,
    },

    /// Probe the completion provider
    Health,

    /// List suggested catalog questions
    Suggest {
        /// Number of questions to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Search active catalog entries by category and text
    Search {
        /// Text looked for in questions and answers
        query: Option<String>,
        /// Only entries in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("provider is unhealthy")]
    Unhealthy,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: AppConfig) -> Result<(), CliError> {
    config.routing.validate()?;
    let catalog = Arc::new(InMemoryFaqCatalog::new(seed_entries(&config).await?));

    match command {
        Commands::Suggest { limit } => {
            let handler = SuggestedQuestionsHandler::new(catalog);
            let suggestions = handler.handle(SuggestedQuestionsQuery { limit }).await?;
            print_json(&suggestions)
        }
        Commands::Search {
            query,
            category,
            limit,
        } => {
            let handler = SearchFaqHandler::new(catalog);
            let results = handler
                .handle(SearchFaqQuery {
                    query,
                    category,
                    limit,
                })
                .await?;
            print_json(&results)
        }
        Commands::Health => {
            let client = model_client(&config)?;
            let report = client.health_check().await;
            print_json(&report)?;
            if report.status == HealthStatus::Unhealthy {
                return Err(CliError::Unhealthy);
            }
            Ok(())
        }
        Commands::Route {
            message,
            session,
            user_id,
        } => {
            let handler = route_handler(&config, catalog)?;
            let mut cmd = RouteMessageCommand::new(session.unwrap_or_default(), message);
            if let Some(user_id) = user_id {
                cmd = cmd.with_user_id(user_id);
            }
            print_json(&handler.handle(cmd).await)
        }
        Commands::Chat { session } => {
            let usage = Arc::new(InMemoryUsageRecorder::new());
            let handler = route_handler(&config, catalog)?.with_usage_recorder(usage.clone());
            let session = session.unwrap_or_default();
            tracing::info!(session_id = %session, "Chat session started");

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                print_json(&handler.handle(RouteMessageCommand::new(session, line)).await)?;
            }

            match usage.session_summary(&session).await {
                Ok(summary) => tracing::info!(
                    session_id = %session,
                    requests = summary.request_count,
                    total_tokens = summary.total_tokens,
                    "Chat session finished"
                ),
                Err(err) => tracing::warn!(error = %err, "Usage summary unavailable"),
            }
            Ok(())
        }
    }
}

async fn seed_entries(
    config: &AppConfig,
) -> Result<Vec<support_router::domain::faq::FaqEntry>, CliError> {
    match &config.catalog_path {
        Some(path) => Ok(load_catalog(path).await?),
        None => {
            tracing::warn!("No FAQ catalog configured, every message goes to the model");
            Ok(Vec::new())
        }
    }
}

fn model_client(config: &AppConfig) -> Result<ModelClient<OpenRouterProvider>, CliError> {
    config.provider.validate()?;
    let api_key = config
        .provider
        .api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("OPENROUTER_API_KEY"))?;

    let provider = OpenRouterProvider::new(
        OpenRouterConfig::from_secret(api_key)
            .with_model(config.provider.model.clone())
            .with_base_url(config.provider.base_url.clone())
            .with_timeout(config.provider.timeout()),
    )?;

    Ok(ModelClient::new(Arc::new(provider), Arc::new(TokioSleeper))
        .with_retry_policy(config.provider.retry_policy())
        .with_temperature(config.provider.temperature)
        .with_max_tokens(config.provider.max_tokens))
}

fn route_handler(
    config: &AppConfig,
    catalog: Arc<InMemoryFaqCatalog>,
) -> Result<RouteMessageHandler<OpenRouterProvider>, CliError> {
    let client = model_client(config)?;
    let routing = &config.routing;

    Ok(
        RouteMessageHandler::new(catalog, Arc::new(InMemoryConversationHistory::new()), client)
            .with_escalation_queue(Arc::new(InMemoryEscalationQueue::new()))
            .with_sanitizer(routing.sanitizer())
            .with_matcher(routing.matcher())
            .with_context_builder(routing.context_builder())
            .with_rule_engine(routing.rule_engine()),
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
