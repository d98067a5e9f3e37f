use std::sync::Arc;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::events::EventPublisher;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;
use crate::utils::date::{Clock, SystemClock};
use crate::utils::memory::MemoryDatabase;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
    pub(crate) publisher: Arc<dyn EventPublisher>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn new(config: Configuration, store: RepositoryStore, via: &GatewayPublisherVia) -> AppState {
        AppState {
            config,
            store,
            publisher: create_publisher(via).await,
            clock: Arc::new(SystemClock),
        }
    }

    // fresh in-process store with default business rules
    pub fn in_memory(branch: &str) -> AppState {
        AppState {
            config: Configuration::new(branch),
            store: RepositoryStore::InMemory(MemoryDatabase::new()),
            publisher: Arc::new(LogPublisher::new()),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> AppState {
        self.clock = clock;
        self
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> AppState {
        self.publisher = publisher;
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

pub(crate) type ServerError = (StatusCode, Json<ErrorBody>);

pub(crate) fn server_error(status: StatusCode, message: &str) -> ServerError {
    (status, Json(ErrorBody { error: message.to_string() }))
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    server_error(StatusCode::BAD_REQUEST, format!("invalid request body: {}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::DuplicateKey { message } => {
                server_error(StatusCode::BAD_REQUEST, message.as_str())
            }
            CommandError::NotFound { message } => {
                server_error(StatusCode::NOT_FOUND, message.as_str())
            }
            CommandError::Rejected { message, .. } => {
                server_error(StatusCode::BAD_REQUEST, message.as_str())
            }
            CommandError::Serialization { message } => {
                server_error(StatusCode::BAD_REQUEST, message.as_str())
            }
            CommandError::Validation { message, .. } => {
                server_error(StatusCode::BAD_REQUEST, message.as_str())
            }
            CommandError::Database { .. } | CommandError::Runtime { .. } => {
                error!("request failed: {:?}", err);
                server_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        }
    }
}
