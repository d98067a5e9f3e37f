mod books;
mod catalog;
mod core;
mod fines;
mod gateway;
mod members;
mod transactions;
mod utils;

use axum::{
    body::HttpBody,
    routing::{get, post},
    BoxError, Router,
};
use lambda_http::{run, Error};
use tracing::info;
use crate::core::config::ServerConfig;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::GatewayPublisherVia;
use crate::utils::logs::setup_tracing;
use crate::utils::memory::MemoryDatabase;
use crate::utils::pg::{build_pool, create_schema};

async fn liveness() -> &'static str {
    "Library API is running..."
}

fn build_router<B>(state: AppState) -> Router<(), B>
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    Router::new()
        .route("/", get(liveness))
        .route("/books",
               get(catalog::controller::find_books).post(catalog::controller::add_book))
        .route("/books/:id",
               get(catalog::controller::find_book_by_id)
                   .put(catalog::controller::update_book)
                   .delete(catalog::controller::remove_book))
        .route("/members",
               get(members::controller::find_members).post(members::controller::add_member))
        .route("/members/:id",
               get(members::controller::find_member_by_id)
                   .put(members::controller::update_member)
                   .delete(members::controller::remove_member))
        .route("/members/:id/borrowed", get(members::controller::find_borrowed))
        .route("/transactions/borrow", post(transactions::controller::borrow_book))
        .route("/transactions/:id/return", post(transactions::controller::return_book))
        .route("/transactions/overdue", get(transactions::controller::find_overdue))
        .route("/transactions/overdue/mark", post(transactions::controller::mark_overdue))
        .route("/fines", get(fines::controller::find_fines))
        .route("/fines/:id/pay", post(fines::controller::pay_fine))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let server_config = ServerConfig::from_env()?;
    setup_tracing(server_config.log_level.as_str());
    let config = Configuration::from_env(server_config.branch.as_str())?;

    let store = match &server_config.database_url {
        Some(url) => {
            let pool = build_pool(url).await?;
            create_schema(&pool).await?;
            RepositoryStore::Postgres(pool)
        }
        None => {
            info!("DATABASE_URL is not set, using the in-process store");
            RepositoryStore::InMemory(MemoryDatabase::new())
        }
    };
    let via = GatewayPublisherVia::from_topic(server_config.events_topic_arn.clone());
    let state = AppState::new(config, store, &via).await;

    // See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
    if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        return run(build_router::<lambda_http::Body>(state)).await;
    }
    let app: Router = build_router(state);
    info!("listening on {}", server_config.bind_address);
    axum::Server::bind(&server_config.bind_address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
