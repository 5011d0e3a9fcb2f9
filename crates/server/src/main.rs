mod handlers;
mod pagination;
mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{Extension, Router, Server};
use common::{config::Config, logging};
use db::{Database, DatabaseConnection};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::new()?;

    logging::init(&config);

    let Some(server_config) = config.server.as_ref() else {
        return Err(anyhow::Error::msg("unable to load server config"));
    };

    info!(url = %config.database.redacted_url(), "connecting to database");
    let database = Arc::new(Database::connect(&config.database.url).await?);

    info!(
        address = %server_config.address,
        submission_mode = ?config.submissions.mode,
        "starting server"
    );
    let server = Server::bind(&server_config.address);
    let config = Arc::new(config);

    server
        .serve(app_router(database, config).into_make_service())
        .await?;

    Ok(())
}

fn app_router(database: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    Router::new()
        .nest("/teams", handlers::teams::routes())
        .nest("/submissions", handlers::submissions::routes())
        .layer(Extension(config))
        .with_state(database)
}
