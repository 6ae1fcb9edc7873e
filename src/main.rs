use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use storyforge::ai;
use storyforge::config::AppConfig;
use storyforge::error::AppError;
use storyforge::routes;
use storyforge::state::AppState;
use storyforge::store::{seed, JsonStore};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storyforge=info,tower_http=warn")),
        )
        .init();

    let config = AppConfig::load()?;
    let store = JsonStore::new(config.database_file());

    if std::env::args().any(|arg| arg == "--seed") {
        seed::seed(&store)?;
        tracing::info!(
            path = %config.database_file().display(),
            "seeded sample categories and parameters"
        );
        return Ok(());
    }

    let adapter = ai::create_adapter(&config)?;
    let port = config.port;
    let state = Arc::new(AppState {
        config,
        store,
        adapter,
    });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "storyforge API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
