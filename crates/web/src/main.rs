use std::sync::Arc;

use anyhow::Context;
use roster::WynncraftClient;
use storage::{
    Database,
    repository::LockRepository,
    services::{LockEngine, LockPolicy},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod router;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::guild::handlers::get_guild,
        features::guild::handlers::get_current_leaderboard,
        features::leaderboard::handlers::resolve_lock,
        features::leaderboard::handlers::compute_difference,
        features::leaderboard::handlers::get_weekly,
        features::players::handlers::get_player,
    ),
    components(
        schemas(
            storage::models::Member,
            storage::models::DifferenceMember,
            storage::dto::lock::LockRequest,
            storage::dto::lock::LockResponse,
            storage::dto::lock::DifferenceRequest,
            storage::dto::weekly::WeeklyLeaderboard,
            roster::PlayerProfile,
        )
    ),
    tags(
        (name = "guild", description = "Live guild roster endpoints"),
        (name = "leaderboard", description = "Weekly XP leaderboard endpoints"),
        (name = "players", description = "Player profile endpoints"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting guild weekly XP API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::with_timeout(&config.database_url, config.store_timeout)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let store = LockRepository::with_row_id(db.pool().clone(), config.lock_row_id);
    let policy = if config.lock_compare_and_swap {
        LockPolicy::CompareAndSwap
    } else {
        LockPolicy::LastWriteWins
    };
    tracing::info!("Lock row {} with {:?} policy", store.row_id(), policy);

    let engine = LockEngine::new(Arc::new(store))
        .with_policy(policy)
        .with_store_timeout(config.store_timeout);

    let client = WynncraftClient::with_options(
        config.guild_name.as_str(),
        &config.wynncraft_api_url,
        config.roster_timeout,
    )
    .context("Failed to build game API client")?;
    tracing::info!("Tracking guild '{}'", client.guild());

    let state = AppState::new(Arc::new(client), engine);

    let app = router::api_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
