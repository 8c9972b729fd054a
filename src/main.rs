use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use room_relay::{
    build_router,
    gateway::{ConnectionManager, GatewayBot, InMemoryConnectionManager},
    subscription::repository::PostgresSubscriptionRepository,
    AppError, AppState, EventDispatcher, InMemorySubscriptionRepository, RelayConfig,
    SubscriptionRepository,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "room_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting room relay");

    let config = Arc::new(RelayConfig::from_env()?);

    // Persistent store when a database is configured, in-memory otherwise
    let repository: Arc<dyn SubscriptionRepository + Send + Sync> = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;
            let repository = PostgresSubscriptionRepository::new(pool);
            repository.ensure_schema().await?;
            Arc::new(repository)
        }
        None => {
            info!("DATABASE_URL not set, subscriptions will not survive a restart");
            Arc::new(InMemorySubscriptionRepository::new())
        }
    };

    let connection_manager: Arc<dyn ConnectionManager> =
        Arc::new(InMemoryConnectionManager::new());
    let bot = Arc::new(GatewayBot::new(connection_manager.clone()));
    let dispatcher = Arc::new(EventDispatcher::new(config.clone(), repository, bot));

    let app_state = AppState::new(config.clone(), connection_manager, dispatcher);
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| AppError::Config(format!("cannot bind {}: {}", config.bind_addr, e)))?;
    info!(bind_addr = %config.bind_addr, platform = %config.platform, "Relay listening for gateway connections");

    axum::serve(listener, app)
        .await
        .map_err(|_| AppError::Internal)?;

    Ok(())
}
