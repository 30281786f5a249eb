use std::sync::Arc;

use auth::Authenticator;
use inventory_service::config::Config;
use inventory_service::domain::item::service::ItemService;
use inventory_service::domain::user::service::AuthService;
use inventory_service::inbound::http::router::create_router;
use inventory_service::outbound::repositories::PostgresItemRepository;
use inventory_service::outbound::repositories::PostgresUserRepository;
use inventory_service::outbound::InMemoryCacheStore;
use inventory_service::outbound::JwtTokenIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "inventory-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        cache_ttl_seconds = config.cache.ttl_seconds,
        access_token_minutes = config.jwt.access_token_minutes,
        refresh_token_hours = config.jwt.refresh_token_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_lifetimes(),
    ));
    let token_issuer = Arc::new(JwtTokenIssuer::new(authenticator));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let item_repository = Arc::new(PostgresItemRepository::new(pg_pool));

    let cache_store = Arc::new(InMemoryCacheStore::new());
    let purge_task = cache_store.spawn_purge_task(config.cache.purge_interval());

    let auth_service = Arc::new(AuthService::new(user_repository, token_issuer));
    let item_service = Arc::new(ItemService::new(
        item_repository,
        cache_store,
        config.cache.ttl(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(item_service, auth_service);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    purge_task.abort();
    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
