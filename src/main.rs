use lynix::config::Config;
use lynix::domain::assistant::AssistantClient;
use lynix::infrastructure::assistant::GeminiClient;
use lynix::infrastructure::persistence::{
    create_pool, ensure_schema, DatabaseConfig, PgCallRepository, PgContactRepository,
    PgLocalMailRepository, PgMessageRepository, PgNoteRepository, PgSessionRepository,
    PgUserRepository, PgVoiceRoomRepository,
};
use lynix::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting Lynix portal backend");

    // Load configuration
    let config = Config::from_env();

    // Create database pool
    let pool = create_pool(&DatabaseConfig::with_url(config.database.url.clone())).await?;
    info!("Database connection pool created");

    // Create tables and seed static rows
    ensure_schema(&pool).await?;
    info!("Database schema ready");

    let assistant = GeminiClient::from_config(&config.assistant)
        .map(|client| Arc::new(client) as Arc<dyn AssistantClient>);
    if assistant.is_none() {
        info!("No assistant API key configured; AI chat will report unavailable");
    }

    let state = AppState {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        sessions: Arc::new(PgSessionRepository::new(
            pool.clone(),
            config.auth.session_ttl_seconds,
        )),
        calls: Arc::new(PgCallRepository::new(pool.clone())),
        messages: Arc::new(PgMessageRepository::new(pool.clone())),
        voice_rooms: Arc::new(PgVoiceRoomRepository::new(pool.clone())),
        notes: Arc::new(PgNoteRepository::new(pool.clone())),
        contacts: Arc::new(PgContactRepository::new(pool.clone())),
        localmail: Arc::new(PgLocalMailRepository::new(pool)),
        assistant,
    };

    // Initialize metrics exporter
    let prometheus_handle = init_metrics()?;

    let app = build_router(state, prometheus_handle);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
