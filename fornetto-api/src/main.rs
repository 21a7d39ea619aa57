use fornetto_api::{app, AppState};
use fornetto_order::OrderOrchestrator;
use fornetto_store::{DbClient, HttpIngredientClient, PgCustomizationStore, PgOrderStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fornetto_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = fornetto_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Fornetto API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let ingredients = HttpIngredientClient::new(
        config.ingredient.base_url.clone(),
        config.ingredient.timeout_ms,
    )
    .expect("Failed to build ingredient client");

    let orchestrator = OrderOrchestrator::new(
        Arc::new(ingredients),
        Arc::new(PgOrderStore::new(db.pool.clone())),
        Arc::new(PgCustomizationStore::new(db.pool.clone())),
    );

    let app_state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
