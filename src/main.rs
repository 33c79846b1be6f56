use mefit::api::routes::create_routes;
use mefit::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder, StoreBackend};
use mefit::repositories::Store;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = db_config.create_pool().await?;
            run_migrations(&pool).await?;
            info!("Connected to PostgreSQL, migrations applied");
            Store::postgres(pool)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on shutdown");
            Store::in_memory()
        }
    };

    if config.should_seed() {
        DatabaseSeeder::new(store.clone()).seed_all().await?;
    }

    let app = create_routes(store, &config);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("MeFit server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
