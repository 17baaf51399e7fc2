pub mod api;
pub mod config;
pub mod gs1;
pub mod logic;
pub mod model;
pub mod registry;
pub mod seed;
pub mod store;

pub use api::handlers;
pub use api::routes;
pub use api::AppContext;

pub use logic::{
    build_dashboard, build_statement, summarize, FieldError, FieldErrors, LicenseDashboard,
    RoyaltyStatement, RoyaltySummary,
};

pub use model::*;

pub use registry::{Gs1RegistryClient, PartnerFeedClient, PaymentProcessorClient};

pub use seed::*;

pub use store::{PostgresStore, Store};

/// Start the full server from environment configuration. This is the
/// only wiring path; the binary calls straight into it.
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    dotenvy::dotenv().ok();

    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Warn) // Suppress sqlx query logs
        .try_init();

    println!("Label Office: catalog and licensing backend");

    let config = crate::config::AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    println!("Connecting to PostgreSQL...");
    let database_url = config.database_url()?;
    let postgres_store = crate::store::PostgresStore::new(&database_url).await?;

    println!("Running database migrations...");
    postgres_store.migrate().await?;
    println!("Database ready");

    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        seed::load_seed_data(&postgres_store).await?;
        println!("Seed data loaded successfully");
    }

    let context = Arc::new(AppContext::new(
        postgres_store,
        Gs1RegistryClient::new(&config.outbound)?,
        PaymentProcessorClient::new(&config.outbound)?,
        PartnerFeedClient::new(config.outbound.timeout_secs)?,
    ));

    let app = crate::api::routes::create_router().with_state(context);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Label Office server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
