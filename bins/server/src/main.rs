//! Niwaki API Server
//!
//! Main entry point for the Niwaki inquiry service.

use std::sync::Arc;

use anyhow::Context as _;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use niwaki_api::{AppState, create_router};
use niwaki_core::storage::{StorageConfig, StorageProvider, StorageService};
use niwaki_db::connect;
use niwaki_shared::config::StorageSettings;
use niwaki_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "niwaki=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_secs: config.jwt.access_token_expiry_secs,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Create storage service
    let storage = StorageService::from_config(storage_config(&config.storage)?)?;
    info!(provider = storage.provider_name(), "Object storage configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        storage: Arc::new(storage),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Maps the flat storage settings onto a provider config.
fn storage_config(settings: &StorageSettings) -> anyhow::Result<StorageConfig> {
    let provider = match settings.backend.as_str() {
        "local" => StorageProvider::local_fs(&settings.root),
        "s3" => {
            let endpoint = settings
                .endpoint
                .clone()
                .context("storage.endpoint is required for the s3 backend")?;
            let bucket = settings
                .bucket
                .clone()
                .context("storage.bucket is required for the s3 backend")?;
            let access_key_id = settings
                .access_key_id
                .clone()
                .context("storage.access_key_id is required for the s3 backend")?;
            let secret_access_key = settings
                .secret_access_key
                .clone()
                .context("storage.secret_access_key is required for the s3 backend")?;
            let region = settings.region.clone().unwrap_or_else(|| "auto".to_string());
            StorageProvider::s3(endpoint, bucket, access_key_id, secret_access_key, region)
        }
        other => anyhow::bail!("unknown storage backend: {other}"),
    };

    let mut config = StorageConfig::new(provider);
    if let Some(base_url) = &settings.public_base_url {
        config = config.with_public_base_url(base_url);
    }
    Ok(config)
}
