use std::path::Path;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use gh_api::middleware::JwtService;
use gh_api::{create_app, AppState, Repositories};
use gh_core::Messages;
use gh_infra::{create_mail_sender, BcryptPasswordEncoder, DatabasePool};
use gh_shared::{AppConfig, LogFormat, LoggingConfig, MessageCatalog, StorageBackend};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Good Hands API server");
    for warning in config.production_warnings() {
        tracing::warn!(event = "unsafe_configuration", "{}", warning);
    }

    let catalog = MessageCatalog::load(config.messages_path.as_deref().map(Path::new))
        .context("Failed to load the message catalog")?;
    let messages = Messages::new(Arc::new(catalog), config.language);

    let (repositories, pool) = match config.database.backend {
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone()).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            (Repositories::mysql(&pool), Some(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            (Repositories::in_memory(), None)
        }
    };

    let mail_sender = create_mail_sender(&config.mail)?;
    let state = web::Data::new(AppState::new(
        repositories,
        mail_sender,
        Arc::new(BcryptPasswordEncoder::default()),
        messages,
        JwtService::new(&config.jwt),
        config.server.public_url.clone(),
    )?);

    if config.admin.enabled {
        state
            .users
            .ensure_admin_account(&config.admin.email, &config.admin.password)
            .await
            .context("Failed to create the administrator account")?;
    }

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let cors = config.cors.clone();
    let payload_limit = config.server.max_payload_size;
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, payload_limit));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
