use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use std::sync::Arc;

mod api;
mod calc;
mod config;
mod db;
mod docs;
mod error;
mod excel;
mod model;
mod models;
mod pages;
mod routes;
mod store;
mod utils;

use config::{Config, StoreBackend};
use db::init_db;
use store::{Store, memory::MemoryStore, mysql::MySqlStore};

use routes::Limiters;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false), // removes module path
        )
        .with(fmt::layer().with_target(false))
        .init();

    info!(backend = %config.store_backend, "Server starting...");

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Mysql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            Arc::new(MySqlStore::new(init_db(url).await?))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    let store = Data::from(store);

    let server_addr = config.server_addr.clone();
    let limiters = Limiters::new(&config);
    let openapi = docs::openapi_for(&config.api_prefix);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(store.clone())
            .app_data(Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, &config, &limiters))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
