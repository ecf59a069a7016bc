//! Catalog API - product REST server

use std::sync::Arc;
use std::time::Duration;

use axum_helpers::server::health_router;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{PgProductRepository, ProductService, RedisProductCache, RedisStreamPublisher};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = database::postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;

    info!("Connecting to Redis");
    let redis = database::redis::connect_with_retry(&config.redis.url, None).await?;

    let publisher = RedisStreamPublisher::new(redis.clone(), config.image_queue.clone())
        .with_max_length(config.image_queue_max_length);
    let cache = RedisProductCache::new(redis.clone(), config.cache_ttl);
    let service = ProductService::new(PgProductRepository::new(db.clone()), Arc::new(publisher))
        .with_cache(Arc::new(cache));

    let state = AppState { db, redis };

    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api::routes(service),
        config.cors_allowed_origin.as_deref(),
    )?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::health::router(state.clone()));

    info!(
        queue = %config.image_queue,
        "Starting Catalog API on {}",
        config.server.address()
    );

    axum_helpers::serve(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL pool");
        database::postgres::close(state.db).await;
        drop(state.redis);
    })
    .await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
