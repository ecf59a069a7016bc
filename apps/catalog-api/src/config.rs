//! Configuration for Catalog API

use std::time::Duration;

use core_config::{app_info, env_parse_or, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;
use database::redis::RedisConfig;
use domain_products::{publisher::DEFAULT_MAX_LENGTH, DEFAULT_IMAGE_QUEUE};

pub use core_config::Environment;

const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub redis: RedisConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Redis stream receiving image URLs
    pub image_queue: String,
    pub image_queue_max_length: usize,
    pub cache_ttl: Duration,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let redis = RedisConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let image_queue = std::env::var("IMAGE_QUEUE_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_QUEUE.to_string());
        let image_queue_max_length = env_parse_or("IMAGE_QUEUE_MAX_LENGTH", DEFAULT_MAX_LENGTH)?;
        let cache_ttl = Duration::from_secs(env_parse_or("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?);

        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN").ok();

        Ok(Self {
            app: app_info!(),
            postgres,
            redis,
            server,
            environment,
            image_queue,
            image_queue_max_length,
            cache_ttl,
            cors_allowed_origin,
        })
    }
}
