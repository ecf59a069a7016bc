//! Hands image URLs to the image-processing worker.
//!
//! The queue is a Redis Stream. Every URL becomes its own entry with a single `url` field,
//! in input order. Delivery is at most once: the first failed send ends the batch and nothing
//! is retried.

use async_trait::async_trait;
use std::future::Future;
use redis::aio::ConnectionManager;
use tracing::{error, info, instrument};

use crate::error::{ProductError, ProductResult};

/// Default stream the image worker consumes
pub const DEFAULT_IMAGE_QUEUE: &str = "image_processing";

/// Approximate cap on stream length
pub const DEFAULT_MAX_LENGTH: usize = 100_000;

/// Field carrying the URL in each stream entry
pub const URL_FIELD: &str = "url";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImagePublisher: Send + Sync {
    /// Send one message per URL, in order, stopping at the first failure.
    async fn publish(&self, image_urls: &[String]) -> ProductResult<()>;
}

/// [`ImagePublisher`] writing to a Redis Stream with XADD
#[derive(Clone)]
pub struct RedisStreamPublisher {
    redis: ConnectionManager,
    stream: String,
    max_length: usize,
}

impl RedisStreamPublisher {
    pub fn new(redis: ConnectionManager, stream: impl Into<String>) -> Self {
        Self {
            redis,
            stream: stream.into(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    async fn send(&self, url: &str) -> redis::RedisResult<String> {
        let mut conn = self.redis.clone();
        redis::cmd("XADD")
            .arg(&self.stream)
            .arg("MAXLEN")
            .arg("~")
            .arg(self.max_length)
            .arg("*")
            .arg(URL_FIELD)
            .arg(url)
            .query_async(&mut conn)
            .await
    }
}

#[async_trait]
impl ImagePublisher for RedisStreamPublisher {
    #[instrument(skip(self, image_urls), fields(stream = %self.stream, count = image_urls.len()))]
    async fn publish(&self, image_urls: &[String]) -> ProductResult<()> {
        if image_urls.is_empty() {
            return Ok(());
        }

        send_in_order(image_urls, |url| self.send(url)).await?;

        info!("Image URLs published to queue");
        Ok(())
    }
}

/// Send each URL in turn; the first failure ends the batch and is returned.
async fn send_in_order<'a, F, Fut>(image_urls: &'a [String], mut send: F) -> ProductResult<()>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = redis::RedisResult<String>>,
{
    for url in image_urls {
        if let Err(e) = send(url).await {
            error!(url = %url, error = %e, "Failed to publish image URL");
            return Err(ProductError::Publish(e.to_string()));
        }
    }
    Ok(())
}
