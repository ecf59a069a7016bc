//! Redis test container

use redis::Client;
use redis::aio::ConnectionManager;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::Redis;

/// Running Redis container; stopped and removed on drop.
///
/// ```no_run
/// use test_utils::TestRedis;
/// use redis::AsyncCommands;
///
/// # async fn example() {
/// let redis = TestRedis::new().await;
/// let mut conn = redis.connection();
/// conn.set::<_, _, ()>("key", "value").await.unwrap();
/// # }
/// ```
pub struct TestRedis {
    container: ContainerAsync<Redis>,
    connection: ConnectionManager,
    pub connection_string: String,
}

impl TestRedis {
    pub async fn new() -> Self {
        let container = Redis::default()
            .with_tag("8-alpine")
            .start()
            .await
            .expect("Failed to start Redis container");

        let host_port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let connection_string = format!("redis://127.0.0.1:{host_port}");
        let client = Client::open(connection_string.clone()).expect("Failed to create Redis client");
        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!(port = host_port, "Test Redis ready");

        Self {
            container,
            connection,
            connection_string,
        }
    }

    /// Cloned connection manager, the same type the services take
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    /// Stop the container while keeping handles alive, so later commands fail.
    pub async fn stop(&self) {
        self.container
            .stop()
            .await
            .expect("Failed to stop Redis container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::AsyncCommands;

    #[tokio::test]
    #[ignore] // starts a container
    async fn set_and_get_round_trip() {
        let redis = TestRedis::new().await;
        let mut conn = redis.connection();

        conn.set::<_, _, ()>("key", "value").await.unwrap();
        let value: String = conn.get("key").await.unwrap();
        assert_eq!(value, "value");
    }
}
