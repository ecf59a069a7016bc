//! Application state management

use redis::aio::ConnectionManager;
use sea_orm::DatabaseConnection;

/// Connections shared with the operational endpoints
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: ConnectionManager,
}
