use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::{DatabaseError, HealthStatus};

/// Run `SELECT 1` against the pool.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {e}"))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

pub async fn check_health_detailed(db: &DatabaseConnection) -> HealthStatus {
    HealthStatus::measure(check_health(db)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn healthy_when_select_answers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("?column?", Value::from(1i32))])]])
            .into_connection();

        let status = check_health_detailed(&db).await;
        assert!(status.healthy, "{status:?}");
    }

    #[tokio::test]
    async fn unhealthy_when_query_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();

        let err = check_health(&db).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }
}
