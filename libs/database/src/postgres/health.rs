use sea_orm::DatabaseConnection;

/// Ping the database; used by the readiness endpoint.
pub async fn ping(db: &DatabaseConnection) -> bool {
    match db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            false
        }
    }
}
