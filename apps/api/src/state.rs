//! Shared application state.

use database::postgres::DatabaseConnection;

use crate::config::Config;

/// State handed to the per-domain routers.
///
/// Cloning is cheap: the connection is a pooled handle and the config is a
/// small value type.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
}
