use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_media::MediaConfig;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub media: MediaConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            media: MediaConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
