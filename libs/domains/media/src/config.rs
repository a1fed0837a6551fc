use core_config::{ConfigError, FromEnv, env_or_default, env_required};

/// Configuration for the external media service.
#[derive(Clone, Debug)]
pub struct MediaConfig {
    /// Base URL of the media service, e.g. "https://media.internal"
    pub base_url: String,
    /// Bearer token sent with every upload
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MediaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Load MediaConfig from environment variables.
///
/// - `MEDIA_BASE_URL` (required)
/// - `MEDIA_API_KEY` (optional)
/// - `MEDIA_TIMEOUT_SECS` (default: 30)
impl FromEnv for MediaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = env_or_default("MEDIA_TIMEOUT_SECS", "30").parse().map_err(
            |e: std::num::ParseIntError| ConfigError::ParseError {
                key: "MEDIA_TIMEOUT_SECS".to_string(),
                details: format!("{}", e),
            },
        )?;

        Ok(Self {
            base_url: env_required("MEDIA_BASE_URL")?,
            api_key: std::env::var("MEDIA_API_KEY").ok(),
            timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_config_from_env() {
        temp_env::with_vars(
            [
                ("MEDIA_BASE_URL", Some("https://media.example.com")),
                ("MEDIA_API_KEY", Some("secret")),
            ],
            || {
                let config = MediaConfig::from_env().unwrap();
                assert_eq!(config.base_url, "https://media.example.com");
                assert_eq!(config.api_key.as_deref(), Some("secret"));
                assert_eq!(config.timeout_secs, 30);
            },
        );
    }

    #[test]
    fn test_media_config_requires_base_url() {
        temp_env::with_var_unset("MEDIA_BASE_URL", || {
            assert!(MediaConfig::from_env().is_err());
        });
    }
}
