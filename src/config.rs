use serde::Deserialize;
use std::env;
use std::path::Path;
use config; // Explicitly import the config crate

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub allowed_origins: String,
    pub log_level: String,
    /// Key for the Tencent map geocoder. When absent, location lookups are mocked.
    pub tencent_map_key: Option<String>,
    pub geocoder_timeout_secs: u64,
    pub upload_latency_ms: u64,
    pub max_file_upload_size_mb: u64,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, config::ConfigError> {
    raw.parse::<u64>().map_err(|_| {
        config::ConfigError::Message(format!(
            "FATAL: '{}' must be a whole number, got '{}'.",
            name, raw
        ))
    })
}

const BYTES_PER_MB: u64 = 1024 * 1024;

fn check_upload_size_mb(size_mb: u64) -> Result<(), config::ConfigError> {
    if size_mb.checked_mul(BYTES_PER_MB).is_none() {
        return Err(config::ConfigError::Message(format!(
            "FATAL: 'MAX_FILE_UPLOAD_SIZE_MB' is too large: '{}'.",
            size_mb
        )));
    }
    Ok(())
}

impl Config {
    /// Loads settings from an optional `.env` file, `config/default.toml` and the
    /// process environment, in increasing order of precedence.
    pub fn from_env(env_path: Option<&Path>) -> Result<Self, config::ConfigError> {
        match env_path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    config::ConfigError::Message(format!(
                        "FATAL: Failed to load .env file from '{}'. Error: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
            None => {
                // A missing .env in the working directory is fine.
                dotenvy::dotenv().ok();
            }
        }

        let allowed_origins = env_or("ALLOWED_ORIGINS", "*");
        let log_level = env_or("LOG_LEVEL", "info");
        let tencent_map_key = env::var("TENCENT_MAP_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let geocoder_timeout_secs =
            parse_u64("GEOCODER_TIMEOUT_SECS", &env_or("GEOCODER_TIMEOUT_SECS", "10"))?;
        if geocoder_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "FATAL: 'GEOCODER_TIMEOUT_SECS' must be greater than zero.".to_string(),
            ));
        }
        let upload_latency_ms = parse_u64("UPLOAD_LATENCY_MS", &env_or("UPLOAD_LATENCY_MS", "300"))?;
        let max_file_upload_size_mb =
            parse_u64("MAX_FILE_UPLOAD_SIZE_MB", &env_or("MAX_FILE_UPLOAD_SIZE_MB", "5"))?;
        check_upload_size_mb(max_file_upload_size_mb)?;

        let mut builder = config::Config::builder()
            .set_default("web.host", "127.0.0.1")?
            .set_default("web.port", 3000_i64)?
            // Host/port may also live in a TOML file next to the binary.
            .add_source(config::File::new("config/default.toml", config::FileFormat::Toml).required(false))
            .set_override("allowed_origins", allowed_origins)?
            .set_override("log_level", log_level)?
            .set_override("geocoder_timeout_secs", geocoder_timeout_secs as i64)?
            .set_override("upload_latency_ms", upload_latency_ms as i64)?
            .set_override("max_file_upload_size_mb", max_file_upload_size_mb as i64)?;

        if let Some(key) = tencent_map_key {
            builder = builder.set_override("tencent_map_key", key)?;
        }

        if let Ok(host) = env::var("WEB_HOST") {
            builder = builder.set_override("web.host", host)?;
        }
        if let Ok(port) = env::var("WEB_PORT") {
            let port = port.trim().parse::<u16>().map_err(|_| {
                config::ConfigError::Message(format!("FATAL: 'WEB_PORT' is not a valid port: '{}'.", port))
            })?;
            builder = builder.set_override("web.port", i64::from(port))?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_file_upload_size_mb.saturating_mul(BYTES_PER_MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_upload_mb(size_mb: u64) -> Config {
        Config {
            web: WebConfig { host: "127.0.0.1".to_string(), port: 3000 },
            allowed_origins: "*".to_string(),
            log_level: "info".to_string(),
            tencent_map_key: None,
            geocoder_timeout_secs: 10,
            upload_latency_ms: 0,
            max_file_upload_size_mb: size_mb,
        }
    }

    #[test]
    fn upload_limit_is_converted_to_bytes() {
        assert_eq!(config_with_upload_mb(5).max_upload_bytes(), 5 * 1024 * 1024);
        assert_eq!(config_with_upload_mb(u64::MAX).max_upload_bytes(), u64::MAX);
    }

    #[test]
    fn oversized_upload_limit_is_rejected() {
        assert!(check_upload_size_mb(5).is_ok());
        assert!(check_upload_size_mb(u64::MAX / BYTES_PER_MB).is_ok());
        match check_upload_size_mb(u64::MAX / BYTES_PER_MB + 1) {
            Err(config::ConfigError::Message(message)) => assert!(message.starts_with("FATAL:")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
