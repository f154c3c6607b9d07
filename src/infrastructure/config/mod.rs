use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    /// Target device threaded through engine initialization ("cpu", "cuda")
    pub device: String,
    pub engine: EngineBackend,
    /// Upper bound on the multipart request body, reference clip included
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EngineBackend {
    /// No backend; the server starts but rejects synthesis with 503
    Disabled,
    /// Seedable development backend, no model weights required
    Mock,
}

/// 32 MiB, enough for a several-second uncompressed reference clip
const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 << 20;

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            device: env::var("TTS_DEVICE").unwrap_or_else(|_| "cpu".to_string()),
            engine: env::var("TTS_ENGINE")
                .unwrap_or_else(|_| "disabled".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "mock" => EngineBackend::Mock,
                    _ => EngineBackend::Disabled,
                })?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .map(|s| s.parse())
                .unwrap_or(Ok(DEFAULT_MAX_UPLOAD_BYTES))?,
        };

        Ok(config)
    }
}
