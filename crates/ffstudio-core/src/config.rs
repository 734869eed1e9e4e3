//! Configuration module
//!
//! Process-wide settings for the HTTP façade: bind address, CORS, the scoped
//! working directory, the external encoder and upload limits.

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 8000;
const MAX_UPLOAD_BYTES: usize = 50_000_000;
const IMAGE_MAX_WIDTH: u32 = 1280;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Console output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Scoped working directory for per-request temporary files
    pub work_dir: PathBuf,
    pub ffmpeg_path: String,
    /// Ceiling applied to every uploaded file, in bytes
    pub max_upload_bytes: usize,
    /// Upper bound for the image width in image-to-video
    pub image_max_width: u32,
    /// Front-end directory served at `/`; skipped when missing
    pub static_dir: PathBuf,
    pub http_concurrency_limit: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            work_dir: PathBuf::from("tmp/ffstudio"),
            ffmpeg_path: "ffmpeg".to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            image_max_width: IMAGE_MAX_WIDTH,
            static_dir: PathBuf::from("public"),
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            log_format: LogFormat::Compact,
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or(defaults.environment);

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => defaults.server_port,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a byte count"))?,
            None => defaults.max_upload_bytes,
        };

        let image_max_width = match lookup("IMAGE_MAX_WIDTH") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("IMAGE_MAX_WIDTH must be a pixel count"))?,
            None => defaults.image_max_width,
        };

        let http_concurrency_limit = match lookup("HTTP_CONCURRENCY_LIMIT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be a valid number"))?,
            None => defaults.http_concurrency_limit,
        };

        let config = Config {
            server_host: lookup("HOST").unwrap_or(defaults.server_host),
            server_port,
            environment,
            cors_origins,
            work_dir: lookup("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            ffmpeg_path: lookup("FFMPEG_PATH").unwrap_or(defaults.ffmpeg_path),
            max_upload_bytes,
            image_max_width,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            http_concurrency_limit,
            log_format: lookup("LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.log_format),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES cannot be 0"));
        }

        if self.image_max_width == 0 {
            return Err(anyhow::anyhow!("IMAGE_MAX_WIDTH cannot be 0"));
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        if self.ffmpeg_path.trim().is_empty() {
            return Err(anyhow::anyhow!("FFMPEG_PATH cannot be empty"));
        }

        Ok(())
    }

    /// Largest request body accepted: two uploads plus form overhead
    pub fn max_request_body_bytes(&self) -> usize {
        self.max_upload_bytes
            .saturating_mul(2)
            .saturating_add(1024 * 1024)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
