//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use ffstudio_core::Config;

/// Validate critical configuration values
///
/// Hard errors for settings that cannot work; warnings for settings that
/// work but are risky.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    // Validate CORS configuration in production
    if config.cors_origins.iter().any(|o| o == "*") {
        if is_production {
            return Err(anyhow::anyhow!(
                "CORS configured to allow all origins (*) in production - this is a security risk. \
                Please set specific allowed origins via CORS_ORIGINS environment variable."
            ));
        }
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
    }

    if config.work_dir.exists() && !config.work_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "WORK_DIR {} exists and is not a directory",
            config.work_dir.display()
        ));
    }

    if !config.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %config.static_dir.display(),
            "Static directory not found - front-end will not be served"
        );
    }

    if (config.max_upload_bytes as u64) > 2 * 1024 * 1024 * 1024 {
        tracing::warn!(
            max_upload_bytes = config.max_upload_bytes,
            "MAX_UPLOAD_BYTES is above 2 GiB - uploads are buffered on disk in WORK_DIR"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
