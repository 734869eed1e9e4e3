//! Application setup and initialization
//!
//! Everything main.rs needs to go from a `Config` to a serving router.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use ffstudio_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Tracing first so validation warnings are visible
    crate::telemetry::init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = AppState::from_config(&config)?;

    match state.ffmpeg.version().await {
        Ok(version) => tracing::info!(
            program = %state.ffmpeg.program(),
            version = %version,
            "ffmpeg available"
        ),
        Err(e) => tracing::warn!(
            program = %state.ffmpeg.program(),
            error = %e,
            "ffmpeg is not runnable; operations will fail until it is"
        ),
    }

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
