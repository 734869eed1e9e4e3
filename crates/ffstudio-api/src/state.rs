//! Application state shared by every handler.

use std::sync::Arc;

use anyhow::Context;
use ffstudio_core::Config;
use ffstudio_processing::{CommandBuilder, FfmpegRunner, UploadValidator, WorkDir};

#[derive(Clone)]
pub struct AppState {
    /// Scoped working directory; one `RequestScope` per request lives inside it
    pub work_dir: WorkDir,
    pub ffmpeg: FfmpegRunner,
    pub validator: UploadValidator,
    pub commands: CommandBuilder,
}

impl AppState {
    /// Build state from configuration, creating the working directory
    pub fn from_config(config: &Config) -> anyhow::Result<Arc<Self>> {
        let work_dir = WorkDir::create(&config.work_dir).context("Failed to provision work dir")?;

        Ok(Arc::new(Self {
            work_dir,
            ffmpeg: FfmpegRunner::new(config.ffmpeg_path.clone()),
            validator: UploadValidator::new(config.max_upload_bytes),
            commands: CommandBuilder::new(config.image_max_width),
        }))
    }
}
