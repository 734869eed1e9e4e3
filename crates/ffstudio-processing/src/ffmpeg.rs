//! External encoder execution

use std::path::PathBuf;
use std::process::Stdio;

use ffstudio_core::AppError;
use tokio::process::Command;

use crate::command::ExecutionRequest;

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {status:?}: {stderr}")]
    NonZeroExit {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("{program} reported success but produced no output at {}", .path.display())]
    MissingOutput { program: String, path: PathBuf },

    #[error("Invalid processing plan: {0}")]
    InvalidPlan(String),
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::InvalidPlan(msg) => AppError::Internal(msg),
            other => AppError::MediaProcessing(other.to_string()),
        }
    }
}

/// Runs ffmpeg as an async child process
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    ffmpeg_path: String,
}

impl FfmpegRunner {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.ffmpeg_path
    }

    /// Execute one invocation. Succeeds only when the process exits 0 and the
    /// expected output exists.
    #[tracing::instrument(skip(self, request), fields(output = %request.output.display()))]
    pub async fn run(&self, request: &ExecutionRequest) -> Result<(), ProcessingError> {
        tracing::debug!(args = ?request.args, "Running ffmpeg");

        let output = Command::new(&self.ffmpeg_path)
            .args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn {
                program: self.ffmpeg_path.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProcessingError::NonZeroExit {
                program: self.ffmpeg_path.clone(),
                status: output.status.code(),
                stderr,
            });
        }

        if tokio::fs::metadata(&request.output).await.is_err() {
            return Err(ProcessingError::MissingOutput {
                program: self.ffmpeg_path.clone(),
                path: request.output.clone(),
            });
        }

        Ok(())
    }

    /// Execute invocations in order, stopping at the first failure
    pub async fn run_all(&self, plan: &[ExecutionRequest]) -> Result<(), ProcessingError> {
        for (step, request) in plan.iter().enumerate() {
            tracing::debug!(step = step + 1, total = plan.len(), "Executing step");
            self.run(request).await?;
        }
        Ok(())
    }

    /// First line of `ffmpeg -version`, used by the readiness probe
    pub async fn version(&self) -> Result<String, ProcessingError> {
        let output = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ProcessingError::Spawn {
                program: self.ffmpeg_path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProcessingError::NonZeroExit {
                program: self.ffmpeg_path.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().to_string())
    }
}
