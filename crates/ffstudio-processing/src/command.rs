//! ffmpeg argument construction
//!
//! Pure mapping from a validated [`OperationSpec`] and resolved paths to the
//! ordered invocations of the encoder. Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use crate::ffmpeg::ProcessingError;
use crate::params::OperationSpec;

/// Flags shared by every invocation
const COMMON_ARGS: [&str; 5] = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"];

/// One encoder invocation: the argument vector and the file it must produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub args: Vec<String>,
    pub output: PathBuf,
}

/// Paths pre-allocated in the request scope for the produced files
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub output: PathBuf,
    pub intermediate: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    image_max_width: u32,
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn invocation(args: &[String], output: &Path) -> ExecutionRequest {
    let mut full: Vec<String> = COMMON_ARGS.iter().map(|s| s.to_string()).collect();
    full.extend_from_slice(args);
    full.push(path_arg(output));
    ExecutionRequest {
        args: full,
        output: output.to_path_buf(),
    }
}

impl CommandBuilder {
    pub fn new(image_max_width: u32) -> Self {
        Self { image_max_width }
    }

    /// Build the invocations for `spec`. `inputs` follow the order of the
    /// operation's upload slots.
    pub fn build(
        &self,
        spec: &OperationSpec,
        inputs: &[PathBuf],
        outputs: &OutputPaths,
    ) -> Result<Vec<ExecutionRequest>, ProcessingError> {
        let expected = spec.kind().uploads().len();
        if inputs.len() != expected {
            return Err(ProcessingError::InvalidPlan(format!(
                "{} expects {} input(s), got {}",
                spec.kind(),
                expected,
                inputs.len()
            )));
        }

        let plan = match spec {
            OperationSpec::CutAudio { start, duration } => vec![invocation(
                &[
                    "-i".to_string(),
                    path_arg(&inputs[0]),
                    "-ss".to_string(),
                    start.to_string(),
                    "-t".to_string(),
                    duration.to_string(),
                    "-acodec".to_string(),
                    "copy".to_string(),
                ],
                &outputs.output,
            )],
            OperationSpec::CropVideo { rect } => vec![invocation(
                &[
                    "-i".to_string(),
                    path_arg(&inputs[0]),
                    "-filter:v".to_string(),
                    format!("crop={}:{}:{}:{}", rect.w, rect.h, rect.x, rect.y),
                    "-c:v".to_string(),
                    "libx264".to_string(),
                    "-c:a".to_string(),
                    "copy".to_string(),
                ],
                &outputs.output,
            )],
            OperationSpec::TrimVideo { start, end } => vec![invocation(
                &[
                    "-i".to_string(),
                    path_arg(&inputs[0]),
                    "-ss".to_string(),
                    start.to_string(),
                    "-to".to_string(),
                    end.to_string(),
                    "-c".to_string(),
                    "copy".to_string(),
                ],
                &outputs.output,
            )],
            OperationSpec::ReplaceAudio => vec![invocation(
                &[
                    "-i".to_string(),
                    path_arg(&inputs[0]),
                    "-i".to_string(),
                    path_arg(&inputs[1]),
                    "-map".to_string(),
                    "0:v".to_string(),
                    "-map".to_string(),
                    "1:a".to_string(),
                    "-c:v".to_string(),
                    "copy".to_string(),
                    "-c:a".to_string(),
                    "aac".to_string(),
                    "-shortest".to_string(),
                ],
                &outputs.output,
            )],
            OperationSpec::ImageToVideo => {
                let scaled = outputs.intermediate.as_deref().ok_or_else(|| {
                    ProcessingError::InvalidPlan(
                        "image-to-video needs an intermediate path".to_string(),
                    )
                })?;

                // libx264 with yuv420p needs even dimensions
                let scale = format!(
                    "scale='min({},trunc(iw/2)*2)':-2",
                    self.image_max_width
                );

                vec![
                    invocation(
                        &["-i".to_string(), path_arg(&inputs[0]), "-vf".to_string(), scale],
                        scaled,
                    ),
                    invocation(
                        &[
                            "-loop".to_string(),
                            "1".to_string(),
                            "-i".to_string(),
                            path_arg(scaled),
                            "-i".to_string(),
                            path_arg(&inputs[1]),
                            "-c:v".to_string(),
                            "libx264".to_string(),
                            "-tune".to_string(),
                            "stillimage".to_string(),
                            "-c:a".to_string(),
                            "aac".to_string(),
                            "-b:a".to_string(),
                            "192k".to_string(),
                            "-pix_fmt".to_string(),
                            "yuv420p".to_string(),
                            "-shortest".to_string(),
                        ],
                        &outputs.output,
                    ),
                ]
            }
        };

        Ok(plan)
    }
}
