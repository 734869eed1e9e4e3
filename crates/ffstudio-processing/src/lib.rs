//! ffstudio processing
//!
//! Everything between a validated upload and a produced file: extension and
//! size validation, form parameter parsing, ffmpeg argument construction,
//! process execution and the scoped working directory that owns every
//! temporary path of a request.

pub mod command;
pub mod ffmpeg;
pub mod params;
pub mod validator;
pub mod workspace;

pub use command::{CommandBuilder, ExecutionRequest, OutputPaths};
pub use ffmpeg::{FfmpegRunner, ProcessingError};
pub use params::{CropRect, OperationSpec, Timestamp};
pub use validator::{UploadValidator, ValidationError};
pub use workspace::{RequestScope, WorkDir};
