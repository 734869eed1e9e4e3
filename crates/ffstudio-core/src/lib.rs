//! ffstudio Core Library
//!
//! This crate provides the configuration, error types and domain models shared
//! by the processing and API crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{MediaCategory, OperationKind, UploadSlot};
