//! Data models for the application
//!
//! Media categories with their extension allow-lists, and the static
//! descriptors of each supported operation.

mod media;
mod operation;

pub use media::MediaCategory;
pub use operation::{OperationKind, UploadSlot};
