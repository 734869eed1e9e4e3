//! API constants
//!
//! Route paths shared by the router, the OpenAPI document and the tests.

/// API base path prefix
pub const API_BASE: &str = "/api";

pub const HEALTH_PATH: &str = "/health";
pub const READY_PATH: &str = "/ready";
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "ffstudio_api=debug,ffstudio_processing=debug,tower_http=debug";

/// Text form fields are short; anything longer is rejected
pub const MAX_TEXT_FIELD_BYTES: usize = 256;

/// Route for an operation under the API prefix, e.g. `/api/cut-audio`
pub fn operation_path(kind: ffstudio_core::OperationKind) -> String {
    format!("{}/{}", API_BASE, kind.id())
}
