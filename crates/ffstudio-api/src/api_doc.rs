//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ffstudio API",
        version = "0.1.0",
        description = "Media operations over ffmpeg: cut audio, crop and trim video, replace a video's audio track and turn a still image plus audio into a video. Every operation takes a multipart form and returns the produced file."
    ),
    paths(
        handlers::operations::cut_audio,
        handlers::operations::crop_video,
        handlers::operations::trim_video,
        handlers::operations::replace_audio,
        handlers::operations::image_to_video,
        handlers::health::liveness_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::health::ReadinessResponse,
        handlers::operations::CutAudioForm,
        handlers::operations::CropVideoForm,
        handlers::operations::TrimVideoForm,
        handlers::operations::ReplaceAudioForm,
        handlers::operations::ImageToVideoForm,
    )),
    tags(
        (name = "operations", description = "Media operations"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
