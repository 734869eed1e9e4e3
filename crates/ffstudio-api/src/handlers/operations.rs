//! Media operation handlers
//!
//! One thin handler per operation; all of them feed the shared pipeline.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Response,
};
use ffstudio_core::OperationKind;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::pipeline;
use crate::state::AppState;

async fn handle(
    state: &AppState,
    kind: OperationKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let multipart = multipart?;
    pipeline::run_operation(state, kind, multipart)
        .await
        .map_err(HttpAppError::from)
}

/// Multipart form for `cut-audio`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CutAudioForm {
    /// Audio file (.mp3, .wav, .aac, .m4a)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "00:00:02")]
    start: String,
    #[schema(example = "00:00:05")]
    duration: String,
}

/// Multipart form for `crop-video`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CropVideoForm {
    /// Video file (.mp4, .mov, .mkv, .avi)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = 0)]
    x: u32,
    #[schema(example = 0)]
    y: u32,
    #[schema(example = 320)]
    w: u32,
    #[schema(example = 240)]
    h: u32,
}

/// Multipart form for `trim-video`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct TrimVideoForm {
    /// Video file (.mp4, .mov, .mkv, .avi)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "00:00:01")]
    start: String,
    #[schema(example = "00:00:04.5")]
    end: String,
}

/// Multipart form for `replace-audio`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ReplaceAudioForm {
    #[schema(value_type = String, format = Binary)]
    video: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    audio: Vec<u8>,
}

/// Multipart form for `image-to-video`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageToVideoForm {
    /// Image file (.jpg, .jpeg, .png)
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    audio: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/cut-audio",
    tag = "operations",
    request_body(content = CutAudioForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Cut audio, same container as the input"),
        (status = 400, description = "Invalid upload or parameters", body = ErrorResponse),
        (status = 500, description = "Media processing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "cut-audio"))]
pub async fn cut_audio(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    handle(&state, OperationKind::CutAudio, multipart).await
}

#[utoipa::path(
    post,
    path = "/api/crop-video",
    tag = "operations",
    request_body(content = CropVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Cropped video"),
        (status = 400, description = "Invalid upload or parameters", body = ErrorResponse),
        (status = 500, description = "Media processing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "crop-video"))]
pub async fn crop_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    handle(&state, OperationKind::CropVideo, multipart).await
}

#[utoipa::path(
    post,
    path = "/api/trim-video",
    tag = "operations",
    request_body(content = TrimVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Trimmed video, same container as the input"),
        (status = 400, description = "Invalid upload or parameters", body = ErrorResponse),
        (status = 500, description = "Media processing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "trim-video"))]
pub async fn trim_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    handle(&state, OperationKind::TrimVideo, multipart).await
}

#[utoipa::path(
    post,
    path = "/api/replace-audio",
    tag = "operations",
    request_body(content = ReplaceAudioForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video with the new audio track"),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 500, description = "Media processing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "replace-audio"))]
pub async fn replace_audio(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    handle(&state, OperationKind::ReplaceAudio, multipart).await
}

#[utoipa::path(
    post,
    path = "/api/image-to-video",
    tag = "operations",
    request_body(content = ImageToVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Still-image video with the audio track"),
        (status = 400, description = "Invalid upload", body = ErrorResponse),
        (status = 500, description = "Media processing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "image-to-video"))]
pub async fn image_to_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    handle(&state, OperationKind::ImageToVideo, multipart).await
}
