//! Output streaming
//!
//! The request scope rides inside the body stream: the temp files are removed
//! when the body is dropped, after the last chunk is sent or when the client
//! goes away.

use std::path::Path;

use axum::{
    body::Body,
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
        StatusCode,
    },
    response::Response,
};
use ffstudio_core::{AppError, MediaCategory, OperationKind};
use ffstudio_processing::RequestScope;
use futures::StreamExt;
use tokio_util::io::ReaderStream;

pub async fn stream_output(
    scope: RequestScope,
    output: &Path,
    kind: OperationKind,
    extension: &str,
) -> Result<Response, AppError> {
    let file = tokio::fs::File::open(output).await?;
    let length = file.metadata().await?.len();

    let stream = ReaderStream::new(file).map(move |chunk| {
        let _owned = &scope;
        chunk
    });

    let filename = kind.download_filename(extension);

    Response::builder()
        .status(StatusCode::OK)
        .header(
            CONTENT_TYPE,
            MediaCategory::content_type_for_extension(extension),
        )
        .header(CONTENT_LENGTH, length)
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}
