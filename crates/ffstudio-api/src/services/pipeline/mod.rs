//! Media operation pipeline
//!
//! upload → validate → execute → respond → cleanup, shared by every
//! operation route. All temporary paths of a request belong to one
//! [`RequestScope`]; whichever step fails, dropping the scope removes them.

pub mod intake;
pub mod response;

use axum::{extract::Multipart, response::Response};
use ffstudio_core::{AppError, OperationKind};
use ffstudio_processing::{OperationSpec, OutputPaths};

use crate::state::AppState;

pub async fn run_operation(
    state: &AppState,
    kind: OperationKind,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut scope = state.work_dir.scope();

    let form = intake::receive(&state.validator, kind, multipart, &mut scope).await?;
    let spec = OperationSpec::from_form(kind, &form.fields)?;

    let extension = kind.output_extension(form.primary_extension());
    let outputs = OutputPaths {
        output: scope.allocate(&extension),
        intermediate: kind.intermediate_extension().map(|ext| scope.allocate(ext)),
    };
    let plan = state
        .commands
        .build(&spec, &form.input_paths(), &outputs)?;

    tracing::info!(
        operation = %kind,
        steps = plan.len(),
        inputs = form.uploads.len(),
        "Executing media operation"
    );

    // The spawned task owns the scope, so a client disconnect neither kills
    // the encoder nor skips cleanup.
    let runner = state.ffmpeg.clone();
    let (scope, result) = tokio::spawn(async move {
        let result = runner.run_all(&plan).await;
        (scope, result)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Processing task failed: {}", e)))?;

    result?;

    tracing::info!(operation = %kind, "Media operation completed");

    response::stream_output(scope, &outputs.output, kind, &extension).await
}
