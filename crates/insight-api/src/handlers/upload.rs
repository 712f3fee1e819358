//! Upload endpoints: JSON API and dashboard form.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::{
    error::ApiError,
    services::upload::{failure_message, process_upload, read_first_file, UploadStage},
    session::MaybeUser,
    views, AppState,
};

/// `POST /api/v1/documents` (multipart, first file field).
pub async fn upload_document(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let user = current.as_ref().map(|c| &c.user);
    let file = read_first_file(&mut multipart).await?;
    let outcome = process_upload(&state, user, file, |_| {}).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// `POST /dashboard/upload`
///
/// Renders the stages reached. On success the page returns to the
/// dashboard after a short delay.
pub async fn upload_page(
    State(state): State<AppState>,
    MaybeUser(current): MaybeUser,
    mut multipart: Multipart,
) -> Response {
    let user = current.as_ref().map(|c| &c.user);
    let mut reached: Vec<UploadStage> = Vec::new();

    let result = match read_first_file(&mut multipart).await {
        Ok(file) => process_upload(&state, user, file, |stage| reached.push(stage)).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => Html(views::dashboard::upload_result(
            &reached,
            Ok(&outcome.document),
        ))
        .into_response(),
        Err(e) => {
            warn!(subsystem = "api", component = "upload", error = %e, "Upload failed");
            let message = failure_message(&e);
            let status = ApiError::from(e).status();
            (
                status,
                Html(views::dashboard::upload_result(&reached, Err(&message))),
            )
                .into_response()
        }
    }
}
