use crate::error::AppError;
use crate::models::UploadRecord;
use crate::services::storage::SaveError;
use crate::utils::validation::validate_filename;
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use futures::TryStreamExt;
use serde::Serialize;
use tokio_util::io::{ReaderStream, StreamReader};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub file_id: String,
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
    pub original_filename: String,
    pub file_size: u64,
}

#[utoipa::path(
    post,
    path = "/upload",
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "No file supplied or file type not allowed"),
        (status = 413, description = "File too large")
    ),
    tag = "files"
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;
        let content_type = field.content_type().map(|s| s.to_string());

        validate_filename(&original_filename)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let id = Uuid::new_v4();

        // Stream the field straight to disk; the size cap is enforced by
        // the storage service as bytes arrive.
        let body_with_io_error =
            field.map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err));
        let reader = StreamReader::new(body_with_io_error);

        let saved = state.storage.save(&id, reader).await.map_err(|e| match e {
            SaveError::TooLarge(limit) => AppError::PayloadTooLarge(format!(
                "File too large. Maximum size is {} MB",
                limit / (1024 * 1024)
            )),
            SaveError::Io(e) => {
                tracing::error!("Failed to persist upload {}: {}", id, e);
                AppError::Storage(e)
            }
        })?;

        let created_at = Utc::now();
        let expires_at = created_at + Duration::seconds(state.config.retention.as_secs() as i64);

        state.store.insert(UploadRecord {
            id,
            original_filename: original_filename.clone(),
            content_type,
            stored_path: saved.stored_path,
            size: saved.size,
            created_at,
            expires_at,
        });

        tracing::info!(
            "📦 Stored {} as {} ({} bytes, expires {})",
            original_filename,
            id,
            saved.size,
            expires_at
        );

        return Ok(Json(UploadResponse {
            file_id: id.to_string(),
            download_url: format!("/download/{id}"),
            expires_at,
            original_filename,
            file_size: saved.size,
        }));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}

#[utoipa::path(
    get,
    path = "/download/{file_id}",
    params(
        ("file_id" = String, Path, description = "File ID returned by the upload endpoint")
    ),
    responses(
        (status = 200, description = "File download stream"),
        (status = 404, description = "File not found or has expired")
    ),
    tag = "files"
)]
pub async fn download_file(
    State(state): State<crate::AppState>,
    Path(file_id): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound("File not found or has expired".to_string());

    let id = Uuid::parse_str(&file_id).map_err(|_| not_found())?;
    let record = state.store.get(&id).ok_or_else(not_found)?;

    // Expiry is checked at read time: a record past its expiry is treated
    // as gone even if the sweeper has not physically removed it yet.
    if record.is_expired() {
        return Err(not_found());
    }

    let file = match state.storage.open(&record.stored_path).await {
        Ok(file) => file,
        // The sweeper may have deleted the file between our metadata read
        // and here; that is a plain 404, not a server error.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => {
            tracing::error!("Failed to open stored file {}: {}", id, e);
            return Err(AppError::Storage(e));
        }
    };

    let body = Body::from_stream(ReaderStream::new(file));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            record
                .content_type
                .as_deref()
                .unwrap_or("application/octet-stream"),
        )
        .header(header::CONTENT_LENGTH, record.size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", record.original_filename),
        )
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(response)
}
