pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::metadata::MetadataStore;
use crate::services::storage::StorageService;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::files::upload_file,
        handlers::files::download_file,
        handlers::info::service_info,
    ),
    components(
        schemas(
            handlers::files::UploadResponse,
            handlers::info::ServiceInfo,
        )
    ),
    tags(
        (name = "files", description = "Upload and download endpoints"),
        (name = "system", description = "Service metadata")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MetadataStore>,
    pub storage: Arc<StorageService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::info::service_info))
        .route("/upload", post(handlers::files::upload_file))
        .route("/download/:file_id", get(handlers::files::download_file))
        .with_state(state)
}
