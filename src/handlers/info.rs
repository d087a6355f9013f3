use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub retention_minutes: i64,
    pub endpoints: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = ServiceInfo)
    ),
    tag = "system"
)]
pub async fn service_info(State(state): State<crate::AppState>) -> impl IntoResponse {
    Json(ServiceInfo {
        service: "Temporary File Share".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        retention_minutes: state.config.retention_minutes(),
        endpoints: vec![
            "POST /upload".to_string(),
            "GET /download/{file_id}".to_string(),
            "GET /".to_string(),
        ],
    })
}
