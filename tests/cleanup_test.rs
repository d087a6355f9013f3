use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tempfile::TempDir;
use tempshare::config::AppConfig;
use tempshare::models::UploadRecord;
use tempshare::services::metadata::MetadataStore;
use tempshare::services::storage::StorageService;
use tempshare::services::worker::sweep;
use tempshare::{AppState, create_app};
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_app(dir: &TempDir) -> (AppState, Router) {
    let config = AppConfig {
        upload_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let storage = Arc::new(
        StorageService::create(&config.upload_dir, config.max_file_size)
            .await
            .unwrap(),
    );
    let state = AppState {
        store: Arc::new(MetadataStore::new()),
        storage,
        config,
    };
    (state.clone(), create_app(state))
}

async fn seed_record(state: &AppState, expires_in: Duration) -> Uuid {
    let id = Uuid::new_v4();
    let saved = state.storage.save(&id, &b"contents"[..]).await.unwrap();
    let now = Utc::now();
    state.store.insert(UploadRecord {
        id,
        original_filename: "seeded.txt".to_string(),
        content_type: Some("text/plain".to_string()),
        stored_path: saved.stored_path,
        size: saved.size,
        created_at: now,
        expires_at: now + expires_in,
    });
    id
}

#[tokio::test]
async fn test_sweep_purges_expired_upload_end_to_end() {
    let dir = TempDir::new().unwrap();
    let (state, app) = setup_app(&dir).await;

    let expired = seed_record(&state, Duration::minutes(-1)).await;
    let live = seed_record(&state, Duration::minutes(60)).await;

    let removed = sweep(&state.store, &state.storage).await;
    assert_eq!(removed, 1);

    // Expired: gone from disk and from the store
    assert!(!state.storage.path_for(&expired).exists());
    assert!(state.store.get(&expired).is_none());

    // Live upload untouched and still downloadable
    assert!(state.storage.path_for(&live).exists());
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/download/{live}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_second_sweep_with_no_new_uploads_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let (state, _app) = setup_app(&dir).await;

    seed_record(&state, Duration::minutes(-1)).await;
    seed_record(&state, Duration::minutes(-2)).await;

    assert_eq!(sweep(&state.store, &state.storage).await, 2);
    assert_eq!(sweep(&state.store, &state.storage).await, 0);
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn test_sweep_continues_past_missing_files() {
    let dir = TempDir::new().unwrap();
    let (state, _app) = setup_app(&dir).await;

    let a = seed_record(&state, Duration::minutes(-1)).await;
    let b = seed_record(&state, Duration::minutes(-1)).await;

    // One backing file vanished out from under the store
    state.storage.delete(&state.storage.path_for(&a)).await.unwrap();

    assert_eq!(sweep(&state.store, &state.storage).await, 2);
    assert!(state.store.get(&a).is_none());
    assert!(state.store.get(&b).is_none());
}
