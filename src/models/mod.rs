use chrono::{DateTime, Utc};
use std::path::PathBuf;
use uuid::Uuid;

/// Metadata for one stored file. Created on upload, destroyed by the
/// cleanup sweeper (or orphaned on process exit, which is acceptable).
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub id: Uuid,
    pub original_filename: String,
    pub content_type: Option<String>,
    pub stored_path: PathBuf,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UploadRecord {
    /// A record is logically dead once its expiry has passed, even if the
    /// sweeper has not physically removed it yet.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
