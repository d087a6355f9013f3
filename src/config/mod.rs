use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the file share service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How long an uploaded file stays available (default: 60 minutes)
    pub retention: Duration,

    /// Interval between cleanup sweeps (default: 1 minute)
    pub cleanup_interval: Duration,

    /// Directory where uploaded bytes live, named by file id
    pub upload_dir: PathBuf,

    /// Maximum upload size in bytes (default: 500 MB)
    pub max_file_size: usize,

    /// Listen address (default: 0.0.0.0)
    pub host: String,

    /// Listen port (default: 8000)
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(3600),
            cleanup_interval: Duration::from_secs(60),
            upload_dir: PathBuf::from("uploads"),
            max_file_size: 500 * 1024 * 1024, // 500 MB
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            retention: env::var("TEMPSHARE_RETENTION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.retention),

            cleanup_interval: env::var("TEMPSHARE_CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.cleanup_interval),

            upload_dir: env::var("TEMPSHARE_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            max_file_size: env::var("TEMPSHARE_MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            host: env::var("TEMPSHARE_HOST").unwrap_or(default.host),

            port: env::var("TEMPSHARE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),
        }
    }

    /// Retention window in whole minutes, for the service banner and
    /// expiry arithmetic
    pub fn retention_minutes(&self) -> i64 {
        (self.retention.as_secs() / 60) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.retention, Duration::from_secs(3600));
        assert_eq!(config.cleanup_interval, Duration::from_secs(60));
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_file_size, 500 * 1024 * 1024);
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_retention_minutes() {
        let config = AppConfig::default();
        assert_eq!(config.retention_minutes(), 60);
    }
}
