use std::path::Path;

/// Allowed file extensions: documents, images, audio, video, archives, code
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    // Documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf", "txt", "csv",
    "md", "html", "htm", "css",
    // Images
    "jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "tiff", "tif", "ico", "heic", "heif",
    // Audio
    "mp3", "wav", "ogg", "aac", "flac", "m4a", "weba",
    // Video
    "mp4", "mpeg", "mpg", "mov", "avi", "webm", "ogv", "mkv",
    // Archives
    "zip", "rar", "7z", "gz", "tar", "bz2",
    // Code/Development
    "json", "xml", "js", "ts", "tsx", "jsx", "py", "java", "c", "cpp", "cs", "h", "hpp", "yaml",
    "yml", "go", "rs", "rb", "php", "swift", "kt", "sh", "bash",
];

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

fn reject(message: impl Into<String>) -> ValidationError {
    ValidationError {
        message: message.into(),
    }
}

/// Checks the client-supplied filename before any bytes are written.
/// The filename is response metadata only; bytes are stored under the
/// upload id, so no path components from the client ever reach the disk.
pub fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.trim().is_empty() {
        return Err(reject("No filename provided"));
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(reject(format!("File type '.{ext}' not allowed"))),
        None => Err(reject("Files without an extension are not allowed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension_passes() {
        assert!(validate_filename("hello.txt").is_ok());
        assert!(validate_filename("photo.JPG").is_ok());
        assert!(validate_filename("archive.tar").is_ok());
    }

    #[test]
    fn test_disallowed_extension_is_rejected() {
        assert!(validate_filename("malware.exe").is_err());
        assert!(validate_filename("setup.msi").is_err());
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        assert!(validate_filename("README").is_err());
    }

    #[test]
    fn test_empty_filename_is_rejected() {
        assert!(validate_filename("").is_err());
        assert!(validate_filename("   ").is_err());
    }
}
