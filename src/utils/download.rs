//! Verified file downloads.

use sha2::{Digest, Sha512};
use std::path::{Path, PathBuf};

use crate::models::VersionFile;

/// Errors that can occur while downloading a file
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Request failed or answered with a non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Body did not match the published hash
    #[error("Integrity check failed: expected sha512 {expected}, got {actual}")]
    Integrity { expected: String, actual: String },

    /// File name from the API is not a plain file name
    #[error("Invalid file name: {0}")]
    InvalidFilename(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::Http(err.to_string())
    }
}

/// Check `bytes` against a hex-encoded sha512 digest
pub fn verify_sha512(bytes: &[u8], expected: &str) -> Result<(), DownloadError> {
    let actual = format!("{:x}", Sha512::digest(bytes));
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(DownloadError::Integrity {
            expected: expected.to_string(),
            actual,
        })
    }
}

/// Download `file` into `dir`, verifying its sha512 before writing.
///
/// Returns the path written. Nothing is written when verification fails.
pub async fn download_file(
    client: &reqwest::Client,
    file: &VersionFile,
    dir: &Path,
) -> Result<PathBuf, DownloadError> {
    let filename = target_filename(file)?;

    tracing::debug!(url = %file.url, %filename, "downloading file");
    let response = client.get(&file.url).send().await?;

    if !response.status().is_success() {
        return Err(DownloadError::Http(format!(
            "{} returned status {}",
            file.url,
            response.status()
        )));
    }

    let bytes = response.bytes().await?;
    verify_sha512(&bytes, &file.hashes.sha512)?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(filename);
    tokio::fs::write(&path, &bytes).await?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "file downloaded");
    Ok(path)
}

/// Name to save `file` under: its `filename`, or the last URL segment
fn target_filename(file: &VersionFile) -> Result<String, DownloadError> {
    let candidate = if file.filename.is_empty() {
        file.url
            .rsplit('/')
            .next()
            .and_then(|segment| segment.split('?').next())
            .unwrap_or_default()
            .to_string()
    } else {
        file.filename.clone()
    };

    let is_plain = Path::new(&candidate)
        .file_name()
        .map(|name| name == candidate.as_str())
        .unwrap_or(false);

    if candidate.is_empty() || !is_plain {
        return Err(DownloadError::InvalidFilename(candidate));
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::version::fixtures::file_json;

    fn file(filename: &str, url: &str) -> VersionFile {
        let mut value = file_json(true, "abc", url);
        value["filename"] = serde_json::Value::String(filename.to_string());
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_verify_sha512() {
        let expected = format!("{:x}", Sha512::digest(b"hello"));
        assert!(verify_sha512(b"hello", &expected).is_ok());
        assert!(verify_sha512(b"hello", &expected.to_uppercase()).is_ok());

        let err = verify_sha512(b"hullo", &expected).unwrap_err();
        assert!(matches!(err, DownloadError::Integrity { .. }));
    }

    #[test]
    fn test_target_filename() {
        assert_eq!(
            target_filename(&file("mod.jar", "https://cdn.example/x/mod.jar")).unwrap(),
            "mod.jar"
        );
        assert_eq!(
            target_filename(&file("", "https://cdn.example/x/fallback.jar?sig=1")).unwrap(),
            "fallback.jar"
        );
    }

    #[test]
    fn test_target_filename_rejects_paths() {
        assert!(target_filename(&file("../evil.jar", "https://cdn.example/a.jar")).is_err());
        assert!(target_filename(&file("a/b.jar", "https://cdn.example/a.jar")).is_err());
        assert!(target_filename(&file("", "https://cdn.example/")).is_err());
    }
}
