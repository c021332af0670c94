//! Writing response bodies to disk.
//!
//! Two strategies are supported, selected by [`FilePersistConfig::replace_data`]:
//!
//! - **Replace mode** buffers the whole body, splices a text fragment before
//!   or after it and appends the result to the file in one write.
//! - **Stream mode** copies body chunks into the file as they arrive.
//!
//! Both modes create the file if it is missing and append to existing
//! content. The file handle is closed on every exit path.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::clients::errors::{HttpError, PersistError};
use crate::clients::http_response::HttpResponse;
use crate::clients::requester::Requester;
use crate::clients::transport::Transport;
use crate::error::ConfigError;

/// How a response body is written to disk.
///
/// # Example
///
/// ```rust
/// use just_requester::FilePersistConfig;
///
/// // Prepend a header line to the body
/// let config = FilePersistConfig::replace("report.csv", "id,name\n", true);
/// assert!(config.replace_data);
///
/// // Copy the body as-is, without buffering
/// let config = FilePersistConfig::stream("dump.bin");
/// assert!(!config.replace_data);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePersistConfig {
    /// The target file.
    pub filepath: PathBuf,
    /// `true` for replace mode, `false` for stream mode.
    pub replace_data: bool,
    /// Text spliced around the body in replace mode. Required in that mode.
    pub custom_text: Option<String>,
    /// Write `custom_text` before the body (`true`) or after it (`false`).
    pub onset: bool,
}

impl FilePersistConfig {
    /// Replace mode with a fragment placed before (`onset`) or after the body.
    #[must_use]
    pub fn replace(filepath: impl Into<PathBuf>, custom_text: impl Into<String>, onset: bool) -> Self {
        Self {
            filepath: filepath.into(),
            replace_data: true,
            custom_text: Some(custom_text.into()),
            onset,
        }
    }

    /// Stream mode: the body is copied to the file chunk by chunk.
    #[must_use]
    pub fn stream(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            replace_data: false,
            custom_text: None,
            onset: false,
        }
    }
}

impl<T: Transport> Requester<T> {
    /// Writes the response body to the file described by `config`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingFragment`] in replace mode without
    ///   `custom_text`. Checked before the body is read.
    /// - [`HttpError::Persist`] if reading the body or any file operation
    ///   fails. The error names the operation and the path.
    pub async fn persist_response(
        &self,
        response: &mut HttpResponse,
        config: &FilePersistConfig,
    ) -> Result<(), HttpError> {
        if config.replace_data {
            let fragment = config
                .custom_text
                .as_deref()
                .ok_or(ConfigError::MissingFragment)?;
            write_spliced(response, &config.filepath, fragment, config.onset).await?;
        } else {
            copy_stream(response, &config.filepath).await?;
        }
        Ok(())
    }
}

async fn write_spliced(
    response: &mut HttpResponse,
    path: &Path,
    fragment: &str,
    onset: bool,
) -> Result<(), PersistError> {
    let body = response.read_to_end().await.map_err(PersistError::Body)?;

    let mut data = Vec::with_capacity(body.len() + fragment.len());
    if onset {
        data.extend_from_slice(fragment.as_bytes());
        data.extend_from_slice(&body);
    } else {
        data.extend_from_slice(&body);
        data.extend_from_slice(fragment.as_bytes());
    }

    let mut file = open_for_append(path).await?;
    file.write_all(&data)
        .await
        .map_err(|source| io_error("write", path, source))?;
    file.flush()
        .await
        .map_err(|source| io_error("flush", path, source))?;

    tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

async fn copy_stream(response: &mut HttpResponse, path: &Path) -> Result<(), PersistError> {
    let mut file = open_for_append(path).await?;

    let mut written: usize = 0;
    while let Some(chunk) = response.next_chunk().await {
        let chunk = chunk.map_err(PersistError::Body)?;
        file.write_all(&chunk)
            .await
            .map_err(|source| io_error("write", path, source))?;
        written += chunk.len();
    }
    file.flush()
        .await
        .map_err(|source| io_error("flush", path, source))?;

    tracing::debug!("Streamed {} bytes to {}", written, path.display());
    Ok(())
}

async fn open_for_append(path: &Path) -> Result<File, PersistError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|source| io_error("open", path, source))
}

fn io_error(operation: &'static str, path: &Path, source: std::io::Error) -> PersistError {
    PersistError::Io {
        operation,
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequesterConfig;
    use std::collections::HashMap;

    fn requester() -> Requester {
        Requester::with_config(RequesterConfig::default()).unwrap()
    }

    #[test]
    fn test_replace_constructor() {
        let config = FilePersistConfig::replace("out.txt", "PREFIX-", true);

        assert_eq!(config.filepath, PathBuf::from("out.txt"));
        assert!(config.replace_data);
        assert_eq!(config.custom_text.as_deref(), Some("PREFIX-"));
        assert!(config.onset);
    }

    #[test]
    fn test_stream_constructor_has_no_fragment() {
        let config = FilePersistConfig::stream("out.bin");

        assert!(!config.replace_data);
        assert!(config.custom_text.is_none());
    }

    #[tokio::test]
    async fn test_replace_mode_without_fragment_fails_before_reading_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let config = FilePersistConfig {
            filepath: path.clone(),
            replace_data: true,
            custom_text: None,
            onset: true,
        };
        let mut response = HttpResponse::from_bytes(200, HashMap::new(), "DATA");

        let result = requester().persist_response(&mut response, &config).await;

        assert!(matches!(
            result,
            Err(HttpError::Config(ConfigError::MissingFragment))
        ));
        assert!(!path.exists());
        assert_eq!(response.read_to_end().await.unwrap(), b"DATA");
    }

    #[tokio::test]
    async fn test_open_failure_names_operation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.txt");
        let mut response = HttpResponse::from_bytes(200, HashMap::new(), "DATA");

        let result = requester()
            .persist_response(&mut response, &FilePersistConfig::stream(&path))
            .await;

        assert!(matches!(
            result,
            Err(HttpError::Persist(PersistError::Io { operation: "open", .. }))
        ));
    }
}
