//! Asset upload with per-file failure isolation.

use crate::config::RepoSlug;
use crate::error::Error;
use crate::host::{AssetUpload, ReleaseHost, UploadedAsset};
use crate::matcher::MatchedFile;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// An upload that did not go through.
#[derive(Debug)]
pub struct UploadFailure {
    /// Asset display name
    pub name: String,
    /// Local path of the file
    pub path: PathBuf,
    /// What went wrong
    pub error: Error,
}

/// Outcome of uploading every matched file.
///
/// Successes and failures are both kept in matched-file order, and together
/// account for every file.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// Assets that were uploaded
    pub uploaded: Vec<UploadedAsset>,
    /// Files that failed to upload
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    /// Number of files attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.uploaded.len() + self.failures.len()
    }
}

/// Uploads each file to the release, one at a time.
///
/// A failing file is logged as a warning and skipped; it never stops the
/// remaining uploads.
pub async fn upload_assets(
    host: &dyn ReleaseHost,
    repo: &RepoSlug,
    release_id: u64,
    files: &[MatchedFile],
) -> UploadReport {
    let mut report = UploadReport::default();

    for file in files {
        info!(path = %file.path.display(), "Uploading asset");

        match upload_one(host, repo, release_id, file).await {
            Ok(asset) => {
                info!(name = %file.name, "Successfully uploaded asset");
                report.uploaded.push(asset);
            }
            Err(e) => {
                let error = Error::asset_upload(&file.name, error_message(&e));
                warn!("{error}");
                report.failures.push(UploadFailure {
                    name: file.name.clone(),
                    path: file.path.clone(),
                    error,
                });
            }
        }
    }

    info!(
        uploaded = report.uploaded.len(),
        failed = report.failures.len(),
        "Asset upload complete"
    );

    report
}

async fn upload_one(
    host: &dyn ReleaseHost,
    repo: &RepoSlug,
    release_id: u64,
    file: &MatchedFile,
) -> Result<UploadedAsset, Error> {
    let content = tokio::fs::read(&file.path).await?;
    let upload = AssetUpload::new(release_id, &file.name, content);

    debug!(
        name = %upload.name,
        size = upload.size,
        content_type = upload.content_type,
        release_id,
        "Sending asset"
    );

    host.upload_asset(repo, upload).await
}

/// Message of the underlying failure, without the wrapper prefix.
fn error_message(err: &Error) -> String {
    match err {
        Error::AssetUpload { message, .. } | Error::Backend { message, .. } => message.clone(),
        Error::Io(io) => io.to_string(),
        other => other.to_string(),
    }
}
