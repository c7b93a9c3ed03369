//! GitHub Releases implementation of [`ReleaseHost`].

use crate::client::{GitHubClient, api_error};
use tagship_release::config::RepoSlug;
use tagship_release::host::{
    AssetUpload, HostFuture, NewRelease, Release, ReleaseHost, UploadedAsset,
};
use tracing::debug;

impl ReleaseHost for GitHubClient {
    fn get_release_by_tag<'a>(
        &'a self,
        repo: &'a RepoSlug,
        tag: &'a str,
    ) -> HostFuture<'a, Release> {
        Box::pin(async move {
            let release = self
                .octocrab
                .repos(&repo.owner, &repo.name)
                .releases()
                .get_by_tag(tag)
                .await
                .map_err(api_error)?;

            debug!(release_id = release.id.0, tag = %release.tag_name, "Fetched release");
            Ok(Release { id: release.id.0 })
        })
    }

    fn create_release<'a>(
        &'a self,
        repo: &'a RepoSlug,
        release: &'a NewRelease,
    ) -> HostFuture<'a, Release> {
        Box::pin(async move {
            let repos = self.octocrab.repos(&repo.owner, &repo.name);
            let created = repos
                .releases()
                .create(&release.tag)
                .name(&release.name)
                .body(&release.body)
                .draft(release.draft)
                .prerelease(release.prerelease)
                .send()
                .await
                .map_err(api_error)?;

            debug!(release_id = created.id.0, tag = %created.tag_name, "Created release");
            Ok(Release { id: created.id.0 })
        })
    }

    fn upload_asset<'a>(
        &'a self,
        repo: &'a RepoSlug,
        upload: AssetUpload,
    ) -> HostFuture<'a, UploadedAsset> {
        Box::pin(async move {
            debug!(
                release_id = upload.release_id,
                name = %upload.name,
                size = upload.size,
                content_type = upload.content_type,
                "Uploading asset"
            );

            // octocrab sends assets as application/octet-stream with the
            // body length as Content-Length.
            let repos = self.octocrab.repos(&repo.owner, &repo.name);
            let asset = repos
                .releases()
                .upload_asset(upload.release_id, &upload.name, upload.content)
                .send()
                .await
                .map_err(api_error)?;

            Ok(UploadedAsset {
                name: asset.name,
                browser_download_url: asset.browser_download_url.to_string(),
            })
        })
    }
}
