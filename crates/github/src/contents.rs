//! Repository contents implementation of [`ContentStore`].

use crate::client::{GitHubClient, api_error};
use tagship_release::config::RepoSlug;
use tagship_release::error::Error;
use tagship_release::host::{ContentStore, FileWrite, HostFuture, RemoteFile};
use tracing::debug;

impl ContentStore for GitHubClient {
    fn get_file<'a>(
        &'a self,
        repo: &'a RepoSlug,
        path: &'a str,
        branch: &'a str,
    ) -> HostFuture<'a, RemoteFile> {
        Box::pin(async move {
            let items = self
                .octocrab
                .repos(&repo.owner, &repo.name)
                .get_content()
                .path(path)
                .r#ref(branch)
                .send()
                .await
                .map_err(api_error)?;

            // A directory listing also comes back as items; only a single
            // entry at exactly `path` is the file we asked for.
            let file = items
                .items
                .into_iter()
                .find(|item| item.path == path)
                .ok_or_else(|| {
                    Error::backend("github", format!("{path} is not a file on {branch}"), None)
                })?;

            Ok(RemoteFile { sha: file.sha })
        })
    }

    fn put_file<'a>(&'a self, repo: &'a RepoSlug, write: FileWrite) -> HostFuture<'a, ()> {
        Box::pin(async move {
            let repos = self.octocrab.repos(&repo.owner, &repo.name);

            // Content goes in as plain text; octocrab base64-encodes it.
            let result = if let Some(sha) = &write.sha {
                debug!(path = %write.path, sha = %sha, "Updating existing file");
                repos
                    .update_file(&write.path, &write.message, &write.content, sha)
                    .branch(&write.branch)
                    .send()
                    .await
            } else {
                debug!(path = %write.path, "Creating new file");
                repos
                    .create_file(&write.path, &write.message, &write.content)
                    .branch(&write.branch)
                    .send()
                    .await
            };

            result.map_err(api_error)?;
            Ok(())
        })
    }
}
