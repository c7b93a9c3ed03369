//! Authenticated GitHub API client.

use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use tagship_release::error::{Error, Result};

/// GitHub REST client shared by the release and contents operations.
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) octocrab: Octocrab,
}

impl GitHubClient {
    /// Creates a client authenticated with a personal or workflow token.
    ///
    /// `api_url` points the client at a GitHub Enterprise Server instance;
    /// `None` uses api.github.com. Every request is sent exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty, the API URL is malformed or
    /// the HTTP client cannot be built.
    pub fn new(token: impl Into<String>, api_url: Option<&str>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::backend(
                "github",
                "An empty token cannot authenticate",
                Some("Pass --token or set GITHUB_TOKEN".to_string()),
            ));
        }

        let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
        if let Some(url) = api_url {
            builder = builder.base_uri(url).map_err(|_| {
                Error::validation(
                    format!("Invalid API URL '{url}'"),
                    "Pass --api-url https://host/api/v3 or unset GITHUB_API_URL",
                )
            })?;
        }

        let octocrab = builder.personal_token(token).build().map_err(api_error)?;

        Ok(Self { octocrab })
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}

/// Maps an octocrab error to a backend error, preferring the API message.
pub(crate) fn api_error(e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let help = source
                .documentation_url
                .as_ref()
                .map(|url| format!("See {url}"));
            Error::backend("github", source.message, help)
        }
        other => Error::backend("github", other.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_with_token() {
        let client = GitHubClient::new("ghp_test", None).unwrap();
        assert_eq!(format!("{client:?}"), "GitHubClient { .. }");
    }

    #[tokio::test]
    async fn test_new_with_api_url() {
        assert!(GitHubClient::new("ghp_test", Some("https://ghe.example.com/api/v3")).is_ok());
    }

    #[test]
    fn test_new_rejects_blank_token() {
        let err = GitHubClient::new("   ", None).unwrap_err();
        assert!(err.to_string().contains("empty token"));
    }

    #[test]
    fn test_new_rejects_malformed_api_url() {
        let err = GitHubClient::new("ghp_test", Some("not a url")).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("Invalid API URL"));
    }
}
