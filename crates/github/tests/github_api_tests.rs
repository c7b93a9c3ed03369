//! Request-level tests for the GitHub client against a local mock server.

use serde_json::json;
use tagship_github::GitHubClient;
use tagship_release::config::RepoSlug;
use tagship_release::error::Error;
use tagship_release::host::{AssetUpload, ContentStore, NewRelease, ReleaseHost};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new("ghp_test", Some(&server.uri())).unwrap()
}

fn server_error() -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" }))
}

fn new_release() -> NewRelease {
    NewRelease {
        tag: "v1.0.0".to_string(),
        name: "v1.0.0".to_string(),
        body: String::new(),
        draft: false,
        prerelease: false,
    }
}

fn file_entry(path: &str, sha: &str) -> serde_json::Value {
    let name = path.rsplit('/').next().unwrap_or(path);
    json!({
        "name": name,
        "path": path,
        "sha": sha,
        "size": 42,
        "url": format!("https://api.github.com/repos/o/t/contents/{path}"),
        "type": "file",
        "_links": {
            "self": format!("https://api.github.com/repos/o/t/contents/{path}"),
            "git": null,
            "html": null
        }
    })
}

#[tokio::test]
async fn create_release_is_sent_once_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/releases"))
        .respond_with(server_error())
        .expect(1)
        .mount(&server)
        .await;

    let repo = RepoSlug::new("o", "r");
    let err = client(&server)
        .create_release(&repo, &new_release())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Server Error"));
    server.verify().await;
}

#[tokio::test]
async fn release_lookup_is_sent_once_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases/tags/v1.0.0"))
        .respond_with(server_error())
        .expect(1)
        .mount(&server)
        .await;

    let repo = RepoSlug::new("o", "r");
    let result = client(&server).get_release_by_tag(&repo, "v1.0.0").await;

    assert!(result.is_err());
    server.verify().await;
}

#[tokio::test]
async fn asset_upload_is_attempted_once_on_server_error() {
    let server = MockServer::start().await;
    // The upload URL comes from the release, so the release is fetched first.
    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases/7"))
        .respond_with(server_error())
        .expect(1)
        .mount(&server)
        .await;

    let repo = RepoSlug::new("o", "r");
    let upload = AssetUpload::new(7, "app.tar.gz", b"bytes".to_vec());
    let result = client(&server).upload_asset(&repo, upload).await;

    assert!(result.is_err());
    server.verify().await;
}

#[tokio::test]
async fn api_errors_carry_message_and_documentation_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/releases"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/rest/releases/releases#create-a-release"
        })))
        .mount(&server)
        .await;

    let repo = RepoSlug::new("o", "r");
    let err = client(&server)
        .create_release(&repo, &new_release())
        .await
        .unwrap_err();

    match err {
        Error::Backend {
            backend,
            message,
            help,
        } => {
            assert_eq!(backend, "github");
            assert_eq!(message, "Validation Failed");
            assert_eq!(
                help.as_deref(),
                Some("See https://docs.github.com/rest/releases/releases#create-a-release")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn get_file_returns_sha_of_the_requested_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/t/contents/Formula/app.rb"))
        .and(query_param("ref", "main"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(file_entry("Formula/app.rb", "abc123")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let repo = RepoSlug::new("o", "t");
    let file = client(&server)
        .get_file(&repo, "Formula/app.rb", "main")
        .await
        .unwrap();

    assert_eq!(file.sha, "abc123");
}

#[tokio::test]
async fn get_file_rejects_a_directory_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/t/contents/Formula"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            file_entry("Formula/app.rb", "abc123"),
            file_entry("Formula/tool.rb", "def456"),
        ])))
        .mount(&server)
        .await;

    let repo = RepoSlug::new("o", "t");
    let err = client(&server)
        .get_file(&repo, "Formula", "main")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Formula is not a file on main"));
}

#[tokio::test]
async fn get_file_maps_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/t/contents/Formula/new.rb"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let repo = RepoSlug::new("o", "t");
    let err = client(&server)
        .get_file(&repo, "Formula/new.rb", "main")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Backend { ref message, .. } if message == "Not Found"));
}
