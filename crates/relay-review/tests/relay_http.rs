use relay_review::claude::ClaudeClient;
use relay_review::github::GithubClient;
use relay_review::pipeline::ReviewRelay;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PULL_NUMBER: u64 = 42;
const FILES_PATH: &str = "/repos/octocat/hello-world/pulls/42/files";
const COMMENTS_PATH: &str = "/repos/octocat/hello-world/issues/42/comments";

fn relay_against(github: &MockServer, claude: &MockServer) -> ReviewRelay {
    ReviewRelay::new(
        GithubClient::new(&github.uri(), "octocat/hello-world", "ghp_xxxx"),
        ClaudeClient::with_endpoint(
            Some("sk-ant-xxxx".into()),
            &format!("{}/v1/messages", claude.uri()),
        ),
        PULL_NUMBER,
    )
}

fn files_listing() -> serde_json::Value {
    json!([
        { "filename": "src/a.rs", "status": "modified", "patch": "+a" },
        { "filename": "assets/logo.png", "status": "added" },
        { "filename": "src/b.rs", "status": "modified", "patch": "+b" },
    ])
}

#[tokio::test]
async fn relays_review_from_diff_to_comment() {
    let github = MockServer::start().await;
    let claude = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(header("Authorization", "token ghp_xxxx"))
        .and(header("User-Agent", "review-relay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(files_listing()))
        .expect(1)
        .mount(&github)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-xxxx"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-3-opus-20240229",
            "max_tokens": 1000,
            "temperature": 0.3,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                { "type": "text", "text": "Looks " },
                { "type": "text", "text": "good." },
            ]
        })))
        .expect(1)
        .mount(&claude)
        .await;

    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .and(header("Authorization", "token ghp_xxxx"))
        .and(body_json(json!({ "body": "Looks good." })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&github)
        .await;

    let relay = relay_against(&github, &claude);
    let outcome = relay.run().await.unwrap();

    assert_eq!(outcome.pull_number, PULL_NUMBER);
    assert_eq!(outcome.files_listed, 3);
    assert_eq!(outcome.files_with_patch, 2);
    assert_eq!(outcome.review_chars, "Looks good.".len());

    // The prompt must hold one delimited block per patched file, in listing
    // order, under the fixed reviewer instruction.
    let requests = claude.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let content = body["messages"][0]["content"].as_str().unwrap();
    assert!(content.starts_with("Review the following GitHub pull request diff"));
    assert!(content.ends_with("--- src/a.rs ---\n+a\n\n--- src/b.rs ---\n+b\n\n"));
    assert!(!content.contains("logo.png"));
    assert_eq!(body["messages"][0]["role"], "user");
}

#[tokio::test]
async fn failed_diff_retrieval_aborts_before_model_call() {
    let github = MockServer::start().await;
    let claude = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&github)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&claude)
        .await;

    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&github)
        .await;

    let relay = relay_against(&github, &claude);
    let err = relay.run().await.unwrap_err();

    assert!(err.to_string().contains("500"));
    assert!(claude.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_comment_posting_surfaces_after_model_call() {
    let github = MockServer::start().await;
    let claude = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(files_listing()))
        .mount(&github)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "Fine." }]
        })))
        .expect(1)
        .mount(&claude)
        .await;

    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .expect(1)
        .mount(&github)
        .await;

    let relay = relay_against(&github, &claude);
    let err = relay.run().await.unwrap_err();

    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn missing_api_key_omits_auth_header() {
    let github = MockServer::start().await;
    let claude = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(files_listing()))
        .mount(&github)
        .await;

    // The API rejects the unauthenticated call; the relay surfaces it as an
    // upstream error rather than checking the key itself.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing x-api-key"))
        .expect(1)
        .mount(&claude)
        .await;

    let relay = ReviewRelay::new(
        GithubClient::new(&github.uri(), "octocat/hello-world", "ghp_xxxx"),
        ClaudeClient::with_endpoint(None, &format!("{}/v1/messages", claude.uri())),
        PULL_NUMBER,
    );
    let err = relay.run().await.unwrap_err();

    assert!(err.to_string().contains("401"));
    let requests = claude.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("x-api-key"));
}
