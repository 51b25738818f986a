use relay_core::{PullFile, RelayError};

const USER_AGENT: &str = "review-relay";

/// GitHub Pull Request client for fetching file diffs and posting comments.
///
/// Both calls authenticate with `Authorization: token <value>` against an
/// environment-configured API base URL, so GitHub Enterprise hosts work the
/// same as github.com.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    repository: String,
    token: String,
}

impl GithubClient {
    /// Create a client for one repository.
    ///
    /// A trailing slash on `base_url` is tolerated.
    pub fn new(base_url: &str, repository: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            token: token.to_string(),
        }
    }

    /// Fetch the changed-files listing for a pull request.
    ///
    /// Entries come back in API response order; no re-sorting happens here
    /// or downstream.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Github`] on transport failures, on any non-2xx
    /// status (with status and body in the message), or if the body is not
    /// a file listing.
    pub async fn list_pull_files(&self, pull_number: u64) -> Result<Vec<PullFile>, RelayError> {
        let url = format!(
            "{}/repos/{}/pulls/{}/files",
            self.base_url, self.repository, pull_number
        );

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| RelayError::Github(format!("failed to fetch PR files: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Github(format!(
                "GitHub API error {status}: {body}"
            )));
        }

        response
            .json::<Vec<PullFile>>()
            .await
            .map_err(|e| RelayError::Github(format!("failed to parse PR files response: {e}")))
    }

    /// Post a comment on the pull request's issue thread.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Github`] on transport failures or any non-2xx
    /// status.
    pub async fn post_issue_comment(&self, pull_number: u64, body: &str) -> Result<(), RelayError> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.base_url, self.repository, pull_number
        );
        let payload = serde_json::json!({ "body": body });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("User-Agent", USER_AGENT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::Github(format!("failed to post comment: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Github(format!(
                "GitHub API error {status}: {body}"
            )));
        }

        Ok(())
    }
}

/// Extract the pull-request number from a `refs/pull/<N>/merge` ref.
///
/// A ref of any other shape (push refs, tag refs, a non-numeric segment) is
/// rejected rather than yielding a nonsensical identifier.
///
/// # Errors
///
/// Returns [`RelayError::Config`] if the ref is not a pull-request ref.
///
/// # Examples
///
/// ```
/// use relay_review::github::parse_pull_ref;
///
/// assert_eq!(parse_pull_ref("refs/pull/42/merge").unwrap(), 42);
/// assert!(parse_pull_ref("refs/heads/main").is_err());
/// ```
pub fn parse_pull_ref(git_ref: &str) -> Result<u64, RelayError> {
    let mut segments = git_ref.split('/');
    let (Some("refs"), Some("pull"), Some(number)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return Err(RelayError::Config(format!(
            "ref '{git_ref}' is not a pull request ref (expected refs/pull/<number>/merge)"
        )));
    };

    number.parse().map_err(|_| {
        RelayError::Config(format!("invalid pull request number in ref '{git_ref}'"))
    })
}
