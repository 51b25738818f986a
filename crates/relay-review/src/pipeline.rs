use relay_core::{PullFile, RelayConfig, RelayError};
use serde::Serialize;

use crate::claude::ClaudeClient;
use crate::github::{self, GithubClient};
use crate::prompt;

/// Summary of a completed relay run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayOutcome {
    /// Pull request the review was posted on.
    pub pull_number: u64,
    /// Number of entries in the files listing.
    pub files_listed: usize,
    /// Entries that carried a non-empty patch and went into the prompt.
    pub files_with_patch: usize,
    /// Length of the posted review text, in characters.
    pub review_chars: usize,
    /// Model identifier used for the review.
    pub model_used: String,
}

/// Orchestrator that drives the relay end to end.
///
/// Fetches the pull request's file diffs, generates a review via the model
/// API, and posts the result back as a comment. Strictly sequential: each
/// step must succeed before the next begins, and any failure aborts the
/// run.
pub struct ReviewRelay {
    github: GithubClient,
    claude: ClaudeClient,
    pull_number: u64,
}

impl ReviewRelay {
    /// Create a relay from explicit clients and a pull-request number.
    pub fn new(github: GithubClient, claude: ClaudeClient, pull_number: u64) -> Self {
        Self {
            github,
            claude,
            pull_number,
        }
    }

    /// Create a relay from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] if `GITHUB_REF` is not a pull-request
    /// ref.
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let pull_number = github::parse_pull_ref(&config.github_ref)?;
        Ok(Self::new(
            GithubClient::new(
                &config.github_api_url,
                &config.repository,
                &config.github_token,
            ),
            ClaudeClient::new(config.claude_api_key.clone()),
            pull_number,
        ))
    }

    /// Pull request this relay targets.
    pub fn pull_number(&self) -> u64 {
        self.pull_number
    }

    /// Step 1: fetch the changed-files listing.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Github`] on any HTTP failure.
    pub async fn fetch_files(&self) -> Result<Vec<PullFile>, RelayError> {
        self.github.list_pull_files(self.pull_number).await
    }

    /// Step 2: build the prompt from the listing and request a review.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Llm`] on any HTTP failure.
    pub async fn generate_review(&self, files: &[PullFile]) -> Result<String, RelayError> {
        let diff_text = prompt::build_diff_text(files);
        self.claude
            .request_review(&prompt::build_review_prompt(&diff_text))
            .await
    }

    /// Step 3: post the review text as an issue comment.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Github`] on any HTTP failure.
    pub async fn publish_review(&self, review: &str) -> Result<(), RelayError> {
        self.github
            .post_issue_comment(self.pull_number, review)
            .await
    }

    /// Run all steps in order and return a run summary.
    ///
    /// # Errors
    ///
    /// Propagates the first step failure; later steps never run after an
    /// earlier one fails.
    pub async fn run(&self) -> Result<RelayOutcome, RelayError> {
        let files = self.fetch_files().await?;
        let review = self.generate_review(&files).await?;
        self.publish_review(&review).await?;

        Ok(RelayOutcome {
            pull_number: self.pull_number,
            files_listed: files.len(),
            files_with_patch: files
                .iter()
                .filter(|f| f.patch.as_deref().is_some_and(|p| !p.is_empty()))
                .count(),
            review_chars: review.chars().count(),
            model_used: self.claude.model().to_string(),
        })
    }
}
