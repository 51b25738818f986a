/// Errors that can occur while relaying a pull request review.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate renders it through `miette` at the boundary.
///
/// # Examples
///
/// ```
/// use relay_core::RelayError;
///
/// let err = RelayError::Config("GITHUB_TOKEN is not set".into());
/// assert!(err.to_string().contains("GITHUB_TOKEN"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum RelayError {
    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API request or response failure.
    #[error("GitHub API error: {0}")]
    Github(String),

    /// Claude API request or response failure.
    #[error("Claude API error: {0}")]
    Llm(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
