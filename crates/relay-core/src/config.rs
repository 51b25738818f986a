use crate::error::RelayError;

/// Runtime configuration assembled from the process environment.
///
/// Read once at start-up and immutable afterwards. The four GitHub values
/// are required; the Claude credential is optional and, when absent, the
/// model request is sent without its auth header.
///
/// # Examples
///
/// ```
/// use relay_core::RelayConfig;
///
/// let config = RelayConfig::from_lookup(|key| match key {
///     "GITHUB_API_URL" => Some("https://api.github.com".into()),
///     "GITHUB_REPOSITORY" => Some("octocat/hello-world".into()),
///     "GITHUB_REF" => Some("refs/pull/42/merge".into()),
///     "GITHUB_TOKEN" => Some("ghp_xxxx".into()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(config.repository, "octocat/hello-world");
/// assert!(config.claude_api_key.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Hosting API base URL (`GITHUB_API_URL`).
    pub github_api_url: String,
    /// `<owner>/<repo>` identifier (`GITHUB_REPOSITORY`).
    pub repository: String,
    /// Ref string of the form `refs/pull/<N>/merge` (`GITHUB_REF`).
    pub github_ref: String,
    /// Credential for the hosting API (`GITHUB_TOKEN`).
    pub github_token: String,
    /// Credential for the model API (`CLAUDE_API_KEY`), if configured.
    pub claude_api_key: Option<String>,
}

impl RelayConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] naming the first required variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests supply a closure over fixed values
    /// instead of mutating the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] naming the first required key for
    /// which `lookup` yields nothing (or an empty string).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            github_api_url: required(&lookup, "GITHUB_API_URL")?,
            repository: required(&lookup, "GITHUB_REPOSITORY")?,
            github_ref: required(&lookup, "GITHUB_REF")?,
            github_token: required(&lookup, "GITHUB_TOKEN")?,
            claude_api_key: lookup("CLAUDE_API_KEY").filter(|value| !value.is_empty()),
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, RelayError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RelayError::Config(format!("{key} is not set"))),
    }
}
