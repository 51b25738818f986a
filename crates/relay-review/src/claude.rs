use relay_core::RelayError;
use serde_json::Value;

/// Production endpoint for the Anthropic Messages API.
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Pinned review model and sampling parameters.
pub const REVIEW_MODEL: &str = "claude-3-opus-20240229";
const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f64 = 0.3;

const FALLBACK_REVIEW: &str = "No feedback from Claude.";

/// Anthropic Messages API client.
///
/// The API key is optional; when absent the request is sent without the
/// `x-api-key` header and the API's rejection surfaces as an ordinary
/// upstream HTTP error.
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl ClaudeClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, ANTHROPIC_API_URL)
    }

    /// Create a client against a custom Messages endpoint. Used by tests.
    pub fn with_endpoint(api_key: Option<String>, endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: endpoint.to_string(),
        }
    }

    /// Return the pinned model identifier.
    pub fn model(&self) -> &str {
        REVIEW_MODEL
    }

    /// Send the review prompt and return the extracted review text.
    ///
    /// The request carries the pinned model, output limit, and temperature
    /// as a single user message. The response text is extracted with
    /// [`extract_review_text`].
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Llm`] on transport failures, on any non-2xx
    /// status (with status and body in the message), or if the body is not
    /// JSON.
    pub async fn request_review(&self, prompt: &str) -> Result<String, RelayError> {
        let body = serde_json::json!({
            "model": REVIEW_MODEL,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        });

        let mut request = self
            .http
            .post(&self.endpoint)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json");
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(RelayError::Llm(format!(
                "Claude API error {status}: {body_text}"
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| RelayError::Llm(format!("failed to parse response: {e}")))?;

        Ok(extract_review_text(&response_body))
    }
}

/// Extract plain review text from a Messages API response body.
///
/// Two response shapes are tolerated: the current one, where `content` is a
/// list of typed blocks whose `text`-typed entries are concatenated in list
/// order, and an older one carrying a flat `completion` string. When
/// neither yields anything, the whole body is stringified so the posted
/// comment at least shows what came back. An empty or whitespace-only
/// result becomes a fixed placeholder.
///
/// # Examples
///
/// ```
/// use relay_review::claude::extract_review_text;
/// use serde_json::json;
///
/// let body = json!({"content": [
///     {"type": "text", "text": "A"},
///     {"type": "text", "text": "B"},
/// ]});
/// assert_eq!(extract_review_text(&body), "AB");
///
/// let empty = json!({"content": [{"type": "text", "text": "  "}]});
/// assert_eq!(extract_review_text(&empty), "No feedback from Claude.");
/// ```
pub fn extract_review_text(body: &Value) -> String {
    let text = match body.get("content").and_then(Value::as_array) {
        Some(blocks) if !blocks.is_empty() => blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect::<String>(),
        _ => body
            .get("completion")
            .and_then(Value::as_str)
            .filter(|completion| !completion.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
    };

    if text.trim().is_empty() {
        FALLBACK_REVIEW.to_string()
    } else {
        text
    }
}
