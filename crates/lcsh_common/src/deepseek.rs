//! DeepSeek completion client and heading extraction
//!
//! One round trip to the DeepSeek chat API per request, then a tolerant
//! two-stage parse of the reply: strict JSON first, and only on outright
//! failure a scan for the first `{` to the last `}`. Model replies are
//! not guaranteed to be pure JSON (prose wrappers, code fences), so the
//! fallback tolerates surrounding noise without accepting garbage.

use crate::error::{HeadingError, GENERIC_REMOTE_ERROR};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-chat";
const TEMPERATURE: f32 = 0.7;

/// The single key the model must answer with.
pub const HEADINGS_KEY: &str = "Library of Congress Subject Headings";

const SYSTEM_PROMPT: &str = "You are a Library of Congress Subject Headings (LCSH) expert. \
Your task is to analyze text and suggest relevant LCSH terms. Always respond with valid JSON.";

/// Fixed instruction template with the literal input text appended.
fn build_user_prompt(text: &str) -> String {
    format!(
        "Analyze the following text and suggest the top 1-5 Library of Congress Subject Headings (LCSH) \
that best represent its content. Return ONLY a JSON object with a single key \
'Library of Congress Subject Headings' containing an array of strings. \
Example format: {{\"Library of Congress Subject Headings\": [\"Heading 1\", \"Heading 2\"]}}\n\nText: {}",
        text
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// DeepSeek chat-completion client.
///
/// No client-side timeout: the request resolves only through the remote
/// call's own success, HTTP error, or network failure.
#[derive(Clone)]
pub struct DeepSeekClient {
    http_client: reqwest::Client,
    model: String,
}

impl DeepSeekClient {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for 1-5 headings describing `text`.
    ///
    /// Exactly one network call. Returns the heading list in the order
    /// the model produced it, or a classified failure.
    pub async fn extract_headings(
        &self,
        text: &str,
        api_key: &str,
    ) -> Result<Vec<String>, HeadingError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(text),
                },
            ],
            temperature: TEMPERATURE,
            stream: false,
        };

        info!("[>]  LCSH request [{}] ({} chars of text)", self.model, text.len());

        let response = self
            .http_client
            .post(DEEPSEEK_API_URL)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("[-]  DeepSeek request failed before a response: {}", e);
                HeadingError::Transport(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("[-]  DeepSeek error {}: {}", status, body);
            return Err(HeadingError::Remote(remote_error_message(&body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|_| HeadingError::Format("Invalid response format"))?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .ok_or(HeadingError::Format("Invalid response format"))?;

        info!("[<]  LCSH response ({} chars)", content.len());

        parse_heading_content(content)
    }
}

impl Default for DeepSeekClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the server's `error.message` out of a failure body, falling back
/// to the generic message when none is present.
fn remote_error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|d| d.message)
        .unwrap_or_else(|| GENERIC_REMOTE_ERROR.to_string())
}

/// Two-stage parse of the model's reply content.
///
/// Strict JSON first; if that fails, extract the first `{` through the
/// last `}` and parse that instead. The fallback only fires on outright
/// parse failure, never speculatively. The parsed object must carry
/// [`HEADINGS_KEY`] mapped to an array; string elements are returned in
/// model order, untouched.
pub fn parse_heading_content(content: &str) -> Result<Vec<String>, HeadingError> {
    let value = match serde_json::from_str::<Value>(content) {
        Ok(v) => v,
        Err(_) => {
            let json_text = extract_json(content);
            serde_json::from_str::<Value>(&json_text)
                .map_err(|_| HeadingError::Format("Invalid response format"))?
        }
    };

    let headings = value
        .get(HEADINGS_KEY)
        .and_then(|v| v.as_array())
        .ok_or(HeadingError::Format("Response missing required heading data"))?;

    Ok(headings
        .iter()
        .filter_map(|h| h.as_str().map(|s| s.to_string()))
        .collect())
}

/// Extract JSON from text that may have prose around it.
fn extract_json(text: &str) -> String {
    if let Some(json_start) = text.find('{') {
        if let Some(json_end) = text.rfind('}') {
            if json_start < json_end {
                return text[json_start..=json_end].to_string();
            }
        }
    }
    text.to_string()
}
