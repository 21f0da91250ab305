//! OpenAI-compatible chat-completions client.
//!
//! One blocking POST per generation call; the sync engine invokes it at most
//! once per classification branch. Failures map onto [`GenerateError`] and
//! never produce partial document content.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use chronicle_core::{
    DocumentGenerator, GenerateError, GenerationContext, CHANGELOG_HEADER,
};

use crate::prompt::{PromptEngine, COMMIT_SYSTEM, README_SYSTEM};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Sampling temperature for all calls.
const TEMPERATURE: f64 = 0.2;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

// ---------------------------------------------------------------------------
// ChatClient
// ---------------------------------------------------------------------------

/// Chat-completions client over `ureq`.
pub struct ChatClient {
    agent: ureq::Agent,
    api_key: String,
    api_url: String,
    model: String,
    prompts: PromptEngine,
}

impl ChatClient {
    /// Construct a client for `api_url` using `model`.
    pub fn new(api_key: String, api_url: String, model: String) -> Result<Self, GenerateError> {
        Ok(ChatClient {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            api_key,
            api_url,
            model,
            prompts: PromptEngine::new()?,
        })
    }

    /// Ask for a Conventional Commit message describing `diff`.
    ///
    /// The returned text is raw model output; callers sanitize it before use.
    pub fn commit_message(&self, diff: &str) -> Result<String, GenerateError> {
        let prompt = self.prompts.commit(diff)?;
        self.complete(COMMIT_SYSTEM, &prompt)
    }

    fn complete(&self, system: &str, user: &str) -> Result<String, GenerateError> {
        let body = json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        log::debug!("POST {} (model {})", self.api_url, self.model);
        let response = self
            .agent
            .post(&self.api_url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body);

        match response {
            Ok(resp) => {
                let parsed: ChatResponse = resp
                    .into_json()
                    .map_err(|e| GenerateError::Request(e.to_string()))?;
                let content = parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .unwrap_or_default();
                let content = content.trim();
                if content.is_empty() {
                    return Err(GenerateError::EmptyResponse);
                }
                Ok(content.to_string())
            }
            Err(ureq::Error::Status(status, resp)) => {
                let message = resp.into_string().unwrap_or_default();
                Err(GenerateError::Api { status, message })
            }
            Err(err) => Err(GenerateError::Request(err.to_string())),
        }
    }
}

impl DocumentGenerator for ChatClient {
    fn draft(&self, ctx: &GenerationContext) -> Result<String, GenerateError> {
        let prompt = self.prompts.readme(ctx)?;
        let text = self.complete(README_SYSTEM, &prompt)?;
        Ok(ensure_changelog_header(&text))
    }

    fn revise(&self, ctx: &GenerationContext, current: &str) -> Result<String, GenerateError> {
        let prompt = self.prompts.revise(ctx, current)?;
        let text = self.complete(README_SYSTEM, &prompt)?;
        Ok(ensure_changelog_header(&text))
    }
}

/// Model output is untrusted: guarantee the changelog section exists so the
/// inserter always has its anchor.
fn ensure_changelog_header(text: &str) -> String {
    let has_header = text.lines().any(|line| line.trim() == CHANGELOG_HEADER);
    if has_header {
        text.to_string()
    } else {
        format!(
            "{}\n\n{}\n- _Initial placeholder_\n",
            text.trim_end(),
            CHANGELOG_HEADER
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
