//! The external model-provider seam. The provider is trusted to surface
//! transport and auth failures, but never trusted about the shape of the
//! text it returns; that is the parser's problem.

use std::fmt;

use async_trait::async_trait;
use nl_core::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "sonar-pro";
pub const TRENDING_MODEL: &str = "sonar";
const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// Where the API credential for a request comes from. Resolved by the
/// boundary layer; the admin path uses the server-configured key, the
/// guest path a caller-supplied one.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    Admin,
    Guest(String),
}

/// One chat-style search call. Domain and recency filters are
/// Perplexity-specific hints and may be left empty.
#[derive(Debug, Clone)]
pub struct ChatQuery {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub search_domain_filter: Vec<String>,
    pub search_recency_filter: Option<String>,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Issue the call and return the raw response text.
    async fn search(&self, query: ChatQuery) -> Result<String>;
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    search_domain_filter: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_recency_filter: Option<String>,
    return_citations: bool,
    return_related_questions: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Perplexity-backed provider. Constructed per request from an explicit
/// credential; there is no process-wide client.
pub struct PerplexityProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PerplexityProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: PERPLEXITY_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for PerplexityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerplexityProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn has_credential_marker(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("unauthorized") || lower.contains("invalid api key")
}

#[async_trait]
impl SearchProvider for PerplexityProvider {
    fn name(&self) -> &str {
        "Perplexity"
    }

    async fn search(&self, query: ChatQuery) -> Result<String> {
        let request = ChatRequest {
            model: query.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: query.system_prompt,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: query.user_prompt,
                },
            ],
            temperature: query.temperature,
            max_tokens: query.max_tokens,
            search_domain_filter: query.search_domain_filter,
            search_recency_filter: query.search_recency_filter,
            return_citations: false,
            return_related_questions: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED || has_credential_marker(&body) {
                return Err(Error::Credential(format!(
                    "provider rejected the API key ({status})"
                )));
            }
            return Err(Error::Provider(format!(
                "provider returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}

/// Scripted reply for the canned provider.
#[derive(Debug, Clone)]
pub enum CannedReply {
    Text(String),
    ProviderError(String),
    CredentialError(String),
}

/// Test double in place of the real provider: replies are routed by a
/// substring of the user prompt, so the two bias groups of one comparison
/// can be scripted independently.
pub struct CannedProvider {
    routes: Vec<(String, CannedReply)>,
    fallback: CannedReply,
}

impl CannedProvider {
    pub fn replying(fallback: CannedReply) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    pub fn route(mut self, needle: &str, reply: CannedReply) -> Self {
        self.routes.push((needle.to_string(), reply));
        self
    }
}

#[async_trait]
impl SearchProvider for CannedProvider {
    fn name(&self) -> &str {
        "Canned"
    }

    async fn search(&self, query: ChatQuery) -> Result<String> {
        let reply = self
            .routes
            .iter()
            .find(|(needle, _)| query.user_prompt.contains(needle))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.fallback);
        match reply {
            CannedReply::Text(text) => Ok(text.clone()),
            CannedReply::ProviderError(message) => Err(Error::Provider(message.clone())),
            CannedReply::CredentialError(message) => Err(Error::Credential(message.clone())),
        }
    }
}
