//! Trending-keyword lookup: one fixed prompt pair, the same fence/brace
//! recovery as the article parser, and a hard-coded fallback set when the
//! model's answer cannot be read. Transport errors still propagate.

use std::collections::BTreeMap;

use nl_core::{Result, TrendingKeywords};
use serde::Deserialize;

use crate::parse::{slice_braces, strip_code_fence};
use crate::provider::{ChatQuery, SearchProvider, TRENDING_MODEL};

const TRENDING_SYSTEM_PROMPT: &str = r#"You are a news trend analyst. Find the keywords currently dominating the news cycle.
Respond with JSON only, no other text.

Format:
{
  "keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"],
  "descriptions": {
    "keyword1": "short description (a few words)",
    "keyword2": "short description"
  }
}"#;

const TRENDING_USER_PROMPT: &str = "List the five biggest news keywords being covered today, \
drawn from politics, the economy, society and world news. JSON only.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTrending {
    keywords: Vec<String>,
    descriptions: BTreeMap<String, String>,
}

pub async fn fetch_trending(provider: &dyn SearchProvider) -> Result<TrendingKeywords> {
    let query = ChatQuery {
        model: TRENDING_MODEL.to_string(),
        system_prompt: TRENDING_SYSTEM_PROMPT.to_string(),
        user_prompt: TRENDING_USER_PROMPT.to_string(),
        temperature: 0.3,
        max_tokens: 1000,
        search_domain_filter: Vec::new(),
        search_recency_filter: None,
    };

    let text = provider.search(query).await?;
    let raw = parse_trending(&text).unwrap_or_else(|| {
        tracing::warn!("trending keywords could not be parsed, using fallback set");
        fallback_trending()
    });

    Ok(TrendingKeywords {
        keywords: raw.keywords,
        descriptions: raw.descriptions,
        updated_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn parse_trending(text: &str) -> Option<RawTrending> {
    let sliced = slice_braces(strip_code_fence(text));
    serde_json::from_str::<RawTrending>(sliced)
        .ok()
        .filter(|raw| !raw.keywords.is_empty())
}

fn fallback_trending() -> RawTrending {
    let pairs = [
        ("interest rates", "monetary policy"),
        ("housing market", "real estate"),
        ("AI", "artificial intelligence"),
        ("elections", "politics"),
        ("healthcare", "public health policy"),
    ];
    RawTrending {
        keywords: pairs.iter().map(|(k, _)| k.to_string()).collect(),
        descriptions: pairs
            .iter()
            .map(|(k, d)| (k.to_string(), d.to_string()))
            .collect(),
    }
}
