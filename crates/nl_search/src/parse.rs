//! Resilient conversion of raw model output into a `SearchResult`. The
//! model is told to emit JSON only, but the text that comes back may be
//! wrapped in prose, fenced as a code block, truncated mid-object, or not
//! JSON at all. The ladder here never errors: fence stripping, brace
//! slicing, strict parse, tolerant salvage, then an all-empty result.

use nl_core::{MediaBias, SearchResult};
use serde::Deserialize;

use crate::normalize::{
    clean, normalize_article, trend_fallback, RawArticle, KEYWORDS_UNVERIFIED,
};
use crate::salvage::{scan_articles, SALVAGE_CAP};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSearchResult {
    articles: Vec<RawArticle>,
    common_keywords: Vec<String>,
    overall_trend: String,
}

/// Take the interior of the first fenced code block (optionally tagged as
/// json) if one exists, otherwise the text unchanged.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };
    let mut interior = &text[open + 3..];
    if let Some(rest) = interior.strip_prefix("json") {
        interior = rest;
    }
    let Some(close) = interior.find("```") else {
        return text;
    };
    interior[..close].trim()
}

/// Slice from the first `{` to the last `}` when both exist in order,
/// recovering JSON surrounded by prose commentary.
pub(crate) fn slice_braces(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => &text[first..=last],
        _ => text,
    }
}

/// Parse raw model output into a `SearchResult`. Total: any input,
/// including empty or binary junk, yields a well-formed result. The bias
/// label comes from the call context and is never read from the payload.
pub fn parse_search_response(text: &str, bias: MediaBias, keyword: &str) -> SearchResult {
    let sliced = slice_braces(strip_code_fence(text));

    match serde_json::from_str::<RawSearchResult>(sliced) {
        Ok(raw) => {
            tracing::debug!(
                "strict parse succeeded with {} article(s) for {}",
                raw.articles.len(),
                bias
            );
            finish(raw, bias, keyword)
        }
        Err(err) => {
            tracing::debug!("strict parse failed for {} ({}), trying salvage", bias, err);
            // Salvage works on the original text: slicing may have cut
            // away a recoverable fragment.
            let candidates = scan_articles(text, SALVAGE_CAP);
            if candidates.is_empty() {
                tracing::warn!("no articles recovered from {} response", bias);
                return SearchResult::empty();
            }
            tracing::debug!("salvaged {} article(s) for {}", candidates.len(), bias);
            finish(
                RawSearchResult {
                    articles: candidates,
                    common_keywords: Vec::new(),
                    overall_trend: String::new(),
                },
                bias,
                keyword,
            )
        }
    }
}

fn finish(raw: RawSearchResult, bias: MediaBias, keyword: &str) -> SearchResult {
    let articles = raw
        .articles
        .iter()
        .map(|candidate| normalize_article(candidate, bias))
        .collect();

    let mut common_keywords = clean(&raw.common_keywords);
    if common_keywords.is_empty() {
        common_keywords = vec![KEYWORDS_UNVERIFIED.to_string()];
    }

    let overall_trend = match raw.overall_trend.trim() {
        "" => trend_fallback(bias, keyword),
        trend => trend.to_string(),
    };

    SearchResult {
        articles,
        common_keywords,
        overall_trend,
    }
}
