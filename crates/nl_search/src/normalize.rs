//! Field normalization. The single place where an `AnalyzedArticle` is
//! assembled: every required field gets a trimmed value or a fixed
//! placeholder, list fields are capped here and nowhere else.

use nl_core::{AnalyzedArticle, MediaBias};
use serde::Deserialize;

pub const TITLE_UNKNOWN: &str = "title unknown";
pub const SOURCE_UNKNOWN: &str = "source unknown";
pub const NO_KEYWORDS: &str = "no keywords";
pub const CLAIM_UNVERIFIED: &str = "claim unverified";
pub const EVIDENCE_UNVERIFIED: &str = "evidence unverified";
pub const NO_SUMMARY: &str = "no summary";
pub const KEYWORDS_UNVERIFIED: &str = "keywords unverified";

pub const MAX_KEYWORDS: usize = 5;
pub const MAX_EVIDENCE: usize = 3;

/// Partially-populated candidate article as the model reports it. Missing
/// fields deserialize to their empty defaults; the salvage scanner fills
/// the same shape by hand.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawArticle {
    pub title: String,
    pub source: String,
    pub url: String,
    pub published_date: String,
    pub keywords: Vec<String>,
    pub main_claim: String,
    pub evidence: Vec<String>,
    pub summary: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim entries and drop the ones that are empty afterwards. An array that
/// ends up empty here is treated as absent.
pub fn clean(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Total function: any candidate and any bias yield a fully-populated
/// article. The bias always comes from the call context, never from the
/// payload.
pub fn normalize_article(candidate: &RawArticle, bias: MediaBias) -> AnalyzedArticle {
    let title = non_empty(&candidate.title);
    let summary = non_empty(&candidate.summary);

    let mut keywords = clean(&candidate.keywords);
    keywords.truncate(MAX_KEYWORDS);
    if keywords.is_empty() {
        keywords = vec![NO_KEYWORDS.to_string()];
    }

    let mut evidence = clean(&candidate.evidence);
    evidence.truncate(MAX_EVIDENCE);
    if evidence.is_empty() {
        evidence = vec![EVIDENCE_UNVERIFIED.to_string()];
    }

    AnalyzedArticle {
        title: title.clone().unwrap_or_else(|| TITLE_UNKNOWN.to_string()),
        source: non_empty(&candidate.source).unwrap_or_else(|| SOURCE_UNKNOWN.to_string()),
        bias,
        url: candidate.url.trim().to_string(),
        published_date: candidate.published_date.trim().to_string(),
        keywords,
        main_claim: non_empty(&candidate.main_claim)
            .or_else(|| summary.clone())
            .unwrap_or_else(|| CLAIM_UNVERIFIED.to_string()),
        evidence,
        summary: summary
            .or(title)
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
    }
}

/// Templated trend sentence used whenever the model reports none.
pub fn trend_fallback(bias: MediaBias, keyword: &str) -> String {
    format!("{} outlet coverage of \"{}\"", bias.label(), keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_gets_every_placeholder() {
        let article = normalize_article(&RawArticle::default(), MediaBias::Progressive);
        assert_eq!(article.title, TITLE_UNKNOWN);
        assert_eq!(article.source, SOURCE_UNKNOWN);
        assert_eq!(article.bias, MediaBias::Progressive);
        assert_eq!(article.url, "");
        assert_eq!(article.published_date, "");
        assert_eq!(article.keywords, vec![NO_KEYWORDS.to_string()]);
        assert_eq!(article.main_claim, CLAIM_UNVERIFIED);
        assert_eq!(article.evidence, vec![EVIDENCE_UNVERIFIED.to_string()]);
        assert_eq!(article.summary, NO_SUMMARY);
    }

    #[test]
    fn fields_are_trimmed() {
        let candidate = RawArticle {
            title: "  Headline  ".to_string(),
            source: "\tOutlet\n".to_string(),
            url: " https://example.com ".to_string(),
            published_date: " 2026-08-01 ".to_string(),
            ..Default::default()
        };
        let article = normalize_article(&candidate, MediaBias::Conservative);
        assert_eq!(article.title, "Headline");
        assert_eq!(article.source, "Outlet");
        assert_eq!(article.url, "https://example.com");
        assert_eq!(article.published_date, "2026-08-01");
    }

    #[test]
    fn keywords_cap_at_five_and_evidence_at_three() {
        let candidate = RawArticle {
            keywords: (1..=8).map(|i| format!("k{i}")).collect(),
            evidence: (1..=5).map(|i| format!("e{i}")).collect(),
            ..Default::default()
        };
        let article = normalize_article(&candidate, MediaBias::Progressive);
        assert_eq!(article.keywords.len(), 5);
        assert_eq!(article.keywords[0], "k1");
        assert_eq!(article.keywords[4], "k5");
        assert_eq!(article.evidence.len(), 3);
        assert_eq!(article.evidence[2], "e3");
    }

    #[test]
    fn whitespace_only_array_entries_count_as_absent() {
        let candidate = RawArticle {
            keywords: vec!["  ".to_string(), "".to_string()],
            evidence: vec!["\n".to_string()],
            ..Default::default()
        };
        let article = normalize_article(&candidate, MediaBias::Progressive);
        assert_eq!(article.keywords, vec![NO_KEYWORDS.to_string()]);
        assert_eq!(article.evidence, vec![EVIDENCE_UNVERIFIED.to_string()]);
    }

    #[test]
    fn main_claim_falls_back_to_summary_then_placeholder() {
        let candidate = RawArticle {
            summary: "short summary".to_string(),
            ..Default::default()
        };
        let article = normalize_article(&candidate, MediaBias::Progressive);
        assert_eq!(article.main_claim, "short summary");
        assert_eq!(article.summary, "short summary");
    }

    #[test]
    fn summary_falls_back_to_title() {
        let candidate = RawArticle {
            title: "Only a headline".to_string(),
            ..Default::default()
        };
        let article = normalize_article(&candidate, MediaBias::Progressive);
        assert_eq!(article.summary, "Only a headline");
    }

    #[test]
    fn trend_fallback_names_bias_and_keyword() {
        let trend = trend_fallback(MediaBias::Progressive, "test");
        assert!(trend.contains("progressive"));
        assert!(trend.contains("test"));
    }
}
