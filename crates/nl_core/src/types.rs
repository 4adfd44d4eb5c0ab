use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Editorial lean of a media outlet. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaBias {
    Progressive,
    Conservative,
}

impl MediaBias {
    pub const ALL: [MediaBias; 2] = [MediaBias::Progressive, MediaBias::Conservative];

    pub fn label(&self) -> &'static str {
        match self {
            MediaBias::Progressive => "progressive",
            MediaBias::Conservative => "conservative",
        }
    }
}

impl fmt::Display for MediaBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static reference entry for one outlet. Never mutated at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct MediaSource {
    pub name: &'static str,
    pub bias: MediaBias,
    pub domain: Option<&'static str>,
}

/// Canonical normalized article record. Only the normalizer in `nl_search`
/// may assemble one; every field is guaranteed non-null and the defaulted
/// fields non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedArticle {
    pub title: String,
    pub source: String,
    pub bias: MediaBias,
    pub url: String,
    pub published_date: String,
    pub keywords: Vec<String>,
    pub main_claim: String,
    pub evidence: Vec<String>,
    pub summary: String,
}

/// One bias group's search outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub articles: Vec<AnalyzedArticle>,
    pub common_keywords: Vec<String>,
    pub overall_trend: String,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self {
            articles: Vec::new(),
            common_keywords: Vec::new(),
            overall_trend: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Request-scoped comparison outcome; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub progressive: SearchResult,
    pub conservative: SearchResult,
    pub search_query: String,
    pub date_range: DateRange,
}

/// Inbound comparison parameters. Dates are opaque strings; format
/// validation is a caller concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub keyword: String,
    pub start_date: String,
    pub end_date: String,
}

/// Trending-keyword lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingKeywords {
    pub keywords: Vec<String>,
    pub descriptions: BTreeMap<String, String>,
    pub updated_at: String,
}
