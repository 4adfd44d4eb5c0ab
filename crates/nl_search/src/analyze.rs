//! Dual-group orchestration: the progressive and conservative pipelines
//! run concurrently and fail independently. Only two conditions surface
//! to the caller as errors: a rejected credential, and both groups coming
//! back empty.

use nl_core::{sources, AnalysisResult, DateRange, Error, MediaBias, Result, SearchParams, SearchResult};

use crate::parse::parse_search_response;
use crate::prompt::build_prompts;
use crate::provider::{ChatQuery, SearchProvider, DEFAULT_MODEL};

const SEARCH_TEMPERATURE: f32 = 0.1;
const SEARCH_MAX_TOKENS: u32 = 8000;
const SEARCH_RECENCY: &str = "month";

/// Run the full two-sided comparison for one request.
pub async fn run_comparison(
    provider: &dyn SearchProvider,
    params: &SearchParams,
) -> Result<AnalysisResult> {
    tracing::info!(
        "starting dual-group search for \"{}\" via {}",
        params.keyword,
        provider.name()
    );

    let (progressive, conservative) = tokio::join!(
        search_group(provider, params, MediaBias::Progressive),
        search_group(provider, params, MediaBias::Conservative),
    );

    // Both futures have settled; a rejected credential now takes priority
    // over degrading to an empty group.
    let progressive = settle_group(progressive, MediaBias::Progressive)?;
    let conservative = settle_group(conservative, MediaBias::Conservative)?;

    tracing::info!(
        "search finished: {} progressive, {} conservative article(s)",
        progressive.articles.len(),
        conservative.articles.len()
    );

    if progressive.articles.is_empty() && conservative.articles.is_empty() {
        return Err(Error::NoResults);
    }

    Ok(AnalysisResult {
        progressive,
        conservative,
        search_query: params.keyword.clone(),
        date_range: DateRange {
            start: params.start_date.clone(),
            end: params.end_date.clone(),
        },
    })
}

async fn search_group(
    provider: &dyn SearchProvider,
    params: &SearchParams,
    bias: MediaBias,
) -> Result<SearchResult> {
    let names = sources::names_for(bias);
    let (system_prompt, user_prompt) = build_prompts(
        &params.keyword,
        &params.start_date,
        &params.end_date,
        bias,
        &names,
    );

    let query = ChatQuery {
        model: DEFAULT_MODEL.to_string(),
        system_prompt,
        user_prompt,
        temperature: SEARCH_TEMPERATURE,
        max_tokens: SEARCH_MAX_TOKENS,
        search_domain_filter: sources::domains_for(bias)
            .into_iter()
            .map(str::to_string)
            .collect(),
        search_recency_filter: Some(SEARCH_RECENCY.to_string()),
    };

    let text = provider.search(query).await?;
    tracing::debug!("{} response: {} chars", bias, text.len());

    let result = parse_search_response(&text, bias, &params.keyword);
    tracing::info!("{} group parsed {} article(s)", bias, result.articles.len());
    Ok(result)
}

/// A group's provider failure becomes an empty result carrying a readable
/// note, so the sibling group is never dragged down with it. Credential
/// rejections are the one exception and propagate.
fn settle_group(outcome: Result<SearchResult>, bias: MediaBias) -> Result<SearchResult> {
    match outcome {
        Ok(result) => Ok(result),
        Err(err) if err.is_credential() => Err(err),
        Err(err) => {
            tracing::error!("{} outlet search failed: {}", bias, err);
            Ok(SearchResult {
                articles: Vec::new(),
                common_keywords: Vec::new(),
                overall_trend: format!("{} outlet search failed: {}", bias.label(), err),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{CannedProvider, CannedReply};

    fn params() -> SearchParams {
        SearchParams {
            keyword: "test".to_string(),
            start_date: "2026-08-01".to_string(),
            end_date: "2026-08-26".to_string(),
        }
    }

    fn article_json(title: &str) -> String {
        format!(
            r#"{{"articles":[{{"title":"{title}","source":"S","url":"https://x"}}],"commonKeywords":["k"],"overallTrend":"t"}}"#
        )
    }

    #[tokio::test]
    async fn both_groups_populated() {
        let provider = CannedProvider::replying(CannedReply::Text(article_json("P")))
            .route("conservative", CannedReply::Text(article_json("C")));
        let result = run_comparison(&provider, &params()).await.unwrap();
        assert_eq!(result.progressive.articles[0].title, "P");
        assert_eq!(result.conservative.articles[0].title, "C");
        assert_eq!(result.search_query, "test");
        assert_eq!(result.date_range.start, "2026-08-01");
        assert_eq!(
            result.progressive.articles[0].bias,
            MediaBias::Progressive
        );
        assert_eq!(
            result.conservative.articles[0].bias,
            MediaBias::Conservative
        );
    }

    #[tokio::test]
    async fn one_failing_group_does_not_abort_the_other() {
        let provider = CannedProvider::replying(CannedReply::Text(article_json("C")))
            .route(
                "progressive",
                CannedReply::ProviderError("timed out".to_string()),
            );
        let result = run_comparison(&provider, &params()).await.unwrap();
        assert!(result.progressive.articles.is_empty());
        assert!(result.progressive.overall_trend.contains("failed"));
        assert!(result.progressive.overall_trend.contains("progressive"));
        assert_eq!(result.conservative.articles.len(), 1);
    }

    #[tokio::test]
    async fn both_groups_empty_is_a_combined_failure() {
        let provider = CannedProvider::replying(CannedReply::Text("no json here".to_string()));
        let err = run_comparison(&provider, &params()).await.unwrap_err();
        assert!(matches!(err, Error::NoResults));
    }

    #[tokio::test]
    async fn one_empty_group_is_not_a_failure() {
        let provider = CannedProvider::replying(CannedReply::Text("no json here".to_string()))
            .route("conservative", CannedReply::Text(article_json("C")));
        let result = run_comparison(&provider, &params()).await.unwrap();
        assert!(result.progressive.articles.is_empty());
        assert_eq!(result.conservative.articles.len(), 1);
    }

    #[tokio::test]
    async fn credential_rejection_surfaces() {
        let provider = CannedProvider::replying(CannedReply::Text(article_json("C"))).route(
            "progressive",
            CannedReply::CredentialError("bad key".to_string()),
        );
        let err = run_comparison(&provider, &params()).await.unwrap_err();
        assert!(err.is_credential());
    }

    #[tokio::test]
    async fn parse_failure_in_one_group_degrades_quietly() {
        let provider = CannedProvider::replying(CannedReply::Text(article_json("P")))
            .route("conservative", CannedReply::Text("```json\ngarbage```".to_string()));
        let result = run_comparison(&provider, &params()).await.unwrap();
        assert_eq!(result.progressive.articles.len(), 1);
        assert!(result.conservative.articles.is_empty());
        assert_eq!(result.conservative.overall_trend, "");
    }
}
