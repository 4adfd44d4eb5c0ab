//! Prompt construction for one bias group's search call. Pure functions;
//! the parser's fallback ladder depends on the model at least attempting
//! the JSON shape spelled out here.

use nl_core::MediaBias;

pub const SEARCH_SYSTEM_PROMPT: &str = r#"News search specialist. Find real articles only and answer with concise JSON.

Rules:
1. Only articles that actually exist
2. Output JSON only (no commentary)
3. Keep every text field as short as possible
4. The JSON must be complete

Format:
{
  "articles": [
    {
      "title": "headline",
      "source": "outlet name",
      "url": "https://...",
      "publishedDate": "YYYY-MM-DD",
      "keywords": ["keyword1", "keyword2", "keyword3"],
      "mainClaim": "central claim in one sentence",
      "evidence": ["evidence1", "evidence2"],
      "summary": "summary in two sentences"
    }
  ],
  "commonKeywords": ["shared1", "shared2", "shared3"],
  "overallTrend": "overall editorial stance in two sentences"
}

Important:
- 3-4 articles only
- keep all fields short
- complete JSON required"#;

/// Build the (system, user) prompt pair for one group. Infallible, even
/// with an empty keyword; keyword presence is validated by the caller.
pub fn build_prompts(
    keyword: &str,
    start_date: &str,
    end_date: &str,
    bias: MediaBias,
    media_names: &[&str],
) -> (String, String) {
    let user = format!(
        "Search \"{}\". {}~{}. {} outlets: {}. JSON only. Keep it short.",
        keyword,
        start_date,
        end_date,
        bias.label(),
        media_names.join(", ")
    );
    (SEARCH_SYSTEM_PROMPT.to_string(), user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_all_parameters() {
        let (_, user) = build_prompts(
            "tax reform",
            "2026-08-01",
            "2026-08-26",
            MediaBias::Conservative,
            &["Chosun Ilbo", "JoongAng Ilbo"],
        );
        assert!(user.contains("tax reform"));
        assert!(user.contains("2026-08-01~2026-08-26"));
        assert!(user.contains("conservative outlets"));
        assert!(user.contains("Chosun Ilbo, JoongAng Ilbo"));
    }

    #[test]
    fn system_prompt_pins_the_output_contract() {
        let (system, _) = build_prompts("x", "a", "b", MediaBias::Progressive, &[]);
        for key in ["articles", "commonKeywords", "overallTrend", "mainClaim"] {
            assert!(system.contains(key), "missing field name {key}");
        }
    }

    #[test]
    fn empty_keyword_still_builds() {
        let (_, user) = build_prompts("", "", "", MediaBias::Progressive, &[]);
        assert!(user.contains("progressive outlets"));
    }
}
